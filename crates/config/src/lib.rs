//! Configuration models and loaders for the Orrery workspace.
//!
//! Body catalogs and scenarios can be a YAML file, a single TOML record, or (for
//! catalogs) a directory of TOML records loaded in file-name order.

use std::fs::File;
use std::path::{Path, PathBuf};

use orrery_extremes::SolverConfig;
use orrery_orbits::{CurveResolution, ElementsError, NamedOrbit, OrbitalElements};
use serde::Deserialize;
use thiserror::Error;

/// Orbital elements of one body as listed in a catalog (angles in degrees).
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BodyConfig {
    pub name: String,
    /// Same length unit for every body that will be compared (AU or km).
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub node_deg: f64,
    pub periapsis_deg: f64,
    /// Optional display grouping (e.g. "Galilean").
    #[serde(default)]
    pub group: Option<String>,
}

impl BodyConfig {
    /// Validate the catalog entry into an element set.
    pub fn elements(&self) -> Result<OrbitalElements, ConfigError> {
        OrbitalElements::from_degrees(
            self.semi_major_axis,
            self.eccentricity,
            self.inclination_deg,
            self.node_deg,
            self.periapsis_deg,
        )
        .map_err(|source| ConfigError::Elements {
            name: self.name.clone(),
            source,
        })
    }

    pub fn to_named_orbit(&self) -> Result<NamedOrbit, ConfigError> {
        Ok(NamedOrbit::new(self.name.clone(), self.elements()?))
    }
}

/// A batch of orbit pairs to analyse against one catalog.
#[derive(Debug, Deserialize, Clone)]
pub struct ScenarioConfig {
    /// Catalog path; relative paths resolve against the scenario file's directory.
    pub catalog: PathBuf,
    pub pairs: Vec<(String, String)>,
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub curve_resolution: CurveResolution,
    /// Multiplier applied to display curves and markers.
    #[serde(default = "default_curve_scale")]
    pub curve_scale: f64,
    /// Add a circular 1-unit reference orbit to the scene.
    #[serde(default)]
    pub reference_orbit: bool,
}

fn default_curve_scale() -> f64 {
    1.0
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("body '{0}' not found in catalog")]
    UnknownBody(String),
    #[error("body '{name}' has invalid elements: {source}")]
    Elements {
        name: String,
        #[source]
        source: ElementsError,
    },
}

/// Load body catalog entries from a YAML file, a TOML file, or a directory of TOML files.
pub fn load_bodies<P: AsRef<Path>>(path: P) -> Result<Vec<BodyConfig>, ConfigError> {
    load_records(path)
}

/// Load a scenario and resolve its catalog path.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig, ConfigError> {
    let path = path.as_ref();
    let mut scenario: ScenarioConfig = if is_toml(path) {
        toml::from_str(&std::fs::read_to_string(path)?)?
    } else {
        serde_yaml::from_reader(File::open(path)?)?
    };
    if scenario.catalog.is_relative() {
        if let Some(parent) = path.parent() {
            scenario.catalog = parent.join(&scenario.catalog);
        }
    }
    Ok(scenario)
}

/// Case-insensitive lookup by body name.
pub fn find_body<'a>(bodies: &'a [BodyConfig], name: &str) -> Result<&'a BodyConfig, ConfigError> {
    let upper = name.to_uppercase();
    bodies
        .iter()
        .find(|b| b.name.to_uppercase() == upper)
        .ok_or_else(|| ConfigError::UnknownBody(name.to_string()))
}

/// Resolve and validate every pair named in `pairs`.
pub fn resolve_pairs(
    bodies: &[BodyConfig],
    pairs: &[(String, String)],
) -> Result<Vec<(NamedOrbit, NamedOrbit)>, ConfigError> {
    pairs
        .iter()
        .map(|(first, second)| {
            Ok((
                find_body(bodies, first)?.to_named_orbit()?,
                find_body(bodies, second)?.to_named_orbit()?,
            ))
        })
        .collect()
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const EARTH_TOML: &str = r#"
name = "Earth"
semi_major_axis = 1.0
eccentricity = 0.016708
inclination_deg = 0.0
node_deg = 0.0
periapsis_deg = 102.937
"#;

    #[test]
    fn directory_catalog_loads_in_name_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("03_earth.toml"), EARTH_TOML).expect("write");
        std::fs::write(
            dir.path().join("04_mars.toml"),
            "name = \"Mars\"\nsemi_major_axis = 1.523679\neccentricity = 0.093401\n\
             inclination_deg = 1.85\nnode_deg = 49.558\nperiapsis_deg = 286.502\n",
        )
        .expect("write");
        std::fs::write(dir.path().join("notes.txt"), "ignored").expect("write");

        let bodies = load_bodies(dir.path()).expect("catalog");
        let names: Vec<_> = bodies.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Earth", "Mars"]);
        assert_eq!(find_body(&bodies, "mars").expect("mars").name, "Mars");
        assert!(matches!(
            find_body(&bodies, "Vulcan"),
            Err(ConfigError::UnknownBody(name)) if name == "Vulcan"
        ));
    }

    #[test]
    fn yaml_catalog_with_groups() {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .expect("tempfile");
        writeln!(
            file,
            "- name: Io\n  semi_major_axis: 421700\n  eccentricity: 0.0041\n  inclination_deg: 0.036\n  node_deg: 43.977\n  periapsis_deg: 84.129\n  group: Galilean"
        )
        .expect("write");
        let bodies = load_bodies(file.path()).expect("catalog");
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0].group.as_deref(), Some("Galilean"));
        let io = bodies[0].to_named_orbit().expect("valid");
        assert_eq!(io.elements.semi_major_axis(), 421_700.0);
    }

    #[test]
    fn unbound_catalog_entries_are_rejected() {
        let comet = BodyConfig {
            name: "Comet".to_string(),
            semi_major_axis: 10.0,
            eccentricity: 1.2,
            inclination_deg: 0.0,
            node_deg: 0.0,
            periapsis_deg: 0.0,
            group: None,
        };
        assert!(matches!(
            comet.to_named_orbit(),
            Err(ConfigError::Elements {
                source: ElementsError::Eccentricity(_),
                ..
            })
        ));
    }

    #[test]
    fn scenario_resolves_catalog_relative_to_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let scenario_path = dir.path().join("pairs.toml");
        std::fs::write(
            &scenario_path,
            r#"
catalog = "bodies"
pairs = [["Earth", "Mars"], ["Earth", "Jupiter"]]
curve_resolution = "adaptive"

[solver]
sample_count = 300
"#,
        )
        .expect("write");

        let scenario = load_scenario(&scenario_path).expect("scenario");
        assert_eq!(scenario.catalog, dir.path().join("bodies"));
        assert_eq!(scenario.pairs.len(), 2);
        assert_eq!(scenario.pairs[1], ("Earth".to_string(), "Jupiter".to_string()));
        assert_eq!(scenario.solver.sample_count, 300);
        assert_eq!(scenario.solver.refine_steps, 5);
        assert_eq!(scenario.curve_resolution, CurveResolution::Adaptive);
        assert_eq!(scenario.curve_scale, 1.0);
        assert!(!scenario.reference_orbit);
    }

    #[test]
    fn yaml_scenario_reads_fixed_and_adaptive_resolutions() {
        let dir = tempfile::tempdir().expect("tempdir");
        let fixed = dir.path().join("moons.yaml");
        std::fs::write(
            &fixed,
            "catalog: moons.yaml\npairs:\n  - [Io, Europa]\ncurve_resolution: 150\ncurve_scale: 1.0e-6\n",
        )
        .expect("write");
        let scenario = load_scenario(&fixed).expect("fixed resolution");
        assert_eq!(scenario.curve_resolution, CurveResolution::Fixed(150));
        assert_eq!(scenario.curve_scale, 1.0e-6);

        let adaptive = dir.path().join("adaptive.yaml");
        std::fs::write(
            &adaptive,
            "catalog: moons.yaml\npairs: []\ncurve_resolution: adaptive\n",
        )
        .expect("write");
        let scenario = load_scenario(&adaptive).expect("adaptive resolution");
        assert_eq!(scenario.curve_resolution, CurveResolution::Adaptive);

        let unknown = dir.path().join("unknown.yaml");
        std::fs::write(
            &unknown,
            "catalog: moons.yaml\npairs: []\ncurve_resolution: smooth\n",
        )
        .expect("write");
        assert!(matches!(load_scenario(&unknown), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn toml_scenario_reads_fixed_resolution() {
        let scenario: ScenarioConfig = toml::from_str(
            "catalog = \"bodies\"\npairs = []\ncurve_resolution = 64\n",
        )
        .expect("scenario");
        assert_eq!(scenario.curve_resolution, CurveResolution::Fixed(64));
    }

    #[test]
    fn resolve_pairs_reports_missing_bodies() {
        let earth: BodyConfig = toml::from_str(EARTH_TOML).expect("earth");
        let bodies = vec![earth];
        let err = resolve_pairs(&bodies, &[("Earth".into(), "Mars".into())])
            .expect_err("Mars is missing");
        assert!(matches!(err, ConfigError::UnknownBody(name) if name == "Mars"));
    }
}
