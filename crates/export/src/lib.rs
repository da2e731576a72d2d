//! Export helpers for extremal distance results: CSV rows, scene descriptions, and summary tables.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

/// Errors surfaced while writing exported artifacts.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod distances {
    use std::io::Write;

    use orrery_extremes::ExtremalResult;
    use serde::Serialize;

    use super::ExportError;

    /// CSV row emitted per analysed pair.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct DistanceRow {
        pub pair: String,
        pub min_distance: f64,
        pub max_distance: f64,
        /// Empty when the orbits touch.
        pub ratio: Option<f64>,
    }

    impl DistanceRow {
        pub fn new(first: &str, second: &str, result: &ExtremalResult) -> Self {
            Self {
                pair: format!("{first}-{second}"),
                min_distance: result.min_distance(),
                max_distance: result.max_distance(),
                ratio: result.ratio(),
            }
        }
    }

    /// Write the header and every row.
    pub fn write_rows<W: Write>(writer: W, rows: &[DistanceRow]) -> Result<(), ExportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in rows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

pub mod scene {
    use std::fs::File;
    use std::io::{BufWriter, Write};
    use std::path::Path;

    use orrery_core::vector::{Vector3, scale};
    use orrery_extremes::ExtremalResult;
    use orrery_orbits::curve::curve_points;
    use orrery_orbits::{CurveResolution, NamedOrbit, OrbitalElements, SampleError};
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use super::ExportError;

    pub const ORBITS_COLLECTION: &str = "Orbits";
    pub const DISTANCES_COLLECTION: &str = "Min_Max.Distances";
    pub const ORBITS_ROOT: &str = "Sun_orbits";
    pub const DISTANCES_ROOT: &str = "Sun_distances";
    /// Group label for bodies a catalog leaves ungrouped.
    pub const FALLBACK_GROUP: &str = "Recent";

    /// Display shape of an empty marker.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    #[serde(rename_all = "snake_case")]
    pub enum MarkerKind {
        PlainAxes,
        Sphere,
    }

    /// Organizational node or point marker.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct SceneNode {
        pub name: String,
        pub collection: &'static str,
        pub parent: Option<String>,
        pub kind: MarkerKind,
        pub size: f64,
        pub location: Vector3,
    }

    /// Closed display curve for one orbit.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct OrbitCurve {
        pub name: String,
        pub collection: &'static str,
        pub parent: String,
        pub cyclic: bool,
        pub points: Vec<Vector3>,
    }

    /// Everything a 3D-scene builder needs to lay out orbits and extremal markers.
    ///
    /// Organizational node names are unique; point marker names (`Earth.min`)
    /// repeat across pairs and are only addressed through their parents.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct SceneDescription {
        pub curves: Vec<OrbitCurve>,
        pub nodes: Vec<SceneNode>,
        #[serde(skip)]
        orbits_root: String,
        /// `(group label, node name)` in order of first use.
        #[serde(skip)]
        groups: Vec<(String, String)>,
    }

    impl Default for SceneDescription {
        fn default() -> Self {
            Self::new()
        }
    }

    impl SceneDescription {
        /// Scene rooted at [`ORBITS_ROOT`], as for heliocentric catalogs.
        pub fn new() -> Self {
            Self::with_root(ORBITS_ROOT)
        }

        /// Scene whose orbit curves hang under `root` (a planet name for moon systems).
        pub fn with_root(root: &str) -> Self {
            Self {
                curves: Vec::new(),
                nodes: vec![
                    empty(root, ORBITS_COLLECTION, None, MarkerKind::PlainAxes, 1.0),
                    empty(
                        DISTANCES_ROOT,
                        DISTANCES_COLLECTION,
                        None,
                        MarkerKind::PlainAxes,
                        0.5,
                    ),
                ],
                orbits_root: root.to_string(),
                groups: Vec::new(),
            }
        }

        pub fn orbits_root(&self) -> &str {
            &self.orbits_root
        }

        /// Node for a catalog group, created on first use as `"{k}.{group}"`
        /// under the orbits root, `k` counting groups from 1.
        pub fn group_node(&mut self, group: &str) -> String {
            if let Some((_, node)) = self.groups.iter().find(|(label, _)| label == group) {
                return node.clone();
            }
            let node = format!("{}.{group}", self.groups.len() + 1);
            self.nodes.push(empty(
                &node,
                ORBITS_COLLECTION,
                Some(self.orbits_root.as_str()),
                MarkerKind::PlainAxes,
                0.3,
            ));
            self.groups.push((group.to_string(), node.clone()));
            node
        }

        /// Add the curve `"{index}.{name}.Orbit"` directly under the orbits root.
        pub fn add_orbit(
            &mut self,
            index: usize,
            orbit: &NamedOrbit,
            resolution: CurveResolution,
            scale_factor: f64,
        ) -> Result<(), SampleError> {
            let parent = self.orbits_root.clone();
            self.push_curve(index, orbit, parent, resolution, scale_factor)
        }

        /// Add the curve under its group node; ungrouped bodies go to [`FALLBACK_GROUP`].
        pub fn add_grouped_orbit(
            &mut self,
            index: usize,
            orbit: &NamedOrbit,
            group: Option<&str>,
            resolution: CurveResolution,
            scale_factor: f64,
        ) -> Result<(), SampleError> {
            let parent = self.group_node(group.unwrap_or(FALLBACK_GROUP));
            self.push_curve(index, orbit, parent, resolution, scale_factor)
        }

        fn push_curve(
            &mut self,
            index: usize,
            orbit: &NamedOrbit,
            parent: String,
            resolution: CurveResolution,
            scale_factor: f64,
        ) -> Result<(), SampleError> {
            let points = curve_points(&orbit.elements.precompute(), resolution, scale_factor)?;
            self.curves.push(OrbitCurve {
                name: format!("{index}.{}.Orbit", orbit.name),
                collection: ORBITS_COLLECTION,
                parent,
                cyclic: true,
                points,
            });
            Ok(())
        }

        /// Circular, equatorial reference orbit of the given radius, indexed 0.
        pub fn add_reference_orbit(
            &mut self,
            radius: f64,
            resolution: CurveResolution,
            scale_factor: f64,
        ) -> Result<(), SampleError> {
            // a non-positive radius has nothing to draw
            let Ok(elements) = OrbitalElements::circular(radius) else {
                return Ok(());
            };
            self.add_orbit(
                0,
                &NamedOrbit::new("Reference", elements),
                resolution,
                scale_factor,
            )
        }

        /// Add the marker hierarchy for one pair.
        ///
        /// `"{a}_{b}"` hangs under the distances root and parents `"{a}_{b}.min"`
        /// and `"{a}_{b}.max"`, which in turn parent the sphere markers placed
        /// at the extremal positions.
        pub fn add_pair(
            &mut self,
            first: &str,
            second: &str,
            result: &ExtremalResult,
            scale_factor: f64,
        ) {
            let master = format!("{first}_{second}");
            let min_parent = format!("{master}.min");
            let max_parent = format!("{master}.max");

            self.nodes.extend([
                empty(
                    &master,
                    DISTANCES_COLLECTION,
                    Some(DISTANCES_ROOT),
                    MarkerKind::PlainAxes,
                    0.4,
                ),
                empty(
                    &min_parent,
                    DISTANCES_COLLECTION,
                    Some(master.as_str()),
                    MarkerKind::PlainAxes,
                    0.3,
                ),
                empty(
                    &max_parent,
                    DISTANCES_COLLECTION,
                    Some(master.as_str()),
                    MarkerKind::PlainAxes,
                    0.3,
                ),
            ]);

            let markers = [
                (first, "min", &min_parent, result.min.position1),
                (second, "min", &min_parent, result.min.position2),
                (first, "max", &max_parent, result.max.position1),
                (second, "max", &max_parent, result.max.position2),
            ];
            for (body, label, parent, position) in markers {
                let mut node = empty(
                    &format!("{body}.{label}"),
                    DISTANCES_COLLECTION,
                    Some(parent.as_str()),
                    MarkerKind::Sphere,
                    0.15,
                );
                node.location = scale(&position, scale_factor);
                self.nodes.push(node);
            }
        }

        /// First node with the given name.
        pub fn node(&self, name: &str) -> Option<&SceneNode> {
            self.nodes.iter().find(|n| n.name == name)
        }

        pub fn children_of<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a SceneNode> {
            self.nodes
                .iter()
                .filter(move |n| n.parent.as_deref() == Some(parent))
        }

        pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), ExportError> {
            to_writer_pretty(&mut writer, self)?;
            writeln!(writer)?;
            writer.flush()?;
            Ok(())
        }

        pub fn write_json(&self, path: &Path) -> Result<(), ExportError> {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            self.write_to(BufWriter::new(File::create(path)?))
        }
    }

    fn empty(
        name: &str,
        collection: &'static str,
        parent: Option<&str>,
        kind: MarkerKind,
        size: f64,
    ) -> SceneNode {
        SceneNode {
            name: name.to_string(),
            collection,
            parent: parent.map(str::to_string),
            kind,
            size,
            location: [0.0; 3],
        }
    }
}

pub mod table {
    use super::distances::DistanceRow;

    /// Fixed-width summary of every pair, one line each.
    pub fn render_summary(rows: &[DistanceRow], unit: &str) -> String {
        let min_header = format!("Min ({unit})");
        let max_header = format!("Max ({unit})");
        let mut out = format!(
            "{:<17} {:>10} {:>10} {:>16}\n{}\n",
            "Pair",
            min_header,
            max_header,
            "Ratio (Max/Min)",
            "-".repeat(56)
        );
        for row in rows {
            let ratio = row
                .ratio
                .map(|r| format!("{r:.2}"))
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!(
                "{:<17} {:>10.6} {:>10.6} {:>16}\n",
                row.pair, row.min_distance, row.max_distance, ratio
            ));
        }
        out
    }
}
