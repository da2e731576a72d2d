use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn configs() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../configs")
}

#[test]
fn extremes_prints_summary_for_pairs() {
    Command::cargo_bin("extremes")
        .expect("binary")
        .arg("--catalog")
        .arg(configs().join("bodies"))
        .args(["--pair", "earth:mars", "--pair", "Jupiter:Saturn", "-n", "120"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ratio (Max/Min)"))
        .stdout(predicate::str::contains("Earth-Mars"))
        .stdout(predicate::str::contains("Jupiter-Saturn"));
}

#[test]
fn extremes_writes_csv_to_stdout_and_scene_to_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let scene = dir.path().join("scene.json");
    Command::cargo_bin("extremes")
        .expect("binary")
        .arg("--scenario")
        .arg(configs().join("scenarios/solar_system.toml"))
        .args(["-n", "80", "--csv", "-", "--scene"])
        .arg(&scene)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "pair,min_distance,max_distance,ratio",
        ))
        .stdout(predicate::str::contains("Neptune-Uranus"))
        .stderr(predicate::str::contains("Pair"));

    let contents = std::fs::read_to_string(&scene).expect("scene written");
    assert!(contents.contains("\"0.Reference.Orbit\""));
    assert!(contents.contains("\"4.Mars.Orbit\""));
    assert!(contents.contains("\"Mars_Ceres.min\""));
}

#[test]
fn extremes_runs_the_galilean_scenario() {
    let dir = tempfile::tempdir().expect("tempdir");
    let scene = dir.path().join("moons.json");
    Command::cargo_bin("extremes")
        .expect("binary")
        .arg("--scenario")
        .arg(configs().join("scenarios/galilean.yaml"))
        .args(["-n", "80", "--unit", "km", "--scene"])
        .arg(&scene)
        .assert()
        .success()
        .stdout(predicate::str::contains("Min (km)"))
        .stdout(predicate::str::contains("Io-Europa"))
        .stdout(predicate::str::contains("Ganymede-Callisto"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&scene).expect("scene written"))
            .expect("json");
    let io = json["curves"]
        .as_array()
        .expect("curves")
        .iter()
        .find(|c| c["name"] == "1.Io.Orbit")
        .expect("io curve");
    assert_eq!(io["points"].as_array().expect("points").len(), 150);
}

#[test]
fn binaries_report_the_library_version() {
    for bin in ["extremes", "median", "curves"] {
        Command::cargo_bin(bin)
            .expect("binary")
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(orrery::version()));
    }
}

#[test]
fn extremes_rejects_unknown_bodies_and_bad_pairs() {
    Command::cargo_bin("extremes")
        .expect("binary")
        .arg("--catalog")
        .arg(configs().join("bodies"))
        .args(["--pair", "Earth:Vulcan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Vulcan"));

    Command::cargo_bin("extremes")
        .expect("binary")
        .args(["--pair", "EarthMars"])
        .assert()
        .failure();

    Command::cargo_bin("extremes")
        .expect("binary")
        .arg("--catalog")
        .arg(configs().join("bodies"))
        .args(["--pair", "Earth:Mars", "-n", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("resolution"));
}

#[test]
fn median_reports_distance() {
    Command::cargo_bin("median")
        .expect("binary")
        .arg("--catalog")
        .arg(configs().join("bodies"))
        .args(["--from", "Earth", "--to", "Mars", "-n", "200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Median distance Earth-Mars:"));
}

#[test]
fn curves_emits_json_for_a_group() {
    Command::cargo_bin("curves")
        .expect("binary")
        .arg("--catalog")
        .arg(configs().join("jupiter_moons.yaml"))
        .args(["--group", "Galilean", "--fixed", "40", "--scale", "1e-6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"1.Io.Orbit\""))
        .stdout(predicate::str::contains("\"4.Callisto.Orbit\""))
        .stdout(predicate::str::contains("Themisto").not());
}

#[test]
fn curves_hang_under_group_nodes_below_the_root() {
    let output = Command::cargo_bin("curves")
        .expect("binary")
        .arg("--catalog")
        .arg(configs().join("jupiter_moons.yaml"))
        .args(["--root", "Jupiter", "--fixed", "24", "--scale", "1e-6"])
        .output()
        .expect("run curves");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");

    let parent_of = |kind: &str, name: &str| {
        json[kind]
            .as_array()
            .expect(kind)
            .iter()
            .find(|n| n["name"] == name)
            .map(|n| n["parent"].clone())
            .unwrap_or_else(|| panic!("missing {name}"))
    };
    assert_eq!(parent_of("nodes", "Jupiter"), serde_json::Value::Null);
    assert_eq!(parent_of("nodes", "1.Galilean"), "Jupiter");
    assert_eq!(parent_of("nodes", "2.Themisto"), "Jupiter");
    assert_eq!(parent_of("curves", "1.Io.Orbit"), "1.Galilean");
    assert_eq!(parent_of("curves", "5.Themisto.Orbit"), "2.Themisto");
    assert!(
        !json["nodes"]
            .as_array()
            .expect("nodes")
            .iter()
            .any(|n| n["name"] == "Sun_orbits")
    );
}
