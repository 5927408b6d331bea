//! Drives the `careroi` binary end to end.

use assert_cmd::prelude::*;
use indoc::indoc;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const SCORES: &str = indoc! {"
    patient_id,horizon_days,risk_score,annual_cost
    100,30,0.05,10000
    200,30,0.80,36500
    200,90,0.85,36500
    P-301,60,0.42,18250
"};

fn careroi(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_careroi"));
    cmd.current_dir(dir).env_remove("CAREROI_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn write_scores(dir: &TempDir, contents: &str) -> String {
    let path = dir.path().join("scores.csv");
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_project_json_report() {
    let dir = TempDir::new().unwrap();
    let input = write_scores(&dir, SCORES);

    let stdout = stdout_of(careroi(dir.path()).args(["project", &input, "--format", "json"]));
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    let patients = report["patients"].as_array().unwrap();
    assert_eq!(patients.len(), 4);
    assert_eq!(patients[0]["patient_id"], 100);
    assert_eq!(patients[0]["roi_percent"], 0.0);
    assert_eq!(patients[3]["patient_id"], "P-301");

    let horizons: Vec<u64> = report["horizons"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["horizon"].as_u64().unwrap())
        .collect();
    assert_eq!(horizons, vec![30, 60, 90]);
}

#[test]
fn test_project_csv_to_file() {
    let dir = TempDir::new().unwrap();
    let input = write_scores(&dir, SCORES);
    let output = dir.path().join("out.csv");

    careroi(dir.path())
        .args(["project", &input, "--format", "csv", "--output"])
        .arg(&output)
        .assert()
        .success();

    let written = fs::read_to_string(&output).unwrap();
    let mut lines = written.lines();
    assert!(lines.next().unwrap().starts_with("patient_id,horizon_days,tier"));
    assert_eq!(lines.count(), 4);
}

#[test]
fn test_project_horizon_filter() {
    let dir = TempDir::new().unwrap();
    let input = write_scores(&dir, SCORES);

    let stdout = stdout_of(careroi(dir.path()).args([
        "project",
        &input,
        "--format",
        "json",
        "--horizons",
        "90",
    ]));
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["patients"].as_array().unwrap().len(), 1);
}

#[test]
fn test_project_terminal_report() {
    let dir = TempDir::new().unwrap();
    let input = write_scores(&dir, SCORES);

    let stdout = stdout_of(careroi(dir.path()).args(["project", &input]));
    assert!(stdout.contains("CARE PROGRAM ROI PROJECTION"));
    assert!(stdout.contains("Highest net benefit"));
}

#[test]
fn test_invalid_score_fails_the_run() {
    let dir = TempDir::new().unwrap();
    let input = write_scores(
        &dir,
        indoc! {"
            patient_id,horizon_days,risk_score,annual_cost
            1,30,0.2,5000
            2,30,1.7,5000
        "},
    );

    let output = careroi(dir.path())
        .args(["project", &input, "--format", "json"])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(output).unwrap();
    assert!(stderr.contains("1.7"), "stderr was: {stderr}");
}

#[test]
fn test_skip_invalid_reports_rejected_rows() {
    let dir = TempDir::new().unwrap();
    let input = write_scores(
        &dir,
        indoc! {"
            patient_id,horizon_days,risk_score,annual_cost
            1,30,0.2,5000
            2,30,1.7,5000
            3,45,0.3,5000
        "},
    );

    let stdout = stdout_of(careroi(dir.path()).args([
        "project",
        &input,
        "--format",
        "json",
        "--skip-invalid",
    ]));
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["patients"].as_array().unwrap().len(), 1);

    let rejected = report["rejected"].as_array().unwrap();
    assert_eq!(rejected.len(), 2);
    assert_eq!(rejected[0]["record"], 2);
    assert_eq!(rejected[1]["horizon_days"], 45);
}

#[test]
fn test_patient_command_orders_horizons() {
    let dir = TempDir::new().unwrap();

    let stdout = stdout_of(careroi(dir.path()).args([
        "patient",
        "--id",
        "200",
        "--annual-cost",
        "36500",
        "--score",
        "90=0.85",
        "--score",
        "30=0.80",
        "--format",
        "json",
    ]));
    let projection: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let days: Vec<u64> = projection["projections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["horizon_days"].as_u64().unwrap())
        .collect();
    assert_eq!(days, vec![30, 90]);
}

#[test]
fn test_patient_command_rejects_repeated_horizon() {
    let dir = TempDir::new().unwrap();

    let output = careroi(dir.path())
        .args([
            "patient",
            "--id",
            "7",
            "--annual-cost",
            "36500",
            "--score",
            "30=0.8",
            "--score",
            "30=0.8",
        ])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(output).unwrap();
    assert!(stderr.contains("scored more than once"), "stderr was: {stderr}");
}

#[test]
fn test_init_then_validate() {
    let dir = TempDir::new().unwrap();

    careroi(dir.path()).arg("init").assert().success();
    assert!(dir.path().join(".careroi.toml").exists());

    careroi(dir.path()).arg("init").assert().failure();
    careroi(dir.path()).args(["init", "--force"]).assert().success();

    let stdout = stdout_of(careroi(dir.path()).arg("validate"));
    assert!(stdout.contains("30-day, 60-day, 90-day"));
}

#[test]
fn test_validate_lists_every_issue() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.toml");
    fs::write(
        &config,
        indoc! {"
            [roi]
            cap_percent = -5.0
            floor = \"zero\"

            [projection]
            addressable_fraction = 1.5
        "},
    )
    .unwrap();

    let output = careroi(dir.path())
        .args(["validate", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(output).unwrap();
    assert!(stderr.contains("roi.cap_percent"), "stderr was: {stderr}");
    assert!(
        stderr.contains("projection.addressable_fraction"),
        "stderr was: {stderr}"
    );
    assert!(stderr.contains("2 configuration issue(s) found"));
}

#[test]
fn test_project_uses_nearest_config_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".careroi.toml"),
        indoc! {"
            [[horizons]]
            days = 30
            intervention_costs = [0.0, 150.0, 400.0, 700.0, 900.0]
            success_rates = [[0.03, 0.08], [0.10, 0.20], [0.25, 0.40], [0.30, 0.50], [0.50, 0.50]]
        "},
    )
    .unwrap();
    let input = write_scores(
        &dir,
        indoc! {"
            patient_id,horizon_days,risk_score,annual_cost
            200,30,0.80,36500
        "},
    );

    let stdout = stdout_of(careroi(dir.path()).args(["project", &input, "--format", "json"]));
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let roi = report["patients"][0]["roi_percent"].as_f64().unwrap();
    assert!((roi - 200.0 / 3.0).abs() < 1e-9);
}
