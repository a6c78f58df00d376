use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

// Build a minimal valid TOML config
fn write_valid_config(dir: &tempfile::TempDir) -> PathBuf {
    let toml = r#"
[smoothing]
window = 5
polynomial_order = 2

[pump]
strokes_per_minute = 10

[diagnosis]
fluid_pound_lbf = 100.0
gas_interference_lbf = 500.0
"#;
    let path = dir.path().join("cfg.toml");
    fs::write(&path, toml).unwrap();
    path
}

// A 16-sample sine-ish card; smooth enough to diagnose as normal
fn write_card_csv(dir: &tempfile::TempDir) -> PathBuf {
    let mut csv = String::from("Displacement,Rod Load\n");
    for i in 0..16 {
        let x = f64::from(i) * 2.0;
        let load = 5000.0 + 1500.0 * (f64::from(i) * 0.4).sin();
        csv.push_str(&format!("{x},{load}\n"));
    }
    let path = dir.path().join("card.csv");
    fs::write(&path, csv).unwrap();
    path
}

fn bin() -> Command {
    Command::cargo_bin("dynacard_cli").unwrap()
}

#[test]
fn help_shows_usage() {
    bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn self_check_passes_with_valid_config() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);
    bin()
        .arg("--config")
        .arg(&cfg)
        .arg("self-check")
        .assert()
        .success()
        .stdout(predicate::str::contains("self-check ok"));
}

#[test]
fn self_check_runs_on_missing_config_with_defaults() {
    let dir = tempdir().unwrap();
    bin()
        .arg("--config")
        .arg(dir.path().join("nope.toml"))
        .arg("self-check")
        .assert()
        .success();
}

#[test]
fn analyze_prints_the_result_triple() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);
    let card = write_card_csv(&dir);
    bin()
        .arg("--config")
        .arg(&cfg)
        .arg("analyze")
        .arg("--card")
        .arg(&card)
        .assert()
        .success()
        .stdout(predicate::str::contains("Stroke volume:"))
        .stdout(predicate::str::contains("Flow rate:"))
        .stdout(predicate::str::contains("Diagnosis:"));
}

#[test]
fn analyze_json_emits_the_full_schema() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);
    let card = write_card_csv(&dir);
    let output = bin()
        .arg("--config")
        .arg(&cfg)
        .arg("--json")
        .arg("analyze")
        .arg("--card")
        .arg(&card)
        .output()
        .unwrap();
    assert!(output.status.success());

    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["parameters"]["window"], 5);
    assert_eq!(v["parameters"]["strokes_per_minute"], 10);
    assert_eq!(v["downhole"]["estimated_load"].as_array().unwrap().len(), 16);
    assert!(v["volume"]["stroke_volume_bbl"].is_number());
    assert!(v["volume"]["rate_bbl_per_hour"].is_number());
    assert!(v["diagnosis"]["condition"].is_string());
    assert!(v["diagnosis"]["mean_abs_deviation_lbf"].is_number());
}

#[rstest]
#[case(&["--window", "4"], 2, "odd")]
#[case(&["--window", "53"], 2, "must be <= 51")]
#[case(&["--spm", "0"], 5, "1 and 60")]
#[case(&["--spm", "61"], 5, "1 and 60")]
#[case(&["--window", "31"], 3, "samples")]
fn analyze_maps_typed_errors_to_exit_codes(
    #[case] extra: &[&str],
    #[case] exit_code: i32,
    #[case] needle: &str,
) {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);
    let card = write_card_csv(&dir);
    let mut cmd = bin();
    cmd.arg("--config")
        .arg(&cfg)
        .arg("analyze")
        .arg("--card")
        .arg(&card);
    for a in extra {
        cmd.arg(a);
    }
    cmd.assert()
        .code(exit_code)
        .stderr(predicate::str::contains(needle));
}

#[test]
fn analyze_reports_bad_card_headers() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);
    let bad_csv = dir.path().join("card.csv");
    fs::write(&bad_csv, "Position,Load\n0.0,100.0\n").unwrap();

    bin()
        .arg("--config")
        .arg(&cfg)
        .arg("analyze")
        .arg("--card")
        .arg(&bad_csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Displacement,Rod Load"));
}

#[test]
fn broken_config_fails_with_config_exit_code() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("cfg.toml");
    fs::write(&cfg, "[smoothing]\nwindow = 4\n").unwrap();

    bin()
        .arg("--config")
        .arg(&cfg)
        .arg("self-check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must be odd"));
}

#[test]
fn json_errors_are_structured() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);
    let card = write_card_csv(&dir);
    let output = bin()
        .arg("--config")
        .arg(&cfg)
        .arg("--json")
        .arg("--log-level")
        .arg("error")
        .arg("analyze")
        .arg("--card")
        .arg(&card)
        .arg("--spm")
        .arg("0")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(5));

    let v: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(v["reason"], "InvalidRate");
    assert_eq!(v["details"]["got"], 0);
    assert!(v["message"].is_string());
}

#[test]
fn defaults_flag_ignores_config_and_overrides() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);
    let card = write_card_csv(&dir);
    // --defaults wins over --window 53, which would otherwise be rejected
    let output = bin()
        .arg("--config")
        .arg(&cfg)
        .arg("--json")
        .arg("analyze")
        .arg("--card")
        .arg(&card)
        .arg("--window")
        .arg("53")
        .arg("--defaults")
        .output()
        .unwrap();
    assert!(output.status.success());

    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["parameters"]["window"], 11);
    assert_eq!(v["parameters"]["strokes_per_minute"], 15);
}
