use std::fs;
use std::process::Command;

use serde_json::Value;

fn apd_sim() -> Command {
    Command::new(env!("CARGO_BIN_EXE_apd-sim"))
}

#[test]
fn solve_prints_report_for_matrix_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("matrix.json");
    fs::write(&path, "[[1, 4, 9], [16, 25, 36], [49, 64, 81]]").expect("write matrix");

    let output = apd_sim()
        .args(["solve", "--matrix"])
        .arg(&path)
        .output()
        .expect("run apd-sim solve");
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["report"]["exponent"], 3);
    assert_eq!(value["report"]["permutations"], 6);
    assert_eq!(value["classification"], "within");
}

#[test]
fn solve_reports_infinite_for_rational_constant_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("matrix.json");
    fs::write(&path, r#"[["1/2", "1/3"], ["1/2", "1/3"]]"#).expect("write matrix");

    let output = apd_sim()
        .args(["solve", "--matrix"])
        .arg(&path)
        .output()
        .expect("run apd-sim solve");
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["report"]["exponent"], "inf");
    assert_eq!(value["classification"], "infinite");
}

#[test]
fn run_writes_reproducible_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let plan = dir.path().join("plan.yaml");
    fs::write(&plan, "seed: 5\nsizes:\n  2: 10\n  3: 10\n").expect("write plan");

    let mut reports = Vec::new();
    for label in ["a", "b"] {
        let out = dir.path().join(label);
        let status = apd_sim()
            .args(["run", "--plan"])
            .arg(&plan)
            .arg("--out")
            .arg(&out)
            .status()
            .expect("run apd-sim run");
        assert!(status.success());
        reports.push(fs::read(out.join("experiment_report.json")).expect("report"));
    }
    assert_eq!(reports[0], reports[1]);
    let value: Value = serde_json::from_slice(&reports[0]).expect("json");
    assert_eq!(value["total_samples"], 20);
    assert_eq!(value["total_violations"], 0);
}

#[test]
fn invalid_plan_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let plan = dir.path().join("plan.yaml");
    fs::write(&plan, "sizes: {}\n").expect("write plan");
    let status = apd_sim()
        .args(["run", "--plan"])
        .arg(&plan)
        .status()
        .expect("run apd-sim run");
    assert!(!status.success());
}

#[test]
fn demo_lists_special_cases() {
    let output = apd_sim()
        .args(["demo", "--max-size", "3"])
        .output()
        .expect("run apd-sim demo");
    assert!(output.status.success());
    let body = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(body.lines().count(), 1 + 2 * 3);
    assert!(body.contains("Squared Natural Square"));
}
