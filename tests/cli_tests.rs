//! End-to-end tests for the `munkres-solver` binary.

use assert_cmd::Command;
use predicates::prelude::*;

const SAMPLE_TSV: &str = "12\t7\t9\t7\t9\n8\t9\t6\t6\t6\n7\t17\t12\t14\t9\n15\t14\t6\t6\t10\n4\t10\t7\t10\t9\n";

fn cmd() -> Command {
    Command::cargo_bin("munkres-solver").expect("binary should build")
}

#[test]
fn test_solve_sample_text() {
    cmd()
        .args(["solve", "--sample"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Assignment Results"))
        .stdout(predicate::str::contains("Total cost: 32"));
}

#[test]
fn test_solve_sample_json() {
    let output = cmd()
        .args(["solve", "--sample", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["assignment"], serde_json::json!([1, 2, 4, 3, 0]));
    assert_eq!(json["total_cost"], serde_json::json!(32.0));
    assert_eq!(json["pairs"][4]["cost"], serde_json::json!(4.0));
}

#[test]
fn test_sample_tsv_round_trips_through_stdin() {
    cmd()
        .args(["sample", "--format", "tsv"])
        .assert()
        .success()
        .stdout(SAMPLE_TSV);

    cmd()
        .args(["solve", "-", "--format", "tsv"])
        .write_stdin(SAMPLE_TSV)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("row\tcolumn\tcost\n"))
        .stdout(predicate::str::contains("2\t4\t9\n"))
        .stdout(predicate::str::contains("4\t0\t4\n"));
}

#[test]
fn test_solve_csv_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("costs.csv");
    std::fs::write(&path, "task_a,task_b,task_c\n7,3,9\n2,8,6\n").unwrap();

    cmd()
        .args(["solve", "--format", "tsv"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("0\t1\t3\n"))
        .stdout(predicate::str::contains("1\t0\t2\n"));
}

#[test]
fn test_solve_rejects_negative_costs() {
    cmd()
        .args(["solve", "-"])
        .write_stdin("1 -1\n0 2\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("negative"));
}

#[test]
fn test_solve_rejects_tall_matrix() {
    cmd()
        .args(["solve", "-"])
        .write_stdin("[[1], [2]]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("transpose"));
}

#[test]
fn test_solve_rejects_loose_tolerance() {
    // A tolerance this wide would treat the 0.25 gap between rows as a tie
    cmd()
        .args(["solve", "-", "--tolerance", "0.5"])
        .write_stdin("1 1.25\n1 2\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Zero tolerance must be between 0 and"));
}

#[test]
fn test_solve_missing_file() {
    cmd()
        .args(["solve", "/nonexistent/costs.tsv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read cost matrix"));
}

#[test]
fn test_solve_requires_input() {
    cmd().arg("solve").assert().failure();
}
