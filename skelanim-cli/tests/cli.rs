//! CLI integration tests
//!
//! These run the `skelanim` binary against the built-in arm rig and against
//! description files written to a temporary directory.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn skelanim() -> Command {
    Command::cargo_bin("skelanim").unwrap()
}

#[test]
fn test_info_builtin_rig() {
    skelanim()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: arm"))
        .stdout(predicate::str::contains("Bones: 5"))
        .stdout(predicate::str::contains("Keyframes: 5"))
        .stdout(predicate::str::contains("right_hand"))
        .stdout(predicate::str::contains("Bind origin"))
        .stdout(predicate::str::contains("(-0.500, 1.000, 0.000)"));
}

#[test]
fn test_tree_builtin_rig() {
    skelanim()
        .args(["tree", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("root [0]"))
        .stdout(predicate::str::contains("left_hand [3]"));
}

#[test]
fn test_demo_then_validate() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("arm.yaml");

    skelanim()
        .args(["demo", "--output"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    skelanim()
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("5 bones, 5 skin parts, 5 keyframes"));
}

#[test]
fn test_demo_json_to_stdout() {
    skelanim()
        .args(["demo", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"))
        .stdout(predicate::str::contains("\"name\": \"arm\""));
}

#[test]
fn test_validate_rejects_bad_parent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.yaml");
    fs::write(
        &path,
        r#"name: broken
bones:
  - name: a
    parent: 1
  - name: b
skin:
  - mesh: cylinder
    bone: 0
animation:
  interval: 1.0
  keyframes:
    - translations: [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0]]
      rotations: [[0.0, 0.0, 0.0, 1.0], [0.0, 0.0, 0.0, 1.0]]
"#,
    )
    .unwrap();

    skelanim()
        .arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid rig"));
}

#[test]
fn test_sample_json_at_rest() {
    let output = skelanim()
        .args(["sample", "--time", "0", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["rig"], "arm");
    assert_eq!(report["layout"], "column_major");

    let bones = report["samples"][0]["bones"].as_array().unwrap();
    assert_eq!(bones.len(), 5);
    for bone in bones {
        let values: Vec<f64> = bone
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_f64().unwrap())
            .collect();
        assert_eq!(values.len(), 16);
        for (i, v) in values.iter().enumerate() {
            let expected = if i % 5 == 0 { 1.0 } else { 0.0 };
            assert!((v - expected).abs() < 1e-5, "element {i} was {v}");
        }
    }
}

#[test]
fn test_sample_ticks_table() {
    skelanim()
        .args(["sample", "--delta", "0.5", "--ticks", "3", "--all", "--parts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tick 1 @ 0.500s"))
        .stdout(predicate::str::contains("Tick 3 @ 1.500s"))
        .stdout(predicate::str::contains("Bone 0 (root):"))
        .stdout(predicate::str::contains("Part cylinder on bone 4:"));
}

#[test]
fn test_sample_rejects_negative_time() {
    skelanim()
        .args(["sample", "--time", "-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot evaluate at time -1"));
}
