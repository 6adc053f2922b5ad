//! CLI command integration tests.
//! Each test uses a temp directory via DG_DATA_DIR for full isolation.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn dg_cmd(data_dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("dg").unwrap();
    cmd.env("DG_DATA_DIR", data_dir.path());
    cmd
}

fn write_drawing(dir: &TempDir, name: &str, strokes: Vec<Vec<[f64; 2]>>) -> PathBuf {
    let path = dir.path().join(name);
    let doc = json!({ "width": 320, "height": 320, "strokes": strokes });
    std::fs::write(&path, serde_json::to_string(&doc).unwrap()).unwrap();
    path
}

/// Two full-length perpendicular strokes, offset so variants differ
/// slightly without changing the overall shape.
fn cross_strokes(offset: f64) -> Vec<Vec<[f64; 2]>> {
    let horizontal: Vec<[f64; 2]> = (0..29)
        .map(|i| [20.0 + i as f64 * 10.0, 160.0 + offset])
        .collect();
    let vertical: Vec<[f64; 2]> = (0..29)
        .map(|i| [160.0 + offset, 20.0 + i as f64 * 10.0])
        .collect();
    vec![horizontal, vertical]
}

fn circle_strokes() -> Vec<Vec<[f64; 2]>> {
    let ring: Vec<[f64; 2]> = (0..=64)
        .map(|i| {
            let angle = i as f64 / 64.0 * std::f64::consts::TAU;
            [160.0 + 120.0 * angle.cos(), 160.0 + 120.0 * angle.sin()]
        })
        .collect();
    vec![ring]
}

#[test]
fn stats_fresh_db() {
    let dir = TempDir::new().unwrap();
    dg_cmd(&dir)
        .args(["stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("samples: 0"))
        .stdout(predicate::str::contains("labels:  0"));
}

#[test]
fn guess_with_no_training_data() {
    let dir = TempDir::new().unwrap();
    let drawing = write_drawing(&dir, "cross.json", cross_strokes(0.0));

    dg_cmd(&dir)
        .args(["guess"])
        .arg(&drawing)
        .assert()
        .success()
        .stdout(predicate::str::contains("unknown"))
        .stdout(predicate::str::contains("no training data"));
}

#[test]
fn train_then_stats() {
    let dir = TempDir::new().unwrap();
    let drawing = write_drawing(&dir, "cross.json", cross_strokes(0.0));

    dg_cmd(&dir)
        .args(["train", "--label", "cross"])
        .arg(&drawing)
        .assert()
        .success()
        .stdout(predicate::str::contains("saved 'cross'"))
        .stdout(predicate::str::contains("1 samples total"));

    dg_cmd(&dir)
        .args(["stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("samples: 1"))
        .stdout(predicate::str::contains("cross: 1"));
}

#[test]
fn train_then_guess_same_shape() {
    let dir = TempDir::new().unwrap();

    // A few jittered crosses and circles, then guess a fresh cross
    for i in 0..3 {
        let cross = write_drawing(&dir, &format!("cross{i}.json"), cross_strokes(i as f64 * 4.0));
        dg_cmd(&dir)
            .args(["train", "--label", "cross"])
            .arg(&cross)
            .assert()
            .success();
    }
    let circle = write_drawing(&dir, "circle.json", circle_strokes());
    dg_cmd(&dir)
        .args(["train", "--label", "circle"])
        .arg(&circle)
        .assert()
        .success();

    let probe = write_drawing(&dir, "probe.json", cross_strokes(2.0));
    dg_cmd(&dir)
        .args(["guess"])
        .arg(&probe)
        .assert()
        .success()
        .stdout(predicate::str::contains("cross"))
        .stdout(predicate::str::contains("confidence:"));
}

#[test]
fn train_rejects_sparse_drawing() {
    let dir = TempDir::new().unwrap();

    // A single tap leaves almost no ink and no real stroke
    let tap = write_drawing(&dir, "tap.json", vec![vec![[160.0, 160.0]]]);
    dg_cmd(&dir)
        .args(["train", "--label", "dot"])
        .arg(&tap)
        .assert()
        .success()
        .stdout(predicate::str::contains("not saved"));

    dg_cmd(&dir)
        .args(["stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("samples: 0"));
}

#[test]
fn guess_rejects_unreadable_drawing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("garbage.json");
    std::fs::write(&path, "this is not a drawing").unwrap();

    dg_cmd(&dir).args(["guess"]).arg(&path).assert().failure();
}

#[test]
fn export_import_roundtrip() {
    let dir = TempDir::new().unwrap();

    for (i, label) in ["cross", "circle"].iter().enumerate() {
        let strokes = if i == 0 { cross_strokes(0.0) } else { circle_strokes() };
        let drawing = write_drawing(&dir, &format!("{label}.json"), strokes);
        dg_cmd(&dir)
            .args(["train", "--label", label])
            .arg(&drawing)
            .assert()
            .success();
    }

    let export_path = dir.path().join("export.json");
    dg_cmd(&dir)
        .args(["export"])
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("exported to"));
    assert!(export_path.exists(), "export file should exist");

    // Import into a fresh data dir
    let other = TempDir::new().unwrap();
    dg_cmd(&other)
        .args(["import"])
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("imported 2 samples"));

    dg_cmd(&other)
        .args(["stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("samples: 2"))
        .stdout(predicate::str::contains("circle: 1"))
        .stdout(predicate::str::contains("cross: 1"));
}

#[test]
fn prompt_rotates_without_immediate_repeat() {
    let dir = TempDir::new().unwrap();

    let mut previous: Option<String> = None;
    for _ in 0..10 {
        let output = dg_cmd(&dir).args(["prompt"]).output().unwrap();
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        let word = stdout
            .trim()
            .strip_prefix("draw: ")
            .expect("prompt output should start with 'draw: '")
            .to_string();
        if let Some(prev) = &previous {
            assert_ne!(&word, prev, "consecutive prompts must differ");
        }
        previous = Some(word);
    }
}

#[test]
fn missing_required_args() {
    let dir = TempDir::new().unwrap();

    // guess without a drawing file
    dg_cmd(&dir)
        .args(["guess"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));

    // train without a label
    let drawing = write_drawing(&dir, "cross.json", cross_strokes(0.0));
    dg_cmd(&dir)
        .args(["train"])
        .arg(&drawing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));

    // export without a path
    dg_cmd(&dir)
        .args(["export"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}
