use std::{fs, path::PathBuf};

use serde_json::Value;
use tempfile::tempdir;

use tessera_cli::{Args, run};

/// Demos are at workspace root, relative to workspace not the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn run_demo(config: Option<PathBuf>) -> Value {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("layouts.json");

    let args = Args {
        input: demos_path().join("batch.json").to_string_lossy().to_string(),
        output: output_path.to_string_lossy().to_string(),
        config: config.map(|path| path.to_string_lossy().to_string()),
        log_level: "off".to_string(),
    };

    let summary = run(&args).expect("Dry run failed");
    assert_eq!(summary.rows, 4);

    let output = fs::read_to_string(&output_path).expect("Failed to read output");
    serde_json::from_str(&output).expect("Output is not JSON")
}

fn messages_with(report: &Value, severity: &str) -> Vec<(u64, String)> {
    report["messages"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|message| message["severity"] == severity)
        .map(|message| {
            (
                message["row"].as_u64().unwrap(),
                message["message"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

#[test]
fn e2e_smoke_test_demo_batch() {
    let report = run_demo(Some(demos_path().join("config.toml")));

    let rows = report["rows"].as_array().unwrap();
    let ids: Vec<u64> = rows.iter().map(|row| row["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 4], "Row 3 references an untyped block");

    for row in rows {
        let layout = row["layout"].as_array().unwrap();
        assert_eq!(layout.len(), 2);
        assert_eq!(layout[0]["layout_settings"]["label"], "Header");
        assert_eq!(layout[1]["layout_id"], "layout_onecol");
    }

    let components: Vec<&Value> = rows[0]["layout"][1]["components"]
        .as_object()
        .unwrap()
        .values()
        .collect();
    let placed: Vec<(&str, i64)> = components
        .iter()
        .map(|component| {
            (
                component["configuration"]["id"].as_str().unwrap(),
                component["weight"].as_i64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        placed,
        vec![
            ("inline_block:text", 0),
            ("inline_block:image", 1),
            ("inline_block:text", 2)
        ]
    );
    assert_eq!(components[0]["configuration"]["block_revision_id"], 1004);

    assert_eq!(rows[1]["layout"][1]["components"].as_object().unwrap().len(), 1);
    assert!(rows[2]["layout"][1]["components"].as_object().unwrap().is_empty());

    let warnings = messages_with(&report, "warning");
    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().all(|(row, _)| *row == 2));

    let errors = messages_with(&report, "error");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].1.contains("find the block type"), "{}", errors[0].1);
    assert_eq!(errors[0].0, 3);
}

#[test]
fn e2e_smoke_test_missing_input() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let args = Args {
        input: temp_dir.path().join("missing.json").to_string_lossy().to_string(),
        output: temp_dir.path().join("layouts.json").to_string_lossy().to_string(),
        config: Some(demos_path().join("config.toml").to_string_lossy().to_string()),
        log_level: "off".to_string(),
    };

    assert!(run(&args).is_err());
    assert!(!temp_dir.path().join("layouts.json").exists());
}
