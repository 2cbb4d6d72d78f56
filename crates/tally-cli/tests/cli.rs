use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

const FUEL_RECEIPT: &str = "SHELL FORECOURT\nUnleaded petrol 38.20 L\nDate: 12/04/2024\nTotal £63.76\nCard payment\n";

fn tally() -> Command {
    Command::cargo_bin("tally").unwrap()
}

/// Write a default config into `dir` so tests never read the user's own.
fn config_in(dir: &Path) -> PathBuf {
    let path = dir.join("config.json");
    tally()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();
    path
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn extract_file_as_json() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    let input = dir.path().join("shell.txt");
    fs::write(&input, FUEL_RECEIPT).unwrap();

    let json = json_stdout(
        tally()
            .arg("--config")
            .arg(&config)
            .args(["extract", "--reference-date", "2024-06-01"])
            .arg(&input),
    );

    assert_eq!(json["money"]["value"], 63.76);
    assert_eq!(json["money"]["currency"], 0);
    assert_eq!(json["money"]["display"], "£63.76");
    assert_eq!(json["date"], "2024-04-12");
    assert_eq!(json["category"], 0);
}

#[test]
fn extract_stdin_as_csv() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());

    tally()
        .arg("--config")
        .arg(&config)
        .args(["extract", "-", "--format", "csv"])
        .write_stdin("Parking 4.50")
        .assert()
        .success()
        .stdout(predicate::str::contains("amount,display,date,category,category_name"))
        .stdout(predicate::str::contains("4.5,4.50,,1,Parking"));
}

#[test]
fn extract_empty_input() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());

    let json = json_stdout(
        tally()
            .arg("--config")
            .arg(&config)
            .args(["extract", "-"])
            .write_stdin(""),
    );

    assert_eq!(json["money"]["value"], Value::Null);
    assert_eq!(json["date"], Value::Null);
    assert_eq!(json["category"], -1);
}

#[test]
fn extract_text_with_vat() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());

    tally()
        .arg("--config")
        .arg(&config)
        .args(["extract", "-", "--format", "text", "--show-vat"])
        .write_stdin("Diesel\nTotal 60.00")
        .assert()
        .success()
        .stdout(predicate::str::contains("Amount:   60.00"))
        .stdout(predicate::str::contains("Category: Fuel"))
        .stdout(predicate::str::contains("VAT @ 20%"));
}

#[test]
fn extract_with_custom_lexicon() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    let lexicon = dir.path().join("lexicon.json");
    fs::write(
        &lexicon,
        r#"{
            "months": ["January","February","March","April","May","June",
                       "July","August","September","October","November","December"],
            "currency_markers": ["£"],
            "total_keywords": ["total"],
            "categories": [{ "name": "Widgets", "keywords": ["widget"] }]
        }"#,
    )
    .unwrap();

    let json = json_stdout(
        tally()
            .arg("--config")
            .arg(&config)
            .args(["extract", "-", "--lexicon"])
            .arg(&lexicon)
            .write_stdin("Blue widget\nTotal £3.00"),
    );

    assert_eq!(json["category"], 0);
    assert_eq!(json["money"]["value"], 3.0);
}

#[test]
fn extract_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());

    tally()
        .arg("--config")
        .arg(&config)
        .args(["extract"])
        .arg(dir.path().join("missing.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn categories_json_lists_builtin_table() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());

    let json = json_stdout(
        tally()
            .arg("--config")
            .arg(&config)
            .args(["categories", "--json"]),
    );

    let rows = json.as_array().unwrap();
    assert_eq!(rows[0]["name"], "Fuel");
    assert_eq!(rows[0]["index"], 0);
    assert_eq!(rows[1]["name"], "Parking");
}

#[test]
fn config_set_and_get() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());

    tally()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "extraction.scoring.amount.total_hint_bonus", "5.0"])
        .assert()
        .success();

    tally()
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "extraction.scoring.amount.total_hint_bonus"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5.0"));

    tally()
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "extraction.nope"])
        .assert()
        .failure();
}

#[test]
fn config_set_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    let before = fs::read_to_string(&config).unwrap();

    tally()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "output.prettty", "false"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));

    assert_eq!(fs::read_to_string(&config).unwrap(), before);
}

#[test]
fn config_init_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());

    tally()
        .args(["config", "init", "--output"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    let inputs = dir.path().join("in");
    let outputs = dir.path().join("out");
    fs::create_dir_all(&inputs).unwrap();
    fs::write(inputs.join("shell.txt"), FUEL_RECEIPT).unwrap();
    fs::write(inputs.join("blank.txt"), "").unwrap();
    fs::write(inputs.join("notes.md"), "Total 1.00").unwrap();

    let pattern = format!("{}/*", inputs.display());
    tally()
        .arg("--config")
        .arg(&config)
        .args(["batch", &pattern, "--summary", "--reference-date", "2024-06-01", "--output-dir"])
        .arg(&outputs)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"));

    let shell: Value =
        serde_json::from_str(&fs::read_to_string(outputs.join("shell.json")).unwrap()).unwrap();
    assert_eq!(shell["money"]["value"], 63.76);
    assert!(outputs.join("blank.json").exists());
    assert!(!outputs.join("notes.json").exists());

    let summary = fs::read_to_string(outputs.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,amount"));
    assert!(summary.contains("shell.txt,success,63.76,£63.76,2024-04-12,0,Fuel"));
}

#[test]
fn batch_without_matches_fails() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    let pattern = format!("{}/*.txt", dir.path().display());

    tally()
        .arg("--config")
        .arg(&config)
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}
