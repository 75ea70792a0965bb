use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::json;

fn write_schema(dir: &Path) -> std::path::PathBuf {
    let doc = json!({
        "tables": [{ "name": "book", "columns": [{ "name": "id", "type": { "sql_type": "INT" } }] }]
    });
    let path = dir.join("schema.json");
    fs::write(&path, doc.to_string()).unwrap();
    path
}

fn write_config(dir: &Path, text: &str) -> std::path::PathBuf {
    let path = dir.join("codegen.toml");
    fs::write(&path, text).unwrap();
    path
}

fn codegen(dir: &Path, args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_schema-codegen"));
    command.current_dir(dir).env_clear().args(args);
    for (key, value) in env {
        command.env(key, value);
    }
    command.output().unwrap()
}

#[test]
fn invalid_config_file_is_reported_on_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_schema(dir.path());
    let config = write_config(dir.path(), "[general]\ntarget_package = \"com..bad\"\n");

    let output = codegen(
        dir.path(),
        &["--schema", schema.to_str().unwrap(), "--config", config.to_str().unwrap()],
        &[],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("general.target_package"), "{stderr}");
}

#[test]
fn unparsable_environment_value_is_reported_on_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_schema(dir.path());

    let output = codegen(
        dir.path(),
        &["--schema", schema.to_str().unwrap()],
        &[("CODEGEN_GENERATE__POJOS", "notabool")],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(!output.stderr.is_empty());
}

#[test]
fn package_flag_overrides_an_invalid_file_value() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_schema(dir.path());
    let config = write_config(dir.path(), "[general]\ntarget_package = \"com..bad\"\n");
    let out = dir.path().join("out");

    let output = codegen(
        dir.path(),
        &[
            "--schema",
            schema.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
            "--package",
            "com.good",
            "--out",
            out.to_str().unwrap(),
            "--dry-run",
        ],
        &[],
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "{stderr}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let expected = out.join("com/good/tables/pojos/Book.kt");
    assert!(stdout.contains(expected.to_str().unwrap()), "{stdout}");
    assert!(!expected.exists());
}
