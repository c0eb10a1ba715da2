//! End-to-end tests of the `figspec` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

mod helpers;
use helpers::*;

const SPEC: &str = "\
type: bar
xfield: bytes
yfield: real_time
output_file: fig
series:
  - input_file: b.json
  - input_file: a.json
";

fn figspec(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_figspec"))
        .current_dir(cwd)
        .args(args)
        .output()
        .expect("run figspec")
}

fn spec_workspace() -> Workspace {
    let ws = Workspace::new();
    fs::write(ws.root().join("fig.yaml"), SPEC).unwrap();
    ws.file("a.json");
    ws.file("b.json");
    ws
}

#[test]
fn deps_searches_the_spec_directory_by_absolute_path() {
    let ws = spec_workspace();
    let out = figspec(ws.root(), &["deps", "fig.d", "fig.yaml", "fig.pdf"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let root = fs::canonicalize(ws.root()).unwrap();
    let rule = fs::read_to_string(ws.root().join("fig.d")).unwrap();
    assert_eq!(
        rule,
        format!(
            "fig.pdf:  \\\n\t{} \\\n\t{}",
            root.join("a.json").display(),
            root.join("b.json").display()
        )
    );
}

#[test]
fn deps_prefers_include_directories() {
    let ws = spec_workspace();
    ws.file("data/a.json");
    ws.file("data/b.json");

    let out = figspec(
        ws.root(),
        &["--include", "data", "deps", "fig.d", "fig.yaml", "fig.pdf"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let data = fs::canonicalize(ws.root().join("data")).unwrap();
    let rule = fs::read_to_string(ws.root().join("fig.d")).unwrap();
    assert!(rule.contains(&data.join("a.json").display().to_string()));
    assert!(rule.contains(&data.join("b.json").display().to_string()));
}

#[test]
fn deps_failure_writes_nothing() {
    let ws = spec_workspace();
    fs::remove_file(ws.root().join("a.json")).unwrap();

    let out = figspec(ws.root(), &["deps", "fig.d", "fig.yaml", "fig.pdf"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("L001"));
    assert!(!ws.root().join("fig.d").exists());
}

#[test]
fn resolve_reports_absolute_inputs_and_outputs() {
    let ws = spec_workspace();
    let out = figspec(ws.root(), &["resolve", "fig.yaml"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let root = fs::canonicalize(ws.root()).unwrap();
    let fig: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(
        fig["outputs"][0],
        serde_json::json!(root.join("fig.pdf").display().to_string())
    );
    assert_eq!(
        fig["plots"][0]["series"][0]["input_file"],
        serde_json::json!(root.join("b.json").display().to_string())
    );
}

#[test]
fn invalid_spec_lists_every_violation() {
    let ws = Workspace::new();
    fs::write(ws.root().join("bad.yaml"), "series: []\nsize: [0, 1]\n").unwrap();

    let out = figspec(ws.root(), &["check", "bad.yaml"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("V004"), "{}", stderr);
    assert!(stderr.contains("V009"), "{}", stderr);
}
