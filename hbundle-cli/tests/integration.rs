use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

fn touch(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, content).expect("write");
}

/// Lay out a library the way the default config expects: headers under
/// `Source/`, bundle written next to it.
fn library(root: &Path) {
    touch(
        root,
        "Source/Strings/From/Basics.h",
        "#pragma once\n#include \"x.h\"\nint x;",
    );
    touch(root, "Source/Files/y.h", "#pragma once\nint y;");
    touch(root, "Source/Files/All.h", "#include \"y.h\"");
    for dir in ["Execute", "Http", "SharedMemory", "DLLs"] {
        fs::create_dir_all(root.join("Source").join(dir)).expect("mkdir");
    }
}

fn hbundle(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hbundle"))
        .args(args)
        .current_dir(cwd)
        .env_remove("HBUNDLE_CONFIG")
        .output()
        .expect("run hbundle")
}

#[test]
fn bundle_with_defaults_writes_parent_header() {
    let tmp = tempdir().expect("tempdir");
    library(tmp.path());

    let output = hbundle(&tmp.path().join("Source"), &["bundle"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Strings\\From\\Basics.h\nFiles\\y.h\n"), "stdout:\n{stdout}");

    let merged = fs::read_to_string(tmp.path().join("JustAll.h")).expect("read bundle");
    assert_eq!(
        merged,
        "#pragma once\n\n\
         \n\n// ::Strings\\From\\Basics.h::\n\n// #pragma once\n// #include \"x.h\"\nint x;\n\n\
         \n\n// ::Files\\y.h::\n\n// #pragma once\nint y;\n\n"
    );
}

#[test]
fn stdout_mode_keeps_progress_on_stderr() {
    let tmp = tempdir().expect("tempdir");
    library(tmp.path());

    let output = hbundle(&tmp.path().join("Source"), &["bundle", "--stdout"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    let stderr = String::from_utf8(output.stderr).expect("utf8 stderr");
    assert!(stdout.starts_with("#pragma once\n\n"));
    assert!(stderr.contains("Files\\y.h"));
    assert!(!tmp.path().join("JustAll.h").exists());
}

#[test]
fn list_json_reports_order_and_seed() {
    let tmp = tempdir().expect("tempdir");
    library(tmp.path());

    let output = hbundle(
        &tmp.path().join("Source"),
        &["list", "--json", "--separator", "/"],
    );
    assert!(output.status.success());

    let parsed: Value = serde_json::from_slice(&output.stdout).expect("parse json output");
    let arr = parsed.as_array().expect("list --json returns a JSON array");
    let labels: Vec<&str> = arr
        .iter()
        .filter_map(|entry| entry.get("label").and_then(Value::as_str))
        .collect();

    assert_eq!(labels, vec!["Strings/From/Basics.h", "Files/y.h"]);
    assert_eq!(arr[0].get("seed").and_then(Value::as_bool), Some(true));
}

#[test]
fn missing_seed_exits_with_error() {
    let tmp = tempdir().expect("tempdir");
    touch(tmp.path(), "include/a.h", "int a;");

    let output = hbundle(
        tmp.path(),
        &["bundle", "-q", "-d", "include", "-o", "out.h"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("error:"), "stderr: {stderr}");
    assert!(stderr.contains("Basics.h"), "stderr: {stderr}");
}

#[test]
fn config_file_from_environment_is_used() {
    let tmp = tempdir().expect("tempdir");
    touch(tmp.path(), "include/core.h", "#pragma once\nint core;");
    touch(tmp.path(), "include/extra.h", "int extra;");
    touch(
        tmp.path(),
        "bundle.json",
        r#"{ "directories": ["include"], "seed": "include/core.h", "output": "dist.h", "sorted": true }"#,
    );

    let output = Command::new(env!("CARGO_BIN_EXE_hbundle"))
        .args(["bundle", "-q"])
        .current_dir(tmp.path())
        .env("HBUNDLE_CONFIG", tmp.path().join("bundle.json"))
        .output()
        .expect("run hbundle");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let merged = fs::read_to_string(tmp.path().join("dist.h")).expect("read bundle");
    let core = merged.find("// ::include\\core.h::").expect("core section");
    let extra = merged.find("// ::include\\extra.h::").expect("extra section");
    assert!(core < extra);
}

#[test]
fn list_fails_when_seed_was_not_collected() {
    let tmp = tempdir().expect("tempdir");
    touch(tmp.path(), "include/a.h", "int a;");

    let output = hbundle(tmp.path(), &["list", "-d", "include", "--json"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("no content collected for Strings/From/Basics.h"),
        "stderr: {stderr}"
    );
}
