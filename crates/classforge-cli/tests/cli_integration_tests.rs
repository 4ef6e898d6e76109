//! Integration tests for the classforge binary.
//!
//! Runs generate, check, compile and inspect end to end on temporary files.

#![allow(non_snake_case)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn classforge(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_classforge"))
        .args(args)
        .env_remove("CLASSFORGE_LOG")
        .output()
        .unwrap()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn write_sample(temp_dir: &TempDir) -> PathBuf {
    let path = temp_dir.path().join("sample.json");
    fs::write(&path, r#"{"user_name": "Ann", "age": 30, "items": [{"id": 1}]}"#).unwrap();
    path
}

#[test]
fn generate___to_stdout___prints_classes() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_sample(&temp_dir);

    let output = classforge(&["generate", "-i", path_str(&input)]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("public class Root"));
    assert!(stdout.contains("public class Item"));
}

#[test]
fn generate___invalid_json___fails() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("bad.json");
    fs::write(&input, "{not json").unwrap();

    let output = classforge(&["generate", "-i", path_str(&input)]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid input"));
}

#[test]
fn generate_check_compile_inspect___round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_sample(&temp_dir);
    let source = temp_dir.path().join("src/Models.cs");
    let module = temp_dir.path().join("out/Models.dll");

    let generated = classforge(&[
        "generate",
        "-i",
        path_str(&input),
        "-o",
        path_str(&source),
        "--json-library",
        "Newtonsoft.Json",
        "--namespace",
        "Acme.Models",
    ]);
    assert!(generated.status.success());

    let checked = classforge(&[
        "check",
        "-s",
        path_str(&source),
        "--json-library",
        "Newtonsoft.Json",
    ]);
    assert!(checked.status.success(), "{}", String::from_utf8_lossy(&checked.stderr));

    let compiled = classforge(&[
        "compile",
        "-s",
        path_str(&source),
        "-o",
        path_str(&module),
        "--json-library",
        "Newtonsoft.Json",
        "--namespace",
        "Acme.Models",
        "--debug",
    ]);
    assert!(compiled.status.success(), "{}", String::from_utf8_lossy(&compiled.stderr));
    assert!(module.exists());

    let inspected = classforge(&["inspect", "-m", path_str(&module)]);
    assert!(inspected.status.success());
    let stdout = String::from_utf8(inspected.stdout).unwrap();
    assert!(stdout.contains("Module: Acme.Models 1.0.0.0"));
    assert!(stdout.contains("class Acme.Models.Item"));
    assert!(stdout.contains("Embedded source: yes"));
}

#[test]
fn check___undeclared_type___exit_failure_with_report() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("Broken.cs");
    fs::write(
        &source,
        "namespace M\n{\n    public class Root\n    {\n        public Person Owner { get; set; }\n    }\n}\n",
    )
    .unwrap();

    let output = classforge(&["check", "-s", path_str(&source)]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Compilation errors:"));
    assert!(stderr.contains("CS0246"));
}

#[test]
fn compile___undeclared_type___no_module() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("Broken.cs");
    let module = temp_dir.path().join("Broken.dll");
    fs::write(&source, "namespace M { public class Root { public Person Owner; } }").unwrap();

    let output = classforge(&["compile", "-s", path_str(&source), "-o", path_str(&module)]);

    assert!(!output.status.success());
    assert!(!module.exists());
}

#[test]
fn compile___extra_reference___type_resolves() {
    let temp_dir = TempDir::new().unwrap();
    let reference = temp_dir.path().join("acme.toml");
    fs::write(
        &reference,
        "name = \"Acme.Contracts\"\nversion = \"2.0.0.0\"\n\n[[namespace]]\nname = \"Acme.Contracts\"\ntypes = [\"Money\"]\n",
    )
    .unwrap();
    let source = temp_dir.path().join("Order.cs");
    fs::write(
        &source,
        "using Acme.Contracts;\nnamespace M\n{\n    public class Order\n    {\n        public Money Total { get; set; }\n    }\n}\n",
    )
    .unwrap();
    let module = temp_dir.path().join("Order.dll");

    let without = classforge(&["check", "-s", path_str(&source)]);
    let with = classforge(&[
        "compile",
        "-s",
        path_str(&source),
        "-o",
        path_str(&module),
        "-r",
        path_str(&reference),
    ]);

    assert!(!without.status.success());
    assert!(with.status.success(), "{}", String::from_utf8_lossy(&with.stderr));
    let inspected = classforge(&["inspect", "-m", path_str(&module), "--json"]);
    let stdout = String::from_utf8(inspected.stdout).unwrap();
    assert!(stdout.contains("Acme.Contracts.Money"));
}

#[test]
fn inspect___missing_module___fails() {
    let output = classforge(&["inspect", "-m", "/nonexistent/Models.dll"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to open module"));
}
