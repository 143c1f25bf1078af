//! Integration tests for mutatree CLI

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::{tempdir, TempDir};

fn run_mutatree(args: &[&str], stdin: Option<&str>) -> (String, String, bool) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_mutatree"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute command");

    {
        let mut pipe = child.stdin.take().expect("stdin is piped");
        if let Some(input) = stdin {
            pipe.write_all(input.as_bytes()).unwrap();
        }
    }

    let output = child.wait_with_output().expect("Failed to wait for command");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (stdout, stderr, output.status.success())
}

/// Project with pkg/A.java, pkg/B.java and other/C.java under src/
fn create_project() -> (TempDir, PathBuf, PathBuf) {
    let temp = tempdir().unwrap();
    let source = temp.path().join("src");
    fs::create_dir_all(source.join("pkg")).unwrap();
    fs::create_dir_all(source.join("other")).unwrap();
    fs::write(source.join("pkg/A.java"), "class A {}").unwrap();
    fs::write(source.join("pkg/B.java"), "class B {}").unwrap();
    fs::write(source.join("other/C.java"), "class C {}").unwrap();
    let build = temp.path().join("build");
    (temp, source, build)
}

fn s(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_cli_help() {
    let (stdout, _, success) = run_mutatree(&["--help"], None);

    assert!(success);
    assert!(stdout.contains("mutatree"));
    assert!(stdout.contains("list"));
    assert!(stdout.contains("write"));
}

#[test]
fn test_cli_version() {
    let (stdout, _, success) = run_mutatree(&["--version"], None);

    assert!(success);
    assert!(stdout.contains("mutatree"));
}

#[test]
fn test_list_all_files() {
    let (_temp, source, build) = create_project();

    let (stdout, stderr, success) =
        run_mutatree(&["list", s(&source), "--build", s(&build)], None);

    assert!(success, "{stderr}");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(stderr.contains("3 source files"));
    assert!(build.join("mutatree-results").is_dir());
}

#[test]
fn test_list_blacklist() {
    let (_temp, source, build) = create_project();

    let (stdout, _, success) = run_mutatree(
        &["list", s(&source), "--build", s(&build), "-x", "pkg"],
        None,
    );

    assert!(success);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec![Path::new("other").join("C.java").to_str().unwrap()]);
}

#[test]
fn test_list_whitelist_json() {
    let (_temp, source, build) = create_project();

    let (stdout, _, success) = run_mutatree(
        &[
            "list",
            s(&source),
            "--build",
            s(&build),
            "-w",
            "pkg",
            "--output",
            "json",
        ],
        None,
    );

    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert_eq!(parsed["files"].as_array().unwrap().len(), 2);
    assert!(parsed.get("source_root").is_some());
    assert!(parsed["output_root"]
        .as_str()
        .unwrap()
        .ends_with("mutatree-results"));
}

#[test]
fn test_list_missing_source() {
    let temp = tempdir().unwrap();
    let missing = temp.path().join("missing");

    let (_, stderr, success) = run_mutatree(&["list", s(&missing)], None);

    assert!(!success);
    assert!(stderr.contains("Error:"));
}

#[test]
fn test_write_from_stdin_and_file() {
    let (temp, source, build) = create_project();
    let original = source.join("other/C.java");

    let (stdout, stderr, success) = run_mutatree(
        &["write", s(&source), "--build", s(&build), s(&original)],
        Some("X"),
    );
    assert!(success, "{stderr}");
    assert_eq!(
        stdout.trim(),
        Path::new("other/C.java/1.java").to_str().unwrap()
    );

    let mutant = temp.path().join("mutant.java");
    fs::write(&mutant, "Y").unwrap();
    let (stdout, _, success) = run_mutatree(
        &["write", s(&source), "--build", s(&build), s(&original), s(&mutant)],
        None,
    );
    assert!(success);
    assert!(stdout.trim().ends_with("2.java"));

    let entry = build.join("mutatree-results/other/C.java");
    assert_eq!(
        fs::read_to_string(entry.join("original.java")).unwrap(),
        "class C {}"
    );
    assert_eq!(fs::read_to_string(entry.join("1.java")).unwrap(), "X");
    assert_eq!(fs::read_to_string(entry.join("2.java")).unwrap(), "Y");
}

#[test]
fn test_write_with_density_json() {
    let (temp, source, build) = create_project();
    let original = source.join("pkg/A.java");
    let density = temp.path().join("density.csv");
    fs::write(&density, "4,1\n2,3\n").unwrap();

    let (stdout, stderr, success) = run_mutatree(
        &[
            "write",
            s(&source),
            "--build",
            s(&build),
            s(&original),
            "--density",
            s(&density),
            "--output",
            "json",
        ],
        Some("class A { }"),
    );

    assert!(success, "{stderr}");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert!(parsed["variant"].as_str().unwrap().ends_with("1.java"));
    assert!(parsed["entry"].as_str().unwrap().ends_with("A.java"));
    assert_eq!(
        fs::read_to_string(build.join("mutatree-results/pkg/A.java/density.csv")).unwrap(),
        "2,3\n4,1\n"
    );
}

#[test]
fn test_write_verbose_traces_generated_file() {
    let (_temp, source, build) = create_project();
    let original = source.join("pkg/B.java");

    let (_, stderr, success) = run_mutatree(
        &["write", s(&source), "--build", s(&build), s(&original), "-v"],
        Some("class B { }"),
    );

    assert!(success);
    assert!(stderr.contains("generated file"));
}

#[test]
fn test_write_original_outside_source() {
    let (temp, source, build) = create_project();
    let stray = temp.path().join("Stray.java");
    fs::write(&stray, "class Stray {}").unwrap();

    let (_, stderr, success) = run_mutatree(
        &["write", s(&source), "--build", s(&build), s(&stray)],
        Some("x"),
    );

    assert!(!success);
    assert!(stderr.contains("is not under source root"));
}

#[cfg(unix)]
#[test]
fn test_list_and_write_agree_on_linked_directories() {
    let (temp, source, build) = create_project();
    let linked = temp.path().join("elsewhere");
    fs::create_dir_all(&linked).unwrap();
    fs::write(linked.join("X.java"), "class X {}").unwrap();
    std::os::unix::fs::symlink(&linked, source.join("link")).unwrap();

    let (stdout, _, success) = run_mutatree(&["list", s(&source)], None);
    assert!(success);
    let listed = Path::new("link/X.java");
    assert!(stdout.lines().any(|line| Path::new(line.trim()) == listed));

    let (stdout, stderr, success) = run_mutatree(
        &["write", s(&source), "--build", s(&build), s(&source.join("link/X.java"))],
        Some("class X { }"),
    );
    assert!(success, "{stderr}");
    assert_eq!(Path::new(stdout.trim()), listed.join("1.java"));
    assert_eq!(
        fs::read_to_string(build.join("mutatree-results/link/X.java/original.java")).unwrap(),
        "class X {}"
    );
}
