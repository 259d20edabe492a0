use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_asmdoc")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

// -- end-to-end generation --

#[test]
fn generates_page_with_anchors_and_links() {
    let dir = TempDir::new().unwrap();
    let out_path = dir.path().join("docs.html");

    cmd()
        .arg(fixture_path("example.json"))
        .arg(&out_path)
        .args(["-c", &fixture_path("example.xml")])
        .assert()
        .success();

    let output = std::fs::read_to_string(&out_path).unwrap();
    assert!(output.contains("<!DOCTYPE html>"));

    // Anchor for the Test type, used by the TOC.
    assert!(output.contains("id=\"texamplelibrarytest\""));
    assert!(output.contains("href=\"#texamplelibrarytest\""));

    // Methods table row links to the generic method's detail anchor.
    let map_anchor = "mexamplelibrarytestmap1systemstring";
    assert!(output.contains(&format!("href=\"#{map_anchor}\"")));
    assert!(output.contains(&format!("id=\"{map_anchor}\"")));

    // Exceptions section lists the declared exception type.
    assert!(output.contains("<h4>Exceptions</h4>"));
    assert!(output.contains("System.InvalidOperationException"));
    assert!(output.contains("Thrown on every call."));
}

#[test]
fn joins_comments_with_metadata() {
    let dir = TempDir::new().unwrap();
    let out_path = dir.path().join("docs.html");

    cmd()
        .arg(fixture_path("example.json"))
        .arg(&out_path)
        .args(["-c", &fixture_path("example.xml")])
        .assert()
        .success();

    let output = std::fs::read_to_string(&out_path).unwrap();
    assert!(output.contains("Adds two numbers."));
    assert!(output.contains("First operand."));
    assert!(output.contains("The sum of both operands."));
    // Generic type parameter docs land in the type-parameter table.
    assert!(output.contains("The element type."));
    // List content renders as a table.
    assert!(output.contains("Amortized constant"));
}

#[test]
fn compiler_generated_types_are_excluded() {
    let dir = TempDir::new().unwrap();
    let out_path = dir.path().join("docs.html");

    cmd()
        .arg(fixture_path("example.json"))
        .arg(&out_path)
        .assert()
        .success();

    let output = std::fs::read_to_string(&out_path).unwrap();
    assert!(!output.contains("DisplayClass"));
}

#[test]
fn works_without_comments_file() {
    let dir = TempDir::new().unwrap();
    let out_path = dir.path().join("docs.html");

    cmd()
        .arg(fixture_path("example.json"))
        .arg(&out_path)
        .assert()
        .success();

    let output = std::fs::read_to_string(&out_path).unwrap();
    // Undocumented members still render, with empty descriptions.
    assert!(output.contains("id=\"texamplelibrarytest\""));
    assert!(!output.contains("Adds two numbers."));
}

#[test]
fn readme_and_styles_are_included() {
    let dir = TempDir::new().unwrap();
    let out_path = dir.path().join("docs.html");

    cmd()
        .arg(fixture_path("example.json"))
        .arg(&out_path)
        .args(["-r", &fixture_path("readme.html")])
        .args(["-s", &fixture_path("styles.css")])
        .assert()
        .success();

    let output = std::fs::read_to_string(&out_path).unwrap();
    assert!(output.contains("About ExampleLibrary"));
    assert!(output.contains("Georgia, serif"));
}

#[test]
fn debug_flag_marks_missing_documentation() {
    let dir = TempDir::new().unwrap();
    let out_path = dir.path().join("docs.html");

    cmd()
        .arg(fixture_path("example.json"))
        .arg(&out_path)
        .arg("--debug")
        .assert()
        .success();

    let output = std::fs::read_to_string(&out_path).unwrap();
    assert!(output.contains("<!-- asmdoc: no documentation for T:ExampleLibrary.Test -->"));
}

// -- failure modes --

#[test]
fn missing_assembly_is_fatal() {
    let dir = TempDir::new().unwrap();

    cmd()
        .arg("/nonexistent/meta.json")
        .arg(dir.path().join("docs.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("assembly metadata not found"));
}

#[test]
fn supplied_missing_comments_path_is_fatal() {
    let dir = TempDir::new().unwrap();

    cmd()
        .arg(fixture_path("example.json"))
        .arg(dir.path().join("docs.html"))
        .args(["-c", "/nonexistent/comments.xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input file not found"));
}

#[test]
fn unknown_format_is_fatal() {
    let dir = TempDir::new().unwrap();

    cmd()
        .arg(fixture_path("example.json"))
        .arg(dir.path().join("docs.html"))
        .args(["-t", "pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn second_run_without_overwrite_fails_and_preserves_output() {
    let dir = TempDir::new().unwrap();
    let out_path = dir.path().join("docs.html");

    cmd()
        .arg(fixture_path("example.json"))
        .arg(&out_path)
        .args(["-c", &fixture_path("example.xml")])
        .assert()
        .success();
    let first = std::fs::read(&out_path).unwrap();

    cmd()
        .arg(fixture_path("example.json"))
        .arg(&out_path)
        .args(["-c", &fixture_path("example.xml")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    // Idempotent failure: the first run's output is untouched.
    let second = std::fs::read(&out_path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn overwrite_flag_permits_regeneration() {
    let dir = TempDir::new().unwrap();
    let out_path = dir.path().join("docs.html");

    cmd()
        .arg(fixture_path("example.json"))
        .arg(&out_path)
        .assert()
        .success();

    cmd()
        .arg(fixture_path("example.json"))
        .arg(&out_path)
        .arg("--overwrite")
        .assert()
        .success();
}

#[test]
fn help_exits_zero() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn format_flag_accepts_html_case_insensitively() {
    let dir = TempDir::new().unwrap();
    let out_path = dir.path().join("docs.html");

    cmd()
        .arg(fixture_path("example.json"))
        .arg(&out_path)
        .args(["-t", "Html"])
        .assert()
        .success();
}
