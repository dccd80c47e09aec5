//! Integration tests for the lectern CLI

#![allow(clippy::unwrap_used, clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

/// A `lectern` command isolated to a temporary config file and data directory
fn lectern(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.env("LECTERN_CONFIG", dir.path().join("lectern.toml"))
        .env("LECTERN_DATA_DIR", dir.path().join("data"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn courses_file(dir: &TempDir) -> String {
    fs::read_to_string(dir.path().join("data").join("courses.db")).unwrap()
}

#[test]
fn test_help_command() {
    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("course"))
        .stdout(predicate::str::contains("segment"))
        .stdout(predicate::str::contains("enroll"))
        .stdout(predicate::str::contains("content"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_command() {
    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lectern"));
}

#[test]
fn test_invalid_command() {
    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.arg("invalid")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_course_add_writes_block_with_intro() {
    let dir = TempDir::new().unwrap();
    lectern(&dir)
        .args([
            "course",
            "add",
            "c1",
            "--title",
            "Rust Basics",
            "--duration",
            "4 weeks",
            "--price",
            "49",
            "--certificate",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Course c1 created"));

    assert_eq!(
        courses_file(&dir),
        "COURSE|c1|Rust Basics|4 weeks|49||||0%|1\n\
         VideoSegment|Intro Video|10|https://example.com/intro\n\
         ENDCOURSE\n"
    );
}

#[test]
fn test_course_show_and_list() {
    let dir = TempDir::new().unwrap();
    lectern(&dir)
        .args(["course", "add", "c2", "--title", "Networking", "--no-intro"])
        .assert()
        .success();
    lectern(&dir)
        .args(["course", "add", "c1", "--title", "Rust Basics"])
        .assert()
        .success();

    lectern(&dir)
        .args(["course", "show", "c1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Course c1: Rust Basics"))
        .stdout(predicate::str::contains("[Video] Intro Video (10 min)"));

    let output = lectern(&dir)
        .args(["--format", "json", "course", "list"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let listed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        listed,
        serde_json::json!([
            { "id": "c1", "title": "Rust Basics" },
            { "id": "c2", "title": "Networking" },
        ])
    );
}

#[test]
fn test_course_show_unknown_fails() {
    let dir = TempDir::new().unwrap();
    lectern(&dir)
        .args(["course", "show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Course 'nope' not found"));
}

#[test]
fn test_course_add_rejects_delimiter() {
    let dir = TempDir::new().unwrap();
    lectern(&dir)
        .args(["course", "add", "c1", "--title", "Rust | Go"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'title' contains the '|' delimiter"));
    assert!(!dir.path().join("data").join("courses.db").exists());
}

#[test]
fn test_course_add_rejects_multi_line_title() {
    let dir = TempDir::new().unwrap();
    lectern(&dir)
        .args(["course", "add", "c1", "--title", "Rust\nBasics"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'title' contains a line break"));
    assert!(!dir.path().join("data").join("courses.db").exists());

    // The data files stay loadable for later commands
    lectern(&dir)
        .args(["course", "add", "c1", "--title", "Rust Basics"])
        .assert()
        .success();
    lectern(&dir).args(["course", "list"]).assert().success();
}

#[test]
fn test_enroll_rejects_line_breaks_in_ids() {
    let dir = TempDir::new().unwrap();
    lectern(&dir)
        .args(["enroll", "add", "s001\ns002", "c1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'student_id' contains a line break"));
    lectern(&dir)
        .args(["enroll", "add", "s001", "c1\r"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'course_id' contains a line break"));
    assert!(!dir.path().join("data").join("enrollments.db").exists());
}

#[test]
fn test_course_remove() {
    let dir = TempDir::new().unwrap();
    lectern(&dir)
        .args(["course", "add", "c1", "--title", "Rust Basics"])
        .assert()
        .success();
    lectern(&dir)
        .args(["course", "remove", "c1"])
        .assert()
        .success();
    assert_eq!(courses_file(&dir), "");

    lectern(&dir)
        .args(["course", "remove", "c1"])
        .assert()
        .failure();
}

#[test]
fn test_segment_add_appends_in_order() {
    let dir = TempDir::new().unwrap();
    lectern(&dir)
        .args(["course", "add", "c1", "--title", "Rust Basics", "--no-intro"])
        .assert()
        .success();
    lectern(&dir)
        .args(["segment", "add", "c1", "--title", "Reading", "--minutes", "20"])
        .assert()
        .success();
    lectern(&dir)
        .args([
            "segment",
            "add",
            "c1",
            "--title",
            "Final",
            "--minutes",
            "45",
            "--questions",
            "30",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("[Quiz] Final (45 min) - 30 questions"));

    assert_eq!(
        courses_file(&dir),
        "COURSE|c1|Rust Basics||0||||0%|0\n\
         Segment|Reading|20\n\
         QuizSegment|Final|45|30\n\
         ENDCOURSE\n"
    );
}

#[test]
fn test_segment_add_unknown_course_fails() {
    let dir = TempDir::new().unwrap();
    lectern(&dir)
        .args(["segment", "add", "ghost", "--title", "Reading", "--minutes", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Course 'ghost' not found"));
}

#[test]
fn test_segment_video_and_quiz_conflict() {
    let dir = TempDir::new().unwrap();
    lectern(&dir)
        .args([
            "segment",
            "add",
            "c1",
            "--title",
            "Both",
            "--minutes",
            "5",
            "--video-url",
            "https://example.com",
            "--questions",
            "3",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_enroll_and_check() {
    let dir = TempDir::new().unwrap();
    lectern(&dir)
        .args(["course", "add", "c1", "--title", "Rust Basics"])
        .assert()
        .success();
    lectern(&dir)
        .args(["enroll", "add", "s001", "c1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Enrolled s001 in c1"));

    assert_eq!(
        fs::read_to_string(dir.path().join("data").join("enrollments.db")).unwrap(),
        "s001|c1\n"
    );

    lectern(&dir)
        .args(["--format", "json", "enroll", "check", "s001", "c1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""enrolled":true"#));
    lectern(&dir)
        .args(["--format", "json", "enroll", "check", "s002", "c1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""enrolled":false"#));

    lectern(&dir)
        .args(["enroll", "list", "--student", "s001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rust Basics"));
}

#[test]
fn test_content_add_and_show() {
    let dir = TempDir::new().unwrap();
    lectern(&dir)
        .args(["content", "add", "book", "The Rust Programming Language"])
        .assert()
        .success();
    lectern(&dir)
        .args(["content", "add", "videos", "Ownership explained"])
        .assert()
        .success();

    let text = fs::read_to_string(dir.path().join("data").join("content.txt")).unwrap();
    assert_eq!(
        text,
        "#LECTURES\n#VIDEOS\nOwnership explained\n#NOTES\n#SLIDES\n\
         #BOOKS\nThe Rust Programming Language\n#ASSIGNMENTS\n#END\n"
    );

    lectern(&dir)
        .args(["content", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- The Rust Programming Language"));

    lectern(&dir)
        .args(["content", "add", "podcast", "Episode 1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown content kind"));
}

#[test]
fn test_data_check_reports_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("courses.db"), "COURSE|c1|Rust|4 weeks|free|||||0\n").unwrap();

    lectern(&dir)
        .args(["data", "check"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("price"))
        .stderr(predicate::str::contains("failed to load"));

    // Commands that need the store refuse to touch a corrupt file
    lectern(&dir)
        .args(["course", "list"])
        .assert()
        .failure();
    assert_eq!(
        fs::read_to_string(data_dir.join("courses.db")).unwrap(),
        "COURSE|c1|Rust|4 weeks|free|||||0\n"
    );
}

#[test]
fn test_config_get_set_reset() {
    let dir = TempDir::new().unwrap();
    lectern(&dir)
        .args(["config", "get", "courses_file"])
        .assert()
        .success()
        .stdout("courses.db\n");

    lectern(&dir)
        .args(["config", "set", "courses_file", "catalog.db"])
        .assert()
        .success();
    lectern(&dir)
        .args(["course", "add", "c1", "--title", "Rust Basics"])
        .assert()
        .success();
    assert!(dir.path().join("data").join("catalog.db").exists());

    lectern(&dir)
        .args(["config", "reset"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
    lectern(&dir)
        .args(["config", "reset", "--yes"])
        .assert()
        .success();
    lectern(&dir)
        .args(["config", "get", "courses_file"])
        .assert()
        .success()
        .stdout("courses.db\n");
}

#[test]
fn test_config_get_unknown_key() {
    let dir = TempDir::new().unwrap();
    lectern(&dir)
        .args(["config", "get", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key 'missing' not found"));

    lectern(&dir)
        .args(["--format", "json", "config", "get", "missing"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""found":false"#));
}
