//! Integration tests for saving and loading course stores through real files

#![allow(clippy::expect_used, clippy::unwrap_used)]

use lectern_catalog::{CatalogError, Course, CourseStore, Segment, SegmentError};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn sample_store() -> CourseStore {
    let mut store = CourseStore::new();
    store.add_or_replace(
        Course::new("c1")
            .with_title("Rust Basics")
            .with_duration_label("4 weeks")
            .with_price(49)
            .with_offer("Launch discount")
            .with_topic("Programming")
            .with_outline("Ownership, borrowing, traits")
            .with_progress_label("0%")
            .with_certificate(true)
            .with_segment(Segment::video(
                "Intro Video",
                10,
                "https://example.com/intro",
            ))
            .with_segment(Segment::quiz("Checkpoint", 15, 8))
            .with_segment(Segment::generic("Reading", 30)),
    );
    store.add_or_replace(
        Course::new("c2")
            .with_title("Async Rust")
            .with_duration_label("2 weeks")
            .with_price(0)
            .with_progress_label("50%"),
    );
    store
}

#[test]
fn test_save_then_load_restores_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("courses.db");

    let store = sample_store();
    store.save_all(&path).expect("Test operation should succeed");

    let loaded = CourseStore::from_file(&path).expect("Test operation should succeed");
    assert_eq!(loaded, store);
}

#[test]
fn test_saved_file_layout() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("courses.db");
    sample_store()
        .save_all(&path)
        .expect("Test operation should succeed");

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "COURSE|c1|Rust Basics|4 weeks|49|Launch discount|Programming|Ownership, borrowing, traits|0%|1
VideoSegment|Intro Video|10|https://example.com/intro
QuizSegment|Checkpoint|15|8
Segment|Reading|30
ENDCOURSE
COURSE|c2|Async Rust|2 weeks|0||||50%|0
ENDCOURSE
"
    );
}

#[test]
fn test_save_truncates_previous_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("courses.db");
    fs::write(&path, "x".repeat(4096)).unwrap();

    let store: CourseStore = std::iter::once(Course::new("only")).collect();
    store.save_all(&path).expect("Test operation should succeed");

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text, "COURSE|only|||0|||||0\nENDCOURSE\n");
}

#[test]
fn test_load_later_block_wins() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("courses.db");
    fs::write(
        &path,
        "COURSE|c9|Original|1 week|10||||0%|0
Segment|Old|5
ENDCOURSE
COURSE|c9|Revised|1 week|10||||0%|0
ENDCOURSE
",
    )
    .unwrap();

    let store = CourseStore::from_file(&path).expect("Test operation should succeed");
    let course = store.get("c9").expect("Test operation should succeed");
    assert_eq!(course.title(), "Revised");
    assert!(course.segments().is_empty());
}

#[test]
fn test_load_tolerates_missing_terminator_at_end() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("courses.db");
    fs::write(
        &path,
        "COURSE|a|A|1 week|0||||0%|0
ENDCOURSE
COURSE|b|B|1 week|0||||0%|0
Segment|Part one|10
QuizSegment|Part two|5|3",
    )
    .unwrap();

    let store = CourseStore::from_file(&path).expect("Test operation should succeed");
    assert_eq!(store.len(), 2);
    assert_eq!(
        store.get("b").unwrap().segments(),
        &[
            Segment::generic("Part one", 10),
            Segment::quiz("Part two", 5, 3)
        ]
    );
}

#[test]
fn test_load_permissive_segment_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("courses.db");
    fs::write(
        &path,
        "COURSE|a|A|1 week|0||||0%|0
Foo|IntroTitle|15
VideoSegment|No url|4
too|short
ENDCOURSE
",
    )
    .unwrap();

    let store = CourseStore::from_file(&path).expect("Test operation should succeed");
    assert_eq!(
        store.get("a").unwrap().segments(),
        &[
            Segment::generic("IntroTitle", 15),
            Segment::generic("No url", 4)
        ]
    );
}

#[test]
fn test_load_aborts_on_bad_duration_and_keeps_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("courses.db");
    fs::write(
        &path,
        "COURSE|a|A|1 week|0||||0%|0
Segment|Intro|notanumber
ENDCOURSE
",
    )
    .unwrap();

    let mut store = sample_store();
    let result = store.load_all(&path);
    assert!(matches!(
        result,
        Err(CatalogError::Segment(SegmentError::InvalidInteger { .. }))
    ));
    assert_eq!(store, sample_store());
}

#[test]
fn test_load_aborts_on_bad_price() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("courses.db");
    fs::write(&path, "COURSE|a|A|1 week|cheap||||0%|0\nENDCOURSE\n").unwrap();

    let result = CourseStore::from_file(&path);
    assert!(matches!(
        result,
        Err(CatalogError::InvalidInteger { field: "price", .. })
    ));
}

#[test]
fn test_load_missing_file_reports_io_error() {
    let dir = TempDir::new().unwrap();
    let result = CourseStore::from_file(&dir.path().join("absent.db"));
    match result {
        Err(CatalogError::Io { path, .. }) => assert!(path.ends_with("absent.db")),
        other => panic!("expected I/O error, got {other:?}"),
    }
}

#[test]
fn test_loaded_course_accepts_new_segments() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("courses.db");
    sample_store().save_all(&path).unwrap();

    let mut store = CourseStore::from_file(&path).unwrap();
    store
        .update("c2", |course| {
            course.add_segment(Segment::video("Executors", 25, "https://example.com/exec"));
        })
        .expect("Test operation should succeed");
    store.save_all(&path).unwrap();

    let reloaded = CourseStore::from_file(&path).unwrap();
    assert_eq!(
        reloaded.get("c2").unwrap().segments(),
        &[Segment::video(
            "Executors",
            25,
            "https://example.com/exec"
        )]
    );
}
