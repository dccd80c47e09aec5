//! Course catalog records and their line-oriented file formats.
//!
//! This crate provides the data model behind the `lectern` tool:
//!
//! - **Segment**: one of three record shapes (generic, video, quiz), each
//!   encoded as a single `|`-separated line tagged with its variant
//! - **Course**: scalar fields plus an ordered list of segments, encoded as a
//!   `COURSE|...` header, segment lines and an `ENDCOURSE` terminator
//! - **CourseStore**: courses keyed by id, saved to and loaded from a file of
//!   concatenated course blocks
//! - **EnrollmentLedger** and **ContentLibrary**: the two auxiliary files
//!   kept next to the courses file
//!
//! # Example
//!
//! ```
//! use lectern_catalog::{Course, CourseStore, Segment};
//!
//! let mut store = CourseStore::new();
//! store.add_or_replace(
//!     Course::new("rust-101")
//!         .with_title("Rust Basics")
//!         .with_price(49)
//!         .with_segment(Segment::video("Intro Video", 10, "https://example.com/intro")),
//! );
//!
//! store.update("rust-101", |course| course.add_segment(Segment::quiz("Checkpoint", 15, 8)));
//!
//! let mut buffer = Vec::new();
//! store.write_to(&mut buffer).expect("Test operation should succeed");
//! let text = String::from_utf8(buffer).expect("Test operation should succeed");
//! assert!(text.starts_with("COURSE|rust-101|Rust Basics||49|||||0\n"));
//! assert!(text.ends_with("QuizSegment|Checkpoint|15|8\nENDCOURSE\n"));
//! ```
//!
//! # Format limitations
//!
//! Fields are written verbatim with no escaping. Text containing `|` does not
//! survive a round trip, and neither does text spanning lines; use
//! [`Course::validate`] to reject both up front.

#![forbid(unsafe_code)]

pub mod content;
pub mod course;
pub mod enrollment;
pub mod error;
mod reader;
pub mod segment;
pub mod store;
mod writer;

pub use content::{ContentKind, ContentLibrary};
pub use course::{COURSE_PREFIX, COURSE_TERMINATOR, Course};
pub use enrollment::{Enrollment, EnrollmentLedger};
pub use error::{CatalogError, Result, SegmentError, ensure_no_delimiter};
pub use reader::{CourseReader, parse};
pub use segment::{FIELD_SEPARATOR, Segment, SegmentKind};
pub use store::{CourseStore, CourseSummary, StoreSummary};
pub use writer::{CourseWriter, format};
