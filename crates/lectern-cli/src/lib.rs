//! Lectern client library
//!
//! This library provides the command definitions and handlers for the
//! `lectern` CLI tool.

pub mod commands;
pub mod config_manager;
pub mod output;
pub mod session;

// Re-export command handlers
pub use crate::commands::{
    config::handle as handle_config, content::handle as handle_content,
    course::handle as handle_course, data::handle as handle_data,
    enroll::handle as handle_enroll, segment::handle as handle_segment,
};

use clap::{Args, Subcommand};
use lectern_catalog::ContentKind;

use crate::output::OutputStyle;
use crate::session::DataPaths;

#[derive(Subcommand)]
pub enum CourseCommands {
    /// Create a course, replacing any course with the same id
    Add(CourseArgs),

    /// Show a course and its segments
    Show {
        /// Course id
        id: String,
    },

    /// List all courses by id
    List,

    /// Show course and segment counts
    Summary,

    /// Remove a course
    Remove {
        /// Course id
        id: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CourseArgs {
    /// Course id
    pub id: String,

    /// Course title
    #[arg(long)]
    pub title: String,

    /// Duration label (e.g., "4 weeks")
    #[arg(long, default_value = "")]
    pub duration: String,

    /// Price
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub price: i32,

    /// Offer text
    #[arg(long, default_value = "")]
    pub offer: String,

    /// Topic
    #[arg(long, default_value = "")]
    pub topic: String,

    /// Outline
    #[arg(long, default_value = "")]
    pub outline: String,

    /// Progress label (e.g., "0%")
    #[arg(long, default_value = "0%")]
    pub progress: String,

    /// A certificate is available on completion
    #[arg(long)]
    pub certificate: bool,

    /// Do not seed the course with the default intro video
    #[arg(long)]
    pub no_intro: bool,
}

#[derive(Subcommand)]
pub enum SegmentCommands {
    /// Append a segment to an existing course
    Add {
        /// Course id
        course: String,

        /// Segment title
        #[arg(long)]
        title: String,

        /// Duration in minutes
        #[arg(long, allow_negative_numbers = true)]
        minutes: i32,

        /// Make this a video segment with the given URL
        #[arg(long, conflicts_with = "questions")]
        video_url: Option<String>,

        /// Make this a quiz segment with the given number of questions
        #[arg(long, allow_negative_numbers = true)]
        questions: Option<i32>,
    },
}

#[derive(Subcommand)]
pub enum EnrollCommands {
    /// Enroll a student in a course
    Add {
        /// Student id
        student: String,

        /// Course id
        course: String,
    },

    /// List enrollments
    List {
        /// Only show enrollments for this student
        #[arg(short, long)]
        student: Option<String>,
    },

    /// Check whether a student is enrolled in a course
    Check {
        /// Student id
        student: String,

        /// Course id
        course: String,
    },
}

#[derive(Subcommand)]
pub enum ContentCommands {
    /// Add an item to a content section
    Add {
        /// Section: lecture, video, note, slide, book or assignment
        #[arg(value_parser = parse_content_kind)]
        kind: ContentKind,

        /// Item text
        item: String,
    },

    /// Show all content sections
    Show,
}

fn parse_content_kind(s: &str) -> Result<ContentKind, String> {
    s.parse()
}

#[derive(Subcommand)]
pub enum DataCommands {
    /// Report whether each data file loads
    Check,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Reset configuration to defaults
    Reset {
        /// Confirm reset
        #[arg(short, long)]
        yes: bool,
    },
}

/// Output format options for the CLI
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text output
    Text,
    /// JSON output
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

/// Context for command execution
#[derive(Clone, Debug)]
pub struct CommandContext {
    /// Output format
    pub format: OutputFormat,
    /// Text styling
    pub style: OutputStyle,
    /// Data files the command reads and writes
    pub paths: DataPaths,
}

impl CommandContext {
    pub fn new(format: OutputFormat, color: bool, paths: DataPaths) -> Self {
        let style = if color {
            OutputStyle::new()
        } else {
            OutputStyle::new().no_color()
        };
        Self {
            format,
            style,
            paths,
        }
    }

    /// Whether output should be JSON rather than text
    pub const fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json | OutputFormat::JsonPretty)
    }
}
