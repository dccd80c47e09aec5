//! Course segments and their single-line codec.
//!
//! A segment is one of three fixed record shapes, written as one `|`-joined
//! line whose first field is the variant tag:
//!
//! ```text
//! Segment|<title>|<minutes>
//! VideoSegment|<title>|<minutes>|<url>
//! QuizSegment|<title>|<minutes>|<questions>
//! ```
//!
//! Decoding is permissive about shape and strict about numbers: an unknown
//! tag, or a Video/Quiz line missing its extra field, decodes as a generic
//! segment, while a non-integer duration or question count is an error.

use crate::error::{CatalogError, SegmentError, ensure_no_delimiter};
use std::fmt;
use std::str::FromStr;

/// Field separator shared by every line-oriented catalog format
pub const FIELD_SEPARATOR: char = '|';

/// The closed set of segment variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SegmentKind {
    /// Plain titled block of material
    Generic,
    /// Segment backed by a video URL
    Video,
    /// Segment carrying a quiz
    Quiz,
}

impl SegmentKind {
    /// Wire tag written as the first field of a segment line
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Generic => "Segment",
            Self::Video => "VideoSegment",
            Self::Quiz => "QuizSegment",
        }
    }

    /// Look up a variant by its exact wire tag
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Segment" => Some(Self::Generic),
            "VideoSegment" => Some(Self::Video),
            "QuizSegment" => Some(Self::Quiz),
            _ => None,
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Generic => "Segment",
            Self::Video => "Video",
            Self::Quiz => "Quiz",
        };
        f.write_str(label)
    }
}

/// A unit of course material.
///
/// Segments have no identity; a course owns them by value, in order, and
/// may hold duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Segment {
    /// Title and duration only
    Generic {
        /// Segment title
        title: String,
        /// Length in minutes
        duration_minutes: i32,
    },
    /// Generic fields plus a video location
    Video {
        /// Segment title
        title: String,
        /// Length in minutes
        duration_minutes: i32,
        /// Where the video lives
        video_url: String,
    },
    /// Generic fields plus the number of quiz questions
    Quiz {
        /// Segment title
        title: String,
        /// Length in minutes
        duration_minutes: i32,
        /// Number of questions in the quiz
        question_count: i32,
    },
}

impl Segment {
    /// Create a generic segment
    pub fn generic(title: impl Into<String>, duration_minutes: i32) -> Self {
        Self::Generic {
            title: title.into(),
            duration_minutes,
        }
    }

    /// Create a video segment
    pub fn video(
        title: impl Into<String>,
        duration_minutes: i32,
        video_url: impl Into<String>,
    ) -> Self {
        Self::Video {
            title: title.into(),
            duration_minutes,
            video_url: video_url.into(),
        }
    }

    /// Create a quiz segment
    pub fn quiz(title: impl Into<String>, duration_minutes: i32, question_count: i32) -> Self {
        Self::Quiz {
            title: title.into(),
            duration_minutes,
            question_count,
        }
    }

    /// Variant of this segment
    #[must_use]
    pub const fn kind(&self) -> SegmentKind {
        match self {
            Self::Generic { .. } => SegmentKind::Generic,
            Self::Video { .. } => SegmentKind::Video,
            Self::Quiz { .. } => SegmentKind::Quiz,
        }
    }

    /// Segment title
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Generic { title, .. } | Self::Video { title, .. } | Self::Quiz { title, .. } => {
                title
            }
        }
    }

    /// Length in minutes
    #[must_use]
    pub const fn duration_minutes(&self) -> i32 {
        match self {
            Self::Generic {
                duration_minutes, ..
            }
            | Self::Video {
                duration_minutes, ..
            }
            | Self::Quiz {
                duration_minutes, ..
            } => *duration_minutes,
        }
    }

    /// Encode as a single line without the trailing newline.
    ///
    /// Text is written verbatim; a `|` inside the title or URL will not
    /// survive a decode.
    #[must_use]
    pub fn encode(&self) -> String {
        let tag = self.kind().tag();
        match self {
            Self::Generic {
                title,
                duration_minutes,
            } => format!("{tag}|{title}|{duration_minutes}"),
            Self::Video {
                title,
                duration_minutes,
                video_url,
            } => format!("{tag}|{title}|{duration_minutes}|{video_url}"),
            Self::Quiz {
                title,
                duration_minutes,
                question_count,
            } => format!("{tag}|{title}|{duration_minutes}|{question_count}"),
        }
    }

    /// Decode one segment line.
    ///
    /// Fields past the ones a variant needs are ignored.
    pub fn decode(line: &str) -> Result<Self, SegmentError> {
        let parts: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if parts.len() < 3 {
            return Err(SegmentError::TooFewFields {
                actual: parts.len(),
            });
        }

        let title = parts[1].to_string();
        let duration_minutes = parse_int("duration", parts[2])?;

        let segment = match (SegmentKind::from_tag(parts[0]), parts.get(3)) {
            (Some(SegmentKind::Video), Some(url)) => Self::Video {
                title,
                duration_minutes,
                video_url: (*url).to_string(),
            },
            (Some(SegmentKind::Quiz), Some(questions)) => Self::Quiz {
                title,
                duration_minutes,
                question_count: parse_int("questions", questions)?,
            },
            // Unknown tags and short Video/Quiz lines fall back to generic
            _ => Self::Generic {
                title,
                duration_minutes,
            },
        };

        Ok(segment)
    }

    /// Check that no text field contains the field separator
    pub fn validate(&self) -> Result<(), CatalogError> {
        ensure_no_delimiter("segment title", self.title())?;
        if let Self::Video { video_url, .. } = self {
            ensure_no_delimiter("video url", video_url)?;
        }
        Ok(())
    }
}

impl FromStr for Segment {
    type Err = SegmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({} min)",
            self.kind(),
            self.title(),
            self.duration_minutes()
        )?;
        match self {
            Self::Generic { .. } => Ok(()),
            Self::Video { video_url, .. } => write!(f, " - {video_url}"),
            Self::Quiz { question_count, .. } => write!(f, " - {question_count} questions"),
        }
    }
}

fn parse_int(field: &'static str, raw: &str) -> Result<i32, SegmentError> {
    raw.parse::<i32>()
        .map_err(|_| SegmentError::InvalidInteger {
            field,
            value: raw.to_string(),
        })
}
