//! Course aggregate and its block encoding.
//!
//! A course is written as a header line, one line per segment and a
//! terminator:
//!
//! ```text
//! COURSE|<id>|<title>|<duration>|<price>|<offer>|<topic>|<outline>|<progress>|<1|0>
//! VideoSegment|Intro Video|10|https://example.com/intro
//! ENDCOURSE
//! ```

use crate::error::{CatalogError, Result, ensure_no_delimiter};
use crate::segment::{FIELD_SEPARATOR, Segment};
use std::fmt;

/// Prefix that opens a course block, including the separator
pub const COURSE_PREFIX: &str = "COURSE|";

/// Line that closes a course block
pub const COURSE_TERMINATOR: &str = "ENDCOURSE";

/// Minimum number of `|`-separated fields in a course header
pub const HEADER_FIELD_COUNT: usize = 10;

/// A catalog course owning an ordered list of segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Course {
    id: String,
    title: String,
    duration_label: String,
    price: i32,
    offer: String,
    topic: String,
    outline: String,
    progress_label: String,
    certificate_available: bool,
    segments: Vec<Segment>,
}

impl Course {
    /// Create an empty course with the given identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set the title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the free-text duration label (e.g. "4 weeks")
    #[must_use]
    pub fn with_duration_label(mut self, label: impl Into<String>) -> Self {
        self.duration_label = label.into();
        self
    }

    /// Set the price
    #[must_use]
    pub const fn with_price(mut self, price: i32) -> Self {
        self.price = price;
        self
    }

    /// Set the offer text
    #[must_use]
    pub fn with_offer(mut self, offer: impl Into<String>) -> Self {
        self.offer = offer.into();
        self
    }

    /// Set the topic
    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    /// Set the outline
    #[must_use]
    pub fn with_outline(mut self, outline: impl Into<String>) -> Self {
        self.outline = outline.into();
        self
    }

    /// Set the free-text progress label (e.g. "0%")
    #[must_use]
    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = label.into();
        self
    }

    /// Set whether a certificate is available
    #[must_use]
    pub const fn with_certificate(mut self, available: bool) -> Self {
        self.certificate_available = available;
        self
    }

    /// Append a segment
    #[must_use]
    pub fn with_segment(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn duration_label(&self) -> &str {
        &self.duration_label
    }

    pub const fn price(&self) -> i32 {
        self.price
    }

    pub fn offer(&self) -> &str {
        &self.offer
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn outline(&self) -> &str {
        &self.outline
    }

    pub fn progress_label(&self) -> &str {
        &self.progress_label
    }

    pub const fn certificate_available(&self) -> bool {
        self.certificate_available
    }

    /// Segments in insertion order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_duration_label(&mut self, label: impl Into<String>) {
        self.duration_label = label.into();
    }

    pub fn set_price(&mut self, price: i32) {
        self.price = price;
    }

    pub fn set_offer(&mut self, offer: impl Into<String>) {
        self.offer = offer.into();
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
    }

    pub fn set_outline(&mut self, outline: impl Into<String>) {
        self.outline = outline.into();
    }

    pub fn set_progress_label(&mut self, label: impl Into<String>) {
        self.progress_label = label.into();
    }

    pub fn set_certificate(&mut self, available: bool) {
        self.certificate_available = available;
    }

    /// Append a segment to the end of the list
    pub fn add_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Total minutes across all segments
    pub fn total_minutes(&self) -> i64 {
        self.segments
            .iter()
            .map(|s| i64::from(s.duration_minutes()))
            .sum()
    }

    /// Encode the header line without the trailing newline
    #[must_use]
    pub fn header_line(&self) -> String {
        format!(
            "COURSE|{}|{}|{}|{}|{}|{}|{}|{}|{}",
            self.id,
            self.title,
            self.duration_label,
            self.price,
            self.offer,
            self.topic,
            self.outline,
            self.progress_label,
            if self.certificate_available { "1" } else { "0" }
        )
    }

    /// Encode the full block: header, segment lines and terminator, each
    /// followed by a newline.
    #[must_use]
    pub fn to_block(&self) -> String {
        let mut block = self.header_line();
        block.push('\n');
        for segment in &self.segments {
            block.push_str(&segment.encode());
            block.push('\n');
        }
        block.push_str(COURSE_TERMINATOR);
        block.push('\n');
        block
    }

    /// Build a course with no segments from a header line.
    ///
    /// The first field is not inspected; callers dispatch on
    /// [`COURSE_PREFIX`] before calling this. Fields past the tenth are
    /// ignored and any certificate flag other than `1` reads as false.
    pub fn parse_header(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if parts.len() < HEADER_FIELD_COUNT {
            return Err(CatalogError::MalformedHeader {
                fields: parts.len(),
                line: line.to_string(),
            });
        }

        let price = parts[4]
            .parse::<i32>()
            .map_err(|_| CatalogError::InvalidInteger {
                field: "price",
                value: parts[4].to_string(),
            })?;

        Ok(Self {
            id: parts[1].to_string(),
            title: parts[2].to_string(),
            duration_label: parts[3].to_string(),
            price,
            offer: parts[5].to_string(),
            topic: parts[6].to_string(),
            outline: parts[7].to_string(),
            progress_label: parts[8].to_string(),
            certificate_available: parts[9] == "1",
            segments: Vec::new(),
        })
    }

    /// Check that no text field, including those of the segments, contains
    /// the field separator or a line break.
    pub fn validate(&self) -> Result<()> {
        ensure_no_delimiter("id", &self.id)?;
        ensure_no_delimiter("title", &self.title)?;
        ensure_no_delimiter("duration", &self.duration_label)?;
        ensure_no_delimiter("offer", &self.offer)?;
        ensure_no_delimiter("topic", &self.topic)?;
        ensure_no_delimiter("outline", &self.outline)?;
        ensure_no_delimiter("progress", &self.progress_label)?;
        for segment in &self.segments {
            segment.validate()?;
        }
        Ok(())
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Course {}: {}", self.id, self.title)?;
        writeln!(f, "  Duration:    {}", self.duration_label)?;
        writeln!(f, "  Price:       {}", self.price)?;
        writeln!(f, "  Offer:       {}", self.offer)?;
        writeln!(f, "  Topic:       {}", self.topic)?;
        writeln!(f, "  Outline:     {}", self.outline)?;
        writeln!(f, "  Progress:    {}", self.progress_label)?;
        writeln!(
            f,
            "  Certificate: {}",
            if self.certificate_available {
                "yes"
            } else {
                "no"
            }
        )?;
        write!(
            f,
            "  Segments:    {} ({} min)",
            self.segments.len(),
            self.total_minutes()
        )?;
        for (i, segment) in self.segments.iter().enumerate() {
            write!(f, "\n    {}. {segment}", i + 1)?;
        }
        Ok(())
    }
}
