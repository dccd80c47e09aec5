//! Student enrollments and their `student|course` line file.

use crate::error::{CatalogError, Result};
use crate::segment::FIELD_SEPARATOR;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// One student enrolled in one course
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enrollment {
    pub student_id: String,
    pub course_id: String,
}

impl Enrollment {
    pub fn new(student_id: impl Into<String>, course_id: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            course_id: course_id.into(),
        }
    }

    /// Split a line at the first separator; the course part keeps the rest
    #[must_use]
    pub fn parse_line(line: &str) -> Option<Self> {
        line.split_once(FIELD_SEPARATOR)
            .map(|(student, course)| Self::new(student, course))
    }

    #[must_use]
    pub fn to_line(&self) -> String {
        format!("{}|{}", self.student_id, self.course_id)
    }
}

/// Ordered list of enrollments; the same pair may appear more than once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrollmentLedger {
    entries: Vec<Enrollment>,
}

impl EnrollmentLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an enrollment
    pub fn enroll(&mut self, student_id: impl Into<String>, course_id: impl Into<String>) {
        self.entries.push(Enrollment::new(student_id, course_id));
    }

    pub fn is_enrolled(&self, student_id: &str, course_id: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.student_id == student_id && e.course_id == course_id)
    }

    /// Course ids for one student, in enrollment order
    pub fn courses_for<'a>(&'a self, student_id: &'a str) -> impl Iterator<Item = &'a str> {
        self.entries
            .iter()
            .filter(move |e| e.student_id == student_id)
            .map(|e| e.course_id.as_str())
    }

    pub fn entries(&self) -> &[Enrollment] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Save to `path`, truncating any existing file
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| CatalogError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        for entry in &self.entries {
            writeln!(writer, "{}", entry.to_line()).map_err(|e| CatalogError::io(path, e))?;
        }
        writer.flush().map_err(|e| CatalogError::io(path, e))?;
        info!("Saved {} enrollments to {}", self.len(), path.display());
        Ok(())
    }

    /// Replace the ledger with the contents of `path`.
    ///
    /// Lines without a separator are skipped. The ledger is unchanged if
    /// the file cannot be opened or read.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path).map_err(|e| CatalogError::io(path, e))?;
        let mut entries = Vec::new();

        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| CatalogError::io(path, e))?;
            match Enrollment::parse_line(&line) {
                Some(entry) => entries.push(entry),
                None => debug!("Skipping enrollment line without separator: {line:?}"),
            }
        }

        self.entries = entries;
        info!("Loaded {} enrollments from {}", self.len(), path.display());
        Ok(())
    }
}
