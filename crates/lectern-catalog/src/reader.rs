use crate::course::{COURSE_PREFIX, COURSE_TERMINATOR, Course};
use crate::error::{CatalogError, Result};
use crate::segment::Segment;
use std::io::{BufRead, BufReader, Read};
use tracing::{debug, warn};

/// Streaming reader for course blocks
pub struct CourseReader<R> {
    reader: BufReader<R>,
    line_buffer: String,
    line_number: usize,
}

impl<R: Read> CourseReader<R> {
    /// Create a new reader from any `Read` source
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_buffer: String::new(),
            line_number: 0,
        }
    }

    /// Number of lines consumed so far
    pub const fn line_number(&self) -> usize {
        self.line_number
    }

    /// Scan forward to the next `COURSE|` header and read its block.
    ///
    /// Lines outside a block are ignored. Returns `None` at end of input.
    pub fn next_course(&mut self) -> Result<Option<Course>> {
        while let Some(line) = self.next_line()? {
            if line.starts_with(COURSE_PREFIX) {
                return self.read_course(&line).map(Some);
            }
            debug!(line = self.line_number, "Ignoring line outside course block");
        }
        Ok(None)
    }

    /// Read all remaining courses in file order
    pub fn read_all(&mut self) -> Result<Vec<Course>> {
        let mut courses = Vec::new();
        while let Some(course) = self.next_course()? {
            courses.push(course);
        }
        Ok(courses)
    }

    /// Read the body of a block whose header has already been consumed.
    ///
    /// Stops after the terminator line, or at end of input if the
    /// terminator is missing. Segment lines with too few fields are
    /// skipped; any other segment error aborts the block.
    pub fn read_course(&mut self, header: &str) -> Result<Course> {
        let mut course = Course::parse_header(header)?;

        while let Some(line) = self.next_line()? {
            if line == COURSE_TERMINATOR {
                debug!(
                    id = course.id(),
                    segments = course.segments().len(),
                    "Read course block"
                );
                return Ok(course);
            }

            match Segment::decode(&line) {
                Ok(segment) => course.add_segment(segment),
                Err(e) if e.is_recoverable() => {
                    warn!(
                        line = self.line_number,
                        id = course.id(),
                        "Skipping malformed segment line: {e}"
                    );
                }
                Err(e) => return Err(CatalogError::Segment(e)),
            }
        }

        debug!(
            id = course.id(),
            segments = course.segments().len(),
            "Course block ended without terminator"
        );
        Ok(course)
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        self.line_buffer.clear();
        if self.reader.read_line(&mut self.line_buffer)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let line = self
            .line_buffer
            .strip_suffix('\n')
            .unwrap_or(&self.line_buffer);
        let line = line.strip_suffix('\r').unwrap_or(line);
        Ok(Some(line.to_string()))
    }
}

impl<'a> CourseReader<&'a [u8]> {
    /// Create a reader from a byte slice
    #[must_use]
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

/// Parse every course block in a string, in file order
pub fn parse(content: &str) -> Result<Vec<Course>> {
    CourseReader::from_bytes(content.as_bytes()).read_all()
}
