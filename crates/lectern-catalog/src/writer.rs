use crate::course::{COURSE_TERMINATOR, Course};
use std::io::{BufWriter, Write};

/// Course block writer
pub struct CourseWriter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> CourseWriter<W> {
    /// Create a new writer
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Write one complete course block
    pub fn write_course(&mut self, course: &Course) -> Result<(), std::io::Error> {
        writeln!(self.writer, "{}", course.header_line())?;
        for segment in course.segments() {
            writeln!(self.writer, "{}", segment.encode())?;
        }
        writeln!(self.writer, "{COURSE_TERMINATOR}")?;
        Ok(())
    }

    /// Write a sequence of course blocks and flush
    pub fn write_courses<'a, I>(&mut self, courses: I) -> Result<usize, std::io::Error>
    where
        I: IntoIterator<Item = &'a Course>,
    {
        let mut written = 0;
        for course in courses {
            self.write_course(course)?;
            written += 1;
        }
        self.writer.flush()?;
        Ok(written)
    }

    /// Get the inner writer
    pub fn into_inner(self) -> Result<W, std::io::Error> {
        self.writer
            .into_inner()
            .map_err(std::io::IntoInnerError::into_error)
    }
}

/// Format courses as concatenated blocks
#[must_use]
pub fn format<'a, I>(courses: I) -> String
where
    I: IntoIterator<Item = &'a Course>,
{
    courses.into_iter().map(Course::to_block).collect()
}
