//! Keyed in-memory course store with whole-file persistence.
//!
//! Courses are indexed by id in a sorted map, so iteration and saved output
//! follow key order and a given store state always produces the same file.

use crate::course::Course;
use crate::error::{CatalogError, Result};
use crate::reader::CourseReader;
use crate::writer::CourseWriter;
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{Read, Write};
use std::ops::AddAssign;
use std::path::Path;
use tracing::{debug, info};

/// In-memory mapping of course id to course
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseStore {
    courses: BTreeMap<String, Course>,
}

impl CourseStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from a courses file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be opened or contains a
    /// fatal block error.
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut store = Self::new();
        store.load_all(path)?;
        Ok(store)
    }

    /// Insert a course under its own id, returning any course it replaced.
    ///
    /// The previous course, segments included, is dropped from the store.
    pub fn add_or_replace(&mut self, course: Course) -> Option<Course> {
        let replaced = self.courses.insert(course.id().to_string(), course);
        if let Some(old) = &replaced {
            debug!(id = old.id(), "Replaced existing course");
        }
        replaced
    }

    pub fn get(&self, id: &str) -> Option<&Course> {
        self.courses.get(id)
    }

    /// Mutable access to a stored course.
    ///
    /// `Course` has no id setter, so the key stays in step with the value.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Course> {
        self.courses.get_mut(id)
    }

    /// Apply `f` to the course stored under `id`, if any
    pub fn update<T, F>(&mut self, id: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut Course) -> T,
    {
        self.courses.get_mut(id).map(f)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.courses.contains_key(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Course> {
        self.courses.remove(id)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Courses in id order
    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    /// `(id, title)` pairs in id order
    pub fn titles(&self) -> impl Iterator<Item = (&str, &str)> {
        self.courses
            .iter()
            .map(|(id, course)| (id.as_str(), course.title()))
    }

    /// Course and segment counts
    #[must_use]
    pub fn summary(&self) -> StoreSummary {
        let courses: Vec<CourseSummary> = self
            .iter()
            .map(|course| CourseSummary {
                id: course.id().to_string(),
                title: course.title().to_string(),
                segment_count: course.segments().len(),
            })
            .collect();

        StoreSummary {
            course_count: courses.len(),
            segment_count: courses.iter().map(|c| c.segment_count).sum(),
            courses,
        }
    }

    /// Write every course block, in id order, and return the count written
    pub fn write_to<W: Write>(&self, writer: W) -> Result<usize> {
        let mut writer = CourseWriter::new(writer);
        let written = writer.write_courses(self.courses.values())?;
        Ok(written)
    }

    /// Replace the store's contents with the blocks read from `reader`.
    ///
    /// The existing courses are kept if reading fails. When two blocks share
    /// an id the later one wins.
    pub fn read_from<R: Read>(&mut self, reader: R) -> Result<usize> {
        let mut reader = CourseReader::new(reader);
        let mut courses = BTreeMap::new();
        let mut blocks = 0;

        while let Some(course) = reader.next_course()? {
            courses.insert(course.id().to_string(), course);
            blocks += 1;
        }

        self.courses = courses;
        Ok(blocks)
    }

    /// Save all courses to `path`, truncating any existing file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be created or written.
    pub fn save_all(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| CatalogError::io(path, e))?;
        let written = self.write_to(file).map_err(|e| with_path(e, path))?;
        info!("Saved {written} courses to {}", path.display());
        Ok(())
    }

    /// Load all courses from `path`, replacing the current contents.
    ///
    /// Nothing is changed unless the whole file loads.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be opened or read, and
    /// the block errors of [`CourseReader`] for malformed headers and numbers.
    pub fn load_all(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path).map_err(|e| CatalogError::io(path, e))?;
        let blocks = self.read_from(file).map_err(|e| with_path(e, path))?;
        info!(
            "Loaded {} courses ({blocks} blocks) from {}",
            self.len(),
            path.display()
        );
        Ok(())
    }
}

fn with_path(err: CatalogError, path: &Path) -> CatalogError {
    match err {
        CatalogError::Read(source) => CatalogError::io(path, source),
        other => other,
    }
}

impl AddAssign<Course> for CourseStore {
    fn add_assign(&mut self, course: Course) {
        self.add_or_replace(course);
    }
}

impl Extend<Course> for CourseStore {
    fn extend<I: IntoIterator<Item = Course>>(&mut self, iter: I) {
        for course in iter {
            self.add_or_replace(course);
        }
    }
}

impl FromIterator<Course> for CourseStore {
    fn from_iter<I: IntoIterator<Item = Course>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

/// Per-course line of a [`StoreSummary`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CourseSummary {
    pub id: String,
    pub title: String,
    pub segment_count: usize,
}

/// Counts over the whole store
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoreSummary {
    /// Number of stored courses
    pub course_count: usize,
    /// Segments across all courses
    pub segment_count: usize,
    /// One entry per course, in id order
    pub courses: Vec<CourseSummary>,
}

impl fmt::Display for StoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} courses, {} segments",
            self.course_count, self.segment_count
        )?;
        for course in &self.courses {
            write!(
                f,
                "\n  {} ({}): {} segments",
                course.id, course.title, course.segment_count
            )?;
        }
        Ok(())
    }
}
