//! Loading and saving the three data files around one command.

use anyhow::{Context, Result};
use lectern_catalog::{CatalogError, ContentLibrary, CourseStore, EnrollmentLedger};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Locations of the courses, enrollments and content files
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataPaths {
    pub courses: PathBuf,
    pub enrollments: PathBuf,
    pub content: PathBuf,
}

/// In-memory state for one command invocation.
///
/// Missing files load as empty collections; nothing is written back unless
/// a `save_*` method is called.
pub struct Session {
    paths: DataPaths,
    pub store: CourseStore,
    pub enrollments: EnrollmentLedger,
    pub content: ContentLibrary,
}

impl Session {
    /// Load every data file that exists
    pub fn open(paths: DataPaths) -> Result<Self> {
        let mut store = CourseStore::new();
        if load_if_present(&paths.courses, |p| store.load_all(p))? {
            debug!("Opened course store with {} courses", store.len());
        }

        let mut enrollments = EnrollmentLedger::new();
        load_if_present(&paths.enrollments, |p| enrollments.load(p))?;

        let mut content = ContentLibrary::new();
        load_if_present(&paths.content, |p| content.load(p))?;

        Ok(Self {
            paths,
            store,
            enrollments,
            content,
        })
    }

    pub const fn paths(&self) -> &DataPaths {
        &self.paths
    }

    pub fn save_courses(&self) -> Result<()> {
        ensure_parent(&self.paths.courses)?;
        self.store
            .save_all(&self.paths.courses)
            .context("failed to save courses")
    }

    pub fn save_enrollments(&self) -> Result<()> {
        ensure_parent(&self.paths.enrollments)?;
        self.enrollments
            .save(&self.paths.enrollments)
            .context("failed to save enrollments")
    }

    pub fn save_content(&self) -> Result<()> {
        ensure_parent(&self.paths.content)?;
        self.content
            .save(&self.paths.content)
            .context("failed to save content")
    }
}

/// Outcome of trying to load one data file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadStatus {
    Loaded { entries: usize },
    Missing,
    Failed { error: String },
}

/// Per-file load results, used by `data check`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub courses: LoadStatus,
    pub enrollments: LoadStatus,
    pub content: LoadStatus,
}

impl LoadReport {
    /// Try each file independently without failing on the first error
    pub fn probe(paths: &DataPaths) -> Self {
        Self {
            courses: probe_file(&paths.courses, |p| {
                CourseStore::from_file(p).map(|s| s.len())
            }),
            enrollments: probe_file(&paths.enrollments, |p| {
                let mut ledger = EnrollmentLedger::new();
                ledger.load(p).map(|()| ledger.len())
            }),
            content: probe_file(&paths.content, |p| {
                let mut library = ContentLibrary::new();
                library.load(p).map(|()| library.len())
            }),
        }
    }

    pub fn all_ok(&self) -> bool {
        ![&self.courses, &self.enrollments, &self.content]
            .iter()
            .any(|s| matches!(s, LoadStatus::Failed { .. }))
    }
}

fn probe_file<F>(path: &Path, load: F) -> LoadStatus
where
    F: FnOnce(&Path) -> Result<usize, CatalogError>,
{
    if !path.exists() {
        return LoadStatus::Missing;
    }
    match load(path) {
        Ok(entries) => LoadStatus::Loaded { entries },
        Err(e) => LoadStatus::Failed {
            error: e.to_string(),
        },
    }
}

fn load_if_present<F>(path: &Path, load: F) -> Result<bool>
where
    F: FnOnce(&Path) -> Result<(), CatalogError>,
{
    if !path.exists() {
        debug!("{} does not exist, starting empty", path.display());
        return Ok(false);
    }
    load(path).with_context(|| format!("failed to load {}", path.display()))?;
    Ok(true)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(())
}
