//! Flat lists of course material kept in a tagged-section text file.
//!
//! ```text
//! #LECTURES
//! Ownership
//! #VIDEOS
//! #NOTES
//! ...
//! #ASSIGNMENTS
//! Exercise 1
//! #END
//! ```
//!
//! A section runs from its `#TAG` line to the next line starting with `#`.

use crate::error::{CatalogError, Result};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Line that closes the content file
pub const CONTENT_END: &str = "#END";

/// Kind of material held in a content section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ContentKind {
    Lecture,
    Video,
    Note,
    Slide,
    Book,
    Assignment,
}

impl ContentKind {
    /// All kinds, in file order
    pub const ALL: [Self; 6] = [
        Self::Lecture,
        Self::Video,
        Self::Note,
        Self::Slide,
        Self::Book,
        Self::Assignment,
    ];

    /// Section tag without the leading `#`
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Lecture => "LECTURES",
            Self::Video => "VIDEOS",
            Self::Note => "NOTES",
            Self::Slide => "SLIDES",
            Self::Book => "BOOKS",
            Self::Assignment => "ASSIGNMENTS",
        }
    }

    /// Human-readable section heading
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lecture => "Lectures",
            Self::Video => "Videos",
            Self::Note => "Notes",
            Self::Slide => "Slides",
            Self::Book => "Books",
            Self::Assignment => "Assignments",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lecture" | "lectures" => Ok(Self::Lecture),
            "video" | "videos" => Ok(Self::Video),
            "note" | "notes" => Ok(Self::Note),
            "slide" | "slides" => Ok(Self::Slide),
            "book" | "books" => Ok(Self::Book),
            "assignment" | "assignments" => Ok(Self::Assignment),
            _ => Err(format!("unknown content kind: {s}")),
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lectures, videos, notes, slides, books and assignments as plain text lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentLibrary {
    sections: [Vec<String>; 6],
}

impl ContentLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item to a section
    pub fn add(&mut self, kind: ContentKind, item: impl Into<String>) {
        self.sections[kind.index()].push(item.into());
    }

    pub fn items(&self, kind: ContentKind) -> &[String] {
        &self.sections[kind.index()]
    }

    /// Every section with its items, in file order
    pub fn sections(&self) -> impl Iterator<Item = (ContentKind, &[String])> {
        ContentKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.items(kind)))
    }

    /// Total number of items across sections
    pub fn len(&self) -> usize {
        self.sections.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(Vec::is_empty)
    }

    /// Format as the tagged-section file text
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for (kind, items) in self.sections() {
            text.push('#');
            text.push_str(kind.tag());
            text.push('\n');
            for item in items {
                text.push_str(item);
                text.push('\n');
            }
        }
        text.push_str(CONTENT_END);
        text.push('\n');
        text
    }

    /// Parse tagged-section text; missing sections are empty
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let lines: Vec<&str> = content.lines().collect();
        let mut library = Self::new();
        for kind in ContentKind::ALL {
            library.sections[kind.index()] = section_lines(&lines, kind.tag());
        }
        library
    }

    /// Save to `path`, truncating any existing file
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| CatalogError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(self.to_text().as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|e| CatalogError::io(path, e))?;
        info!("Saved {} content items to {}", self.len(), path.display());
        Ok(())
    }

    /// Replace the library with the contents of `path`.
    ///
    /// The library is unchanged if the file cannot be opened or read.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path).map_err(|e| CatalogError::io(path, e))?;
        let lines = BufReader::new(file)
            .lines()
            .collect::<std::io::Result<Vec<String>>>()
            .map_err(|e| CatalogError::io(path, e))?;

        let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
        for kind in ContentKind::ALL {
            self.sections[kind.index()] = section_lines(&lines, kind.tag());
        }
        info!("Loaded {} content items from {}", self.len(), path.display());
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ContentLibrary {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(ContentKind::ALL.len()))?;
        for (kind, items) in self.sections() {
            map.serialize_entry(kind.tag(), items)?;
        }
        map.end()
    }
}

fn section_lines(lines: &[&str], tag: &str) -> Vec<String> {
    let Some(start) = lines
        .iter()
        .position(|line| line.strip_prefix('#') == Some(tag))
    else {
        return Vec::new();
    };

    lines[start + 1..]
        .iter()
        .take_while(|line| !line.starts_with('#'))
        .map(|line| (*line).to_string())
        .collect()
}
