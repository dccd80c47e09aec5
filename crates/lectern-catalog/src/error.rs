//! Error types for the catalog codecs and stores.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while decoding a single segment line.
///
/// The block reader treats [`SegmentError::TooFewFields`] as a skippable line
/// and everything else as fatal for the enclosing load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    /// Line has fewer than the three mandatory fields
    #[error("Segment line has {actual} fields, expected at least 3")]
    TooFewFields {
        /// Number of fields found after splitting on `|`
        actual: usize,
    },

    /// A numeric field could not be parsed as an integer
    #[error("Invalid integer in segment field '{field}': {value:?}")]
    InvalidInteger {
        /// Name of the offending field
        field: &'static str,
        /// Raw text that failed to parse
        value: String,
    },
}

impl SegmentError {
    /// Whether the line can be dropped without aborting the enclosing block.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::TooFewFields { .. })
    }
}

/// Catalog-level errors for course blocks, stores and the auxiliary files.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A named file could not be opened, read or written
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Stream error where no file path is known
    #[error("Read error: {0}")]
    Read(#[from] std::io::Error),

    /// Course header line with fewer than ten fields
    #[error("Malformed course header ({fields} fields, expected 10): {line:?}")]
    MalformedHeader {
        /// Number of fields found
        fields: usize,
        /// The header line as read
        line: String,
    },

    /// A numeric course field could not be parsed
    #[error("Invalid integer in course field '{field}': {value:?}")]
    InvalidInteger {
        /// Name of the offending field
        field: &'static str,
        /// Raw text that failed to parse
        value: String,
    },

    /// Fatal segment decode error inside a course block
    #[error("Segment error: {0}")]
    Segment(#[from] SegmentError),

    /// A text field contains the `|` delimiter and cannot be stored losslessly
    #[error("Field '{field}' contains the '|' delimiter")]
    FieldContainsDelimiter {
        /// Name of the offending field
        field: &'static str,
    },

    /// A text field spans lines and would split its record when written
    #[error("Field '{field}' contains a line break")]
    FieldContainsLineBreak {
        /// Name of the offending field
        field: &'static str,
    },
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Reject text that would corrupt the line-oriented, pipe-delimited formats:
/// the `|` field separator or a `\n`/`\r` line break.
///
/// The codecs themselves never call this; the on-disk format has no escaping.
pub fn ensure_no_delimiter(field: &'static str, value: &str) -> Result<()> {
    if value.contains('|') {
        return Err(CatalogError::FieldContainsDelimiter { field });
    }
    if value.contains(['\n', '\r']) {
        return Err(CatalogError::FieldContainsLineBreak { field });
    }
    Ok(())
}
