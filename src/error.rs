//! Error types for the Diachron library.
//!
//! All fallible operations return [`DiachronError`] through the crate-wide
//! [`Result`] alias. Failures that only concern one input record (a malformed
//! reference line, a file that cannot be opened) are logged and skipped by the
//! callers that meet them; the variants still exist so those callers can report
//! what they skipped.
//!
//! # Examples
//!
//! ```
//! use diachron::error::{DiachronError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(DiachronError::invalid_date("12x"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for Diachron operations.
#[derive(Error, Debug)]
pub enum DiachronError {
    /// I/O errors not tied to a single corpus file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A century token did not match `<digits><a|d>`.
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    /// A span whose start comes after its end.
    #[error("Invalid ordering: {0}")]
    InvalidOrdering(String),

    /// A line of the author reference file that could not be parsed.
    #[error("Malformed reference line {line}: {reason}")]
    MalformedReferenceLine { line: usize, reason: String },

    /// A corpus file that could not be opened or read.
    #[error("Cannot access {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Enumerating the corpus tree failed; the load is aborted.
    #[error("Tree walk error: {0}")]
    TreeWalk(#[from] walkdir::Error),

    /// An author filter expression that names no author.
    #[error("Invalid filter syntax: {0}")]
    InvalidFilterSyntax(String),

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Thread join errors
    #[error("Thread join error: {0}")]
    ThreadJoinError(String),

    /// The lemma dictionary could not be read.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with DiachronError.
pub type Result<T> = std::result::Result<T, DiachronError>;

impl DiachronError {
    /// Create a new invalid date format error.
    pub fn invalid_date<S: Into<String>>(msg: S) -> Self {
        DiachronError::InvalidDateFormat(msg.into())
    }

    /// Create a new invalid ordering error.
    pub fn invalid_ordering<S: Into<String>>(msg: S) -> Self {
        DiachronError::InvalidOrdering(msg.into())
    }

    /// Create a new malformed reference line error.
    pub fn malformed_line<S: Into<String>>(line: usize, reason: S) -> Self {
        DiachronError::MalformedReferenceLine {
            line,
            reason: reason.into(),
        }
    }

    /// Create a new file access error.
    pub fn file_access<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        DiachronError::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Create a new invalid filter syntax error.
    pub fn invalid_filter<S: Into<String>>(msg: S) -> Self {
        DiachronError::InvalidFilterSyntax(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        DiachronError::InvalidConfig(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        DiachronError::Other(msg.into())
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        DiachronError::Other(format!("Internal error: {}", msg.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = DiachronError::invalid_date("5x");
        assert_eq!(error.to_string(), "Invalid date format: 5x");

        let error = DiachronError::malformed_line(3, "missing '#'");
        assert_eq!(error.to_string(), "Malformed reference line 3: missing '#'");

        let error = DiachronError::invalid_filter("empty author list");
        assert_eq!(error.to_string(), "Invalid filter syntax: empty author list");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = DiachronError::from(io_error);

        match error {
            DiachronError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_file_access_keeps_path() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let error = DiachronError::file_access("corpus/cicero/orat.txt", io_error);
        assert!(error.to_string().starts_with("Cannot access corpus/cicero/orat.txt"));
    }
}
