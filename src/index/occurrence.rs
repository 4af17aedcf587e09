//! Occurrence records.

use std::path::Path;
use std::sync::Arc;

/// One attested appearance of a surface form.
///
/// The string fields are shared between all occurrences from the same file,
/// so cloning a record is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Occurrence {
    author: Arc<str>,
    document: Arc<str>,
    path: Arc<Path>,
    line: usize,
}

impl Occurrence {
    pub fn new(author: Arc<str>, document: Arc<str>, path: Arc<Path>, line: usize) -> Self {
        Occurrence {
            author,
            document,
            path,
            line,
        }
    }

    /// Convenience constructor that allocates its own shared strings.
    pub fn from_parts<P: AsRef<Path>>(author: &str, document: &str, path: P, line: usize) -> Self {
        Occurrence::new(
            Arc::from(author),
            Arc::from(document),
            Arc::from(path.as_ref()),
            line,
        )
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// File name of the source, without extension.
    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Zero-based line number within the source file.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Two records with the same key point at the same line of the same file.
    pub fn dedup_key(&self) -> (Arc<Path>, usize) {
        (Arc::clone(&self.path), self.line)
    }
}
