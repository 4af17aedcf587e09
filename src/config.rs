//! Corpus configuration.
//!
//! A [`CorpusConfig`] names the on-disk inputs of a corpus and how to ingest
//! them. It can be deserialized from a JSON file:
//!
//! ```json
//! {
//!   "data_dir": "corpus/",
//!   "lemmas": "lemmas.csv",
//!   "authors": "authors.txt",
//!   "ingest": { "mode": "sharded", "threads": 4 }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DiachronError, Result};
use crate::ingest::IngestConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Root of the corpus tree, one directory per author.
    pub data_dir: PathBuf,
    /// CSV lemma dictionary.
    pub lemmas: PathBuf,
    /// Author reference file; without it date filters match nobody.
    #[serde(default)]
    pub authors: Option<PathBuf>,
    #[serde(default)]
    pub ingest: IngestConfig,
}

impl CorpusConfig {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(data_dir: P, lemmas: Q) -> Self {
        CorpusConfig {
            data_dir: data_dir.into(),
            lemmas: lemmas.into(),
            authors: None,
            ingest: IngestConfig::default(),
        }
    }

    pub fn with_authors<P: Into<PathBuf>>(mut self, authors: P) -> Self {
        self.authors = Some(authors.into());
        self
    }

    pub fn with_ingest(mut self, ingest: IngestConfig) -> Self {
        self.ingest = ingest;
        self
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| DiachronError::file_access(path, e))?;
        let config: CorpusConfig = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// Check that every configured input exists.
    pub fn validate(&self) -> Result<()> {
        if !self.data_dir.is_dir() {
            return Err(DiachronError::invalid_config(format!(
                "data_dir {} is not a directory",
                self.data_dir.display()
            )));
        }
        if !self.lemmas.is_file() {
            return Err(DiachronError::invalid_config(format!(
                "lemma table {} does not exist",
                self.lemmas.display()
            )));
        }
        if let Some(authors) = &self.authors
            && !authors.is_file()
        {
            return Err(DiachronError::invalid_config(format!(
                "author reference {} does not exist",
                authors.display()
            )));
        }
        Ok(())
    }
}
