//! Author reference data: who wrote when.
//!
//! The reference file is line oriented, one author per line:
//!
//! ```text
//! Cicero # (1a)
//! Ovidius # (1a, 1d)
//! Anonymus # (?)
//! ```
//!
//! Lines that do not follow this shape are logged and skipped.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::{DiachronError, Result};
use crate::history::span::TimeSpan;
use crate::history::time::{TimeDescr, before};

/// Mapping from author name to the span of centuries they were active in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorHistorical {
    mapping: BTreeMap<String, TimeSpan>,
}

impl AuthorHistorical {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the reference file at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .map_err(|e| DiachronError::file_access(path.as_ref(), e))?;
        Self::from_reader(file)
    }

    /// Read reference data from any reader.
    ///
    /// Only a failure of the reader itself is an error; malformed lines,
    /// including lines that are not valid UTF-8, are skipped with a warning.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = BufReader::new(reader);
        let mut mapping = BTreeMap::new();
        let mut skipped = 0usize;
        let mut buffer = Vec::new();

        for line_number in 0.. {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }

            let parsed = match std::str::from_utf8(&buffer) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => parse_line(line_number, line),
                Err(e) => Err(DiachronError::malformed_line(line_number, e.to_string())),
            };
            match parsed {
                Ok((author, span)) => {
                    mapping.insert(author, span);
                }
                Err(e) => {
                    log::warn!("Skipping author entry: {e}");
                    skipped += 1;
                }
            }
        }

        log::info!(
            "Loaded {} author spans ({} lines skipped)",
            mapping.len(),
            skipped
        );
        Ok(AuthorHistorical { mapping })
    }

    pub fn insert<S: Into<String>>(&mut self, author: S, span: TimeSpan) {
        self.mapping.insert(author.into(), span);
    }

    pub fn span(&self, author: &str) -> Option<&TimeSpan> {
        self.mapping.get(author)
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TimeSpan)> {
        self.mapping.iter().map(|(a, s)| (a.as_str(), s))
    }

    /// Authors whose span starts strictly before `date`.
    ///
    /// Authors with an unknown start never match.
    pub fn all_before(&self, date: &TimeDescr) -> BTreeSet<String> {
        self.mapping
            .iter()
            .filter(|(_, span)| before(&span.start, date))
            .map(|(author, _)| author.clone())
            .collect()
    }
}

fn parse_line(line_number: usize, line: &str) -> Result<(String, TimeSpan)> {
    let parts: Vec<&str> = line.split('#').collect();
    let [author, span] = parts.as_slice() else {
        return Err(DiachronError::malformed_line(
            line_number,
            format!("expected `<author> # (<span>)`, got {line:?}"),
        ));
    };

    let author = author.trim();
    if author.is_empty() {
        return Err(DiachronError::malformed_line(line_number, "empty author name"));
    }

    let span = TimeSpan::parse(span)
        .map_err(|e| DiachronError::malformed_line(line_number, e.to_string()))?;
    Ok((author.to_string(), span))
}
