//! Rereading attested lines from the corpus files.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use crate::analysis::normalize_display_line;
use crate::corpus::payload::OccurrenceLine;
use crate::error::{DiachronError, Result};
use crate::index::Occurrence;

/// Turn occurrence records into displayable lines.
///
/// Records pointing at the same line of the same file collapse into one.
/// Output is ordered by file path, then line number. Each file is opened
/// once; lines that cannot be read are logged and left out.
pub fn render(records: Vec<Occurrence>) -> Vec<OccurrenceLine> {
    let mut by_path: BTreeMap<Arc<Path>, BTreeMap<usize, Occurrence>> = BTreeMap::new();
    for record in records {
        let (path, line) = record.dedup_key();
        by_path.entry(path).or_default().entry(line).or_insert(record);
    }

    let mut result = Vec::new();
    for (path, records) in by_path {
        let wanted: BTreeSet<usize> = records.keys().copied().collect();
        let lines = match read_lines(&path, &wanted) {
            Ok(lines) => lines,
            Err(e) => {
                log::warn!("Skipping {} occurrences: {e}", records.len());
                continue;
            }
        };

        for (line_number, record) in records {
            match lines.get(&line_number) {
                Some(text) => result.push(OccurrenceLine {
                    author: record.author().to_string(),
                    document: record.document().to_string(),
                    content: normalize_display_line(text),
                    line_number,
                }),
                None => log::warn!("{}:{line_number}: no such line", path.display()),
            }
        }
    }
    result
}

/// Raw content of the `wanted` lines of `path`, keyed by zero-based number.
fn read_lines(path: &Path, wanted: &BTreeSet<usize>) -> Result<BTreeMap<usize, String>> {
    let file = File::open(path).map_err(|e| DiachronError::file_access(path, e))?;
    let mut reader = BufReader::new(file);
    let Some(&last) = wanted.last() else {
        return Ok(BTreeMap::new());
    };

    let mut found = BTreeMap::new();
    let mut buffer = Vec::new();
    let mut line_number = 0usize;
    while line_number <= last {
        buffer.clear();
        let read = reader
            .read_until(b'\n', &mut buffer)
            .map_err(|e| DiachronError::file_access(path, e))?;
        if read == 0 {
            break;
        }
        if wanted.contains(&line_number) {
            while matches!(buffer.last(), Some(b'\n' | b'\r')) {
                buffer.pop();
            }
            found.insert(line_number, String::from_utf8_lossy(&buffer).into_owned());
        }
        line_number += 1;
    }
    Ok(found)
}
