//! Dictionary-backed lemma resolver.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use ahash::AHashMap;
use csv::{ReaderBuilder, Trim};

use crate::analysis::normalize::{fold, normalize_token};
use crate::error::{DiachronError, Result};
use crate::lemma::LemmaResolver;

/// In-memory map from normalized form to headwords.
///
/// ```
/// use diachron::lemma::{LemmaResolver, TableResolver};
///
/// let table = TableResolver::from_pairs([("amat", "amo"), ("amant", "amo")]);
/// assert_eq!(table.resolve("Amat"), vec!["amo"]);
/// // Headwords resolve to themselves
/// assert_eq!(table.resolve("amo"), vec!["amo"]);
/// assert!(table.resolve("rex").is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableResolver {
    forms: AHashMap<String, Vec<String>>,
}

impl TableResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, F, H>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (F, H)>,
        F: AsRef<str>,
        H: AsRef<str>,
    {
        let mut table = Self::new();
        for (form, headword) in pairs {
            table.insert(form.as_ref(), headword.as_ref());
        }
        table
    }

    /// Load a CSV dictionary whose records read `form,<ignored>,headword`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .map_err(|e| DiachronError::file_access(path.as_ref(), e))?;
        Self::from_csv(file)
    }

    /// Read CSV records from any reader.
    ///
    /// Records with fewer than three fields, or that are not valid UTF-8,
    /// are logged and skipped. A headword containing an apostrophe is a
    /// homograph marker: the apostrophe is dropped and the headword suffixed
    /// with `2`.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut table = Self::new();
        let mut skipped = 0usize;

        for (record_number, record) in csv_reader.records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    log::warn!("Skipping dictionary record {record_number}: {e}");
                    skipped += 1;
                    continue;
                }
            };
            if record.len() < 3 {
                log::warn!("Skipping dictionary record {record_number}: {record:?}");
                skipped += 1;
                continue;
            }

            let mut headword = fold(&record[2]);
            if headword.contains('\'') {
                headword = format!("{}2", headword.replace('\'', ""));
            }
            table.insert(&record[0], &headword);
        }

        log::info!(
            "Loaded lemma table with {} forms ({} records skipped)",
            table.len(),
            skipped
        );
        Ok(table)
    }

    /// Register `form` as an inflection of `headword`.
    ///
    /// The headword also becomes a form of itself.
    pub fn insert(&mut self, form: &str, headword: &str) {
        let form = normalize_token(form);
        let headword = headword.trim().to_string();
        if form.is_empty() || headword.is_empty() {
            return;
        }

        self.push(normalize_token(&headword), headword.clone());
        self.push(form, headword);
    }

    fn push(&mut self, form: String, headword: String) {
        let headwords = self.forms.entry(form).or_default();
        if !headwords.contains(&headword) {
            headwords.push(headword);
        }
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

impl LemmaResolver for TableResolver {
    fn resolve(&self, form: &str) -> Vec<String> {
        self.forms
            .get(&normalize_token(form))
            .cloned()
            .unwrap_or_default()
    }
}
