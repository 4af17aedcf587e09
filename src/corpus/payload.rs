//! Serializable query results.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LemmaCount {
    pub lemma: String,
    pub total: usize,
    pub forms: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormCount {
    pub form: String,
    pub total: usize,
    pub lemmas: Vec<String>,
}

/// One attested source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccurrenceLine {
    pub author: String,
    /// Document the line belongs to.
    #[serde(rename = "text")]
    pub document: String,
    /// The normalized line content.
    #[serde(rename = "line")]
    pub content: String,
    /// Zero-based position of the line in its file.
    pub line_number: usize,
}
