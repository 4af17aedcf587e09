//! Aggregate statistics over an index.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// Size counters for an [`Index`](crate::index::Index).
///
/// `forms` counts (headword, form) pairs, so a form attested under two
/// headwords is counted twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub headwords: usize,
    #[serde(rename = "ambig")]
    pub ambiguous: usize,
    pub forms: usize,
    #[serde(rename = "entities")]
    pub occurrences: usize,
}

impl AddAssign for IndexStats {
    fn add_assign(&mut self, other: Self) {
        self.headwords += other.headwords;
        self.ambiguous += other.ambiguous;
        self.forms += other.forms;
        self.occurrences += other.occurrences;
    }
}
