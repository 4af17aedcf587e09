//! Author filtering criteria.
//!
//! Every query runs against a view of the index restricted to some authors.
//! The restriction comes from an explicit author list, from a cutoff date
//! looked up in the [`AuthorHistorical`] reference, or from both joined
//! together.
//!
//! # Examples
//!
//! ```
//! use diachron::filter::FilteringCriteria;
//!
//! let listed = FilteringCriteria::from_author_list("Cicero, Caesar").unwrap();
//! let dated = FilteringCriteria::from_authors(["Caesar", "Plautus"]);
//!
//! let joined = listed.join(dated);
//! assert_eq!(joined, FilteringCriteria::from_authors(["Caesar"]));
//!
//! // The universal filter is the identity of `join`
//! assert_eq!(FilteringCriteria::all().join(joined.clone()), joined);
//! ```

use std::borrow::Cow;
use std::collections::BTreeSet;

use crate::error::{DiachronError, Result};
use crate::history::{AuthorHistorical, TimeDescr, parse_time};
use crate::index::Index;

/// Which authors a query may see.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilteringCriteria {
    /// Every author.
    #[default]
    All,
    /// Only the listed authors. May be empty, in which case nothing matches.
    Authors(BTreeSet<String>),
}

impl FilteringCriteria {
    pub fn all() -> Self {
        FilteringCriteria::All
    }

    pub fn from_authors<I, S>(authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilteringCriteria::Authors(authors.into_iter().map(Into::into).collect())
    }

    /// Parse a comma-separated author list such as `Cicero,Caesar`.
    ///
    /// Names are trimmed and empty entries ignored; a list naming nobody is
    /// rejected.
    pub fn from_author_list(text: &str) -> Result<Self> {
        let authors: BTreeSet<String> = text
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect();

        if authors.is_empty() {
            return Err(DiachronError::invalid_filter(format!(
                "no author named in {text:?}"
            )));
        }
        Ok(FilteringCriteria::Authors(authors))
    }

    /// Authors whose span starts strictly before `date`.
    pub fn from_cutoff_date(history: &AuthorHistorical, date: &TimeDescr) -> Self {
        FilteringCriteria::Authors(history.all_before(date))
    }

    /// Build the criteria of one request: an optional author list joined with
    /// an optional cutoff date token.
    pub fn from_request(
        author_list: Option<&str>,
        date: Option<&str>,
        history: &AuthorHistorical,
    ) -> Result<Self> {
        let by_author = match author_list {
            Some(text) => Self::from_author_list(text)?,
            None => Self::all(),
        };
        let by_date = match date {
            Some(token) => Self::from_cutoff_date(history, &parse_time(token)?),
            None => Self::all(),
        };
        Ok(by_author.join(by_date))
    }

    /// Intersection of two criteria.
    pub fn join(self, other: Self) -> Self {
        match (self, other) {
            (FilteringCriteria::All, other) => other,
            (this, FilteringCriteria::All) => this,
            (FilteringCriteria::Authors(a), FilteringCriteria::Authors(b)) => {
                FilteringCriteria::Authors(a.intersection(&b).cloned().collect())
            }
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, FilteringCriteria::All)
    }

    /// The explicit author set, or `None` for the universal filter.
    pub fn authors(&self) -> Option<&BTreeSet<String>> {
        match self {
            FilteringCriteria::All => None,
            FilteringCriteria::Authors(authors) => Some(authors),
        }
    }

    pub fn matches(&self, author: &str) -> bool {
        match self {
            FilteringCriteria::All => true,
            FilteringCriteria::Authors(authors) => authors.contains(author),
        }
    }

    /// Restrict `index` to the matching authors.
    ///
    /// The universal filter borrows the index as is; anything else builds a
    /// filtered copy.
    pub fn apply<'a>(&self, index: &'a Index) -> Cow<'a, Index> {
        match self {
            FilteringCriteria::All => Cow::Borrowed(index),
            FilteringCriteria::Authors(authors) => Cow::Owned(index.filter_by_authors(authors)),
        }
    }
}
