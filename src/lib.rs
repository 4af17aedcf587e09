//! # diachron
//!
//! Lemma statistics over a Latin corpus, filtered by author and period.
//!
//! ## Features
//!
//! - Parallel ingestion of a corpus tree laid out one directory per author
//! - An inverted headword → form → occurrence index
//! - Author filters built from explicit lists or from a cutoff date
//! - Exclusive vocabulary of author groups and ambiguous form listings
//!
//! ```no_run
//! use diachron::config::CorpusConfig;
//! use diachron::corpus::Corpus;
//!
//! let config = CorpusConfig::new("corpus/", "lemmas.csv").with_authors("authors.txt");
//! let corpus = Corpus::load(&config)?;
//!
//! let criteria = corpus.criteria(None, Some("1d"))?;
//! let amo = corpus.count_lemma(&criteria, "amo");
//! println!("{} occurrences before the first century AC", amo.total);
//! # Ok::<(), diachron::error::DiachronError>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod filter;
pub mod history;
pub mod index;
pub mod ingest;
pub mod lemma;

pub mod prelude {
    pub use crate::config::CorpusConfig;
    pub use crate::corpus::Corpus;
    pub use crate::error::{DiachronError, Result};
    pub use crate::filter::FilteringCriteria;
    pub use crate::history::{AuthorHistorical, TimeDescr, TimeSpan};
    pub use crate::index::{Index, Occurrence};
    pub use crate::lemma::{LemmaResolver, TableResolver};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
