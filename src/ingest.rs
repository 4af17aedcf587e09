//! Concurrent corpus ingestion.
//!
//! The corpus is a directory tree laid out as `<root>/<author>/<document>.txt`.
//! [`IngestPipeline::load`] walks the tree, tokenizes every file on a worker
//! pool, resolves each token to its headwords and returns the finished
//! [`Index`](crate::index::Index).

pub mod config;
pub mod pipeline;
pub mod walker;

pub use config::{IngestConfig, IngestMode};
pub use pipeline::IngestPipeline;
pub use walker::discover_files;
