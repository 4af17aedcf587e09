//! The headword index.
//!
//! An [`Index`] maps each headword to the surface forms it was attested
//! under, and each form to the list of places it occurred. It is built once
//! by the [`ingest`](crate::ingest) pipeline and then only read; filtering
//! and merging produce new, independent indices.

pub mod inverted;
pub mod occurrence;
pub mod stats;

pub use inverted::Index;
pub use occurrence::Occurrence;
pub use stats::IndexStats;
