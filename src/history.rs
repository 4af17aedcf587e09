//! Historical time model.
//!
//! Dates in the corpus are labeled centuries (`5a` is the fifth century BC,
//! `2d` the second century AC). This module parses them, orders them, expands
//! spans into the centuries they cover, and maps authors to their spans.

pub mod authors;
pub mod span;
pub mod time;

pub use authors::AuthorHistorical;
pub use span::TimeSpan;
pub use time::{Era, TimeDescr, before, parse_time};
