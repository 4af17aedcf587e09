//! Text normalization for the corpus.
//!
//! Ingestion and queries must agree on how a word is spelled, so both go
//! through the functions in this module.

pub mod normalize;
pub mod tokenizer;

pub use normalize::{fold, normalize_display_line, normalize_line, normalize_token};
pub use tokenizer::LineTokenizer;
