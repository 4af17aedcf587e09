//! Lemma resolution: surface form to candidate headwords.
//!
//! The index only depends on the [`LemmaResolver`] trait. [`TableResolver`]
//! is a dictionary-backed implementation good enough to drive the pipeline;
//! richer lemmatizers plug in behind the same trait.

pub mod table;

pub use table::TableResolver;

/// Headword collecting every token no resolver could map.
pub const UNRESOLVED: &str = "UNRESOLVED";

/// Trait for anything able to map a surface form to its headwords.
pub trait LemmaResolver: Send + Sync {
    /// Candidate headwords for `form`, most likely first. Empty when unknown.
    fn resolve(&self, form: &str) -> Vec<String>;

    /// Like [`resolve`](Self::resolve), but returns `fallback` when nothing
    /// matches.
    fn resolve_or_default(&self, form: &str, fallback: &[&str]) -> Vec<String> {
        let headwords = self.resolve(form);
        if headwords.is_empty() {
            fallback.iter().map(|s| s.to_string()).collect()
        } else {
            headwords
        }
    }
}

impl<T: LemmaResolver + ?Sized> LemmaResolver for Box<T> {
    fn resolve(&self, form: &str) -> Vec<String> {
        (**self).resolve(form)
    }
}

impl<T: LemmaResolver + ?Sized> LemmaResolver for std::sync::Arc<T> {
    fn resolve(&self, form: &str) -> Vec<String> {
        (**self).resolve(form)
    }
}
