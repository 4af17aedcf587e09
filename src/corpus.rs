//! The query surface over a loaded corpus.
//!
//! A [`Corpus`] bundles the index with the resolver that built it and the
//! author reference data. Every query takes a [`FilteringCriteria`], applies
//! it to the index first, and returns a serializable payload.

pub mod lines;
pub mod payload;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::analysis::normalize_token;
use crate::config::CorpusConfig;
use crate::error::Result;
use crate::filter::FilteringCriteria;
use crate::history::AuthorHistorical;
use crate::index::{Index, IndexStats, Occurrence};
use crate::ingest::IngestPipeline;
use crate::lemma::{LemmaResolver, TableResolver, UNRESOLVED};

pub use payload::{FormCount, LemmaCount, OccurrenceLine};

/// A loaded, read-only corpus.
pub struct Corpus {
    index: Index,
    resolver: Arc<dyn LemmaResolver>,
    history: AuthorHistorical,
}

impl Corpus {
    pub fn new(index: Index, resolver: Arc<dyn LemmaResolver>, history: AuthorHistorical) -> Self {
        Corpus {
            index,
            resolver,
            history,
        }
    }

    /// Load the lemma table, the author reference and the corpus tree
    /// described by `config`.
    pub fn load(config: &CorpusConfig) -> Result<Self> {
        config.validate()?;

        let resolver: Arc<dyn LemmaResolver> = Arc::new(TableResolver::from_path(&config.lemmas)?);
        let history = match &config.authors {
            Some(path) => AuthorHistorical::from_path(path)?,
            None => AuthorHistorical::new(),
        };

        let pipeline = IngestPipeline::new(config.ingest.clone(), Arc::clone(&resolver))?;
        let index = pipeline.load(&config.data_dir)?;
        Ok(Corpus::new(index, resolver, history))
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn history(&self) -> &AuthorHistorical {
        &self.history
    }

    /// Criteria for one request, see [`FilteringCriteria::from_request`].
    pub fn criteria(&self, author_list: Option<&str>, date: Option<&str>) -> Result<FilteringCriteria> {
        FilteringCriteria::from_request(author_list, date, &self.history)
    }

    /// Occurrence counts of a headword, broken down by form.
    pub fn count_lemma(&self, criteria: &FilteringCriteria, lemma: &str) -> LemmaCount {
        let view = criteria.apply(&self.index);
        let lemma = lemma.trim();
        let forms = view.lookup(lemma);
        LemmaCount {
            lemma: lemma.to_string(),
            total: forms.values().sum(),
            forms,
        }
    }

    /// Occurrence count of a surface form and the headwords it resolves to.
    ///
    /// A form is stored once under each of its candidate headwords, so the
    /// largest of those counts is the number of times it appears.
    pub fn count_form(&self, criteria: &FilteringCriteria, form: &str) -> FormCount {
        let view = criteria.apply(&self.index);
        let form = normalize_token(form);
        let lemmas = self.resolver.resolve_or_default(&form, &[UNRESOLVED]);
        let total = lemmas
            .iter()
            .map(|lemma| view.form_data(lemma, &form).len())
            .max()
            .unwrap_or(0);
        FormCount {
            form,
            total,
            lemmas,
        }
    }

    /// Every line where some form of `lemma` occurs.
    pub fn occurrences_lemma(&self, criteria: &FilteringCriteria, lemma: &str) -> Vec<OccurrenceLine> {
        let view = criteria.apply(&self.index);
        let lemma = lemma.trim();
        let records = view
            .forms(lemma)
            .into_iter()
            .flat_map(|form| view.form_data(lemma, form).iter().cloned())
            .collect();
        lines::render(records)
    }

    /// Every line where `form` occurs, under any of its headwords.
    pub fn occurrences_form(&self, criteria: &FilteringCriteria, form: &str) -> Vec<OccurrenceLine> {
        let view = criteria.apply(&self.index);
        let form = normalize_token(form);
        let records: Vec<Occurrence> = self
            .resolver
            .resolve_or_default(&form, &[UNRESOLVED])
            .iter()
            .flat_map(|lemma| view.form_data(lemma, &form).iter().cloned())
            .collect();
        lines::render(records)
    }

    /// Headwords shared by all of `authors` and by nobody else in the view.
    pub fn exclusive_intersection<S: AsRef<str>>(
        &self,
        criteria: &FilteringCriteria,
        authors: &[S],
    ) -> Vec<String> {
        let view = criteria.apply(&self.index);
        view.exclusive_intersection(authors.iter().map(AsRef::<str>::as_ref))
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Ambiguous forms, each with the headwords it is attested under.
    pub fn ambiguous_forms(&self, criteria: &FilteringCriteria) -> BTreeMap<String, Vec<String>> {
        let view = criteria.apply(&self.index);
        let ambiguous = view.ambiguous_forms();

        let mut result: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (headword, form, _) in view.iter() {
            if ambiguous.contains(form) {
                result
                    .entry(form.to_string())
                    .or_default()
                    .insert(headword.to_string());
            }
        }
        result
            .into_iter()
            .map(|(form, headwords)| (form, headwords.into_iter().collect()))
            .collect()
    }

    pub fn stats(&self, criteria: &FilteringCriteria) -> IndexStats {
        criteria.apply(&self.index).stats()
    }
}
