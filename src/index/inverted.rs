//! Headword → form → occurrences mapping and its read operations.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};

use crate::index::occurrence::Occurrence;
use crate::index::stats::IndexStats;
use crate::lemma::UNRESOLVED;

type FormMap = AHashMap<String, Vec<Occurrence>>;

/// The inverted headword index.
///
/// Occurrence lists keep every appearance, including repeats of the same
/// token on the same line, so list lengths are frequencies.
///
/// ```
/// use diachron::index::{Index, Occurrence};
///
/// let mut index = Index::new();
/// index.insert("amo", "amat", Occurrence::from_parts("Catullus", "carmina", "c/carmina.txt", 0));
/// index.insert("amo", "amat", Occurrence::from_parts("Catullus", "carmina", "c/carmina.txt", 4));
/// index.insert("amo", "amant", Occurrence::from_parts("Catullus", "carmina", "c/carmina.txt", 9));
///
/// let forms = index.lookup("amo");
/// assert_eq!(forms["amat"], 2);
/// assert_eq!(index.total("amo"), 3);
/// assert!(index.lookup("rex").is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Index {
    entries: AHashMap<String, FormMap>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an occurrence of `form` under `headword`.
    pub fn insert(&mut self, headword: &str, form: &str, occurrence: Occurrence) {
        // Lookups first so the common case allocates no key strings
        if let Some(forms) = self.entries.get_mut(headword) {
            if let Some(list) = forms.get_mut(form) {
                list.push(occurrence);
                return;
            }
            forms.insert(form.to_string(), vec![occurrence]);
            return;
        }

        let mut forms = FormMap::new();
        forms.insert(form.to_string(), vec![occurrence]);
        self.entries.insert(headword.to_string(), forms);
    }

    /// Number of occurrences per form of `headword`. Empty when unknown.
    pub fn lookup(&self, headword: &str) -> BTreeMap<String, usize> {
        self.entries
            .get(headword)
            .map(|forms| {
                forms
                    .iter()
                    .map(|(form, list)| (form.clone(), list.len()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Total number of occurrences of `headword` across its forms.
    pub fn total(&self, headword: &str) -> usize {
        self.entries
            .get(headword)
            .map(|forms| forms.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    pub fn contains(&self, headword: &str) -> bool {
        self.entries.contains_key(headword)
    }

    pub fn keys(&self) -> BTreeSet<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn forms(&self, headword: &str) -> BTreeSet<&str> {
        self.entries
            .get(headword)
            .map(|forms| forms.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn form_data(&self, headword: &str, form: &str) -> &[Occurrence] {
        self.entries
            .get(headword)
            .and_then(|forms| forms.get(form))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct headwords.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn occurrence_count(&self) -> usize {
        self.entries
            .values()
            .flat_map(|forms| forms.values())
            .map(Vec::len)
            .sum()
    }

    /// Iterate over every (headword, form, occurrences) triple.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &[Occurrence])> {
        self.entries.iter().flat_map(|(headword, forms)| {
            forms
                .iter()
                .map(move |(form, list)| (headword.as_str(), form.as_str(), list.as_slice()))
        })
    }

    /// Copy of the index that keeps only occurrences by `authors`.
    ///
    /// Headwords and forms left without occurrences are dropped.
    pub fn filter_by_authors<I, S>(&self, authors: I) -> Index
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let authors: AHashSet<String> = authors
            .into_iter()
            .map(|a| a.as_ref().to_string())
            .collect();

        let mut filtered = Index::new();
        for (headword, form, list) in self.iter() {
            for occurrence in list.iter().filter(|o| authors.contains(o.author())) {
                filtered.insert(headword, form, occurrence.clone());
            }
        }
        filtered
    }

    /// Forms attested under two or more distinct headwords.
    pub fn ambiguous_forms(&self) -> BTreeSet<&str> {
        let mut seen: AHashSet<&str> = AHashSet::new();
        let mut ambiguous = BTreeSet::new();

        for forms in self.entries.values() {
            for form in forms.keys() {
                if !seen.insert(form.as_str()) {
                    ambiguous.insert(form.as_str());
                }
            }
        }
        ambiguous
    }

    /// Headwords used by every author in `authors` and by nobody else.
    ///
    /// A single occurrence by an outside author disqualifies a headword, no
    /// matter how often the target authors use it. [`UNRESOLVED`] is never
    /// part of the result, and an empty author set yields an empty result.
    pub fn exclusive_intersection<I, S>(&self, authors: I) -> BTreeSet<&str>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let targets: AHashSet<String> = authors
            .into_iter()
            .map(|a| a.as_ref().to_string())
            .collect();
        if targets.is_empty() {
            return BTreeSet::new();
        }

        let mut result = BTreeSet::new();
        'headwords: for (headword, forms) in &self.entries {
            if headword == UNRESOLVED {
                continue;
            }

            let mut used_by: AHashSet<&str> = AHashSet::new();
            for occurrence in forms.values().flatten() {
                if !targets.contains(occurrence.author()) {
                    continue 'headwords;
                }
                used_by.insert(occurrence.author());
            }

            if used_by.len() == targets.len() {
                result.insert(headword.as_str());
            }
        }
        result
    }

    /// Combine several indices into a new one.
    ///
    /// Under each (headword, form) pair, every (file, line) key keeps the
    /// largest number of records any single input holds for it. Repeats
    /// inside one input are genuine frequencies and survive, while the same
    /// line contributed by several inputs is counted once. The result does
    /// not depend on the order of the inputs, and merging an index with
    /// itself gives the index back.
    pub fn merge<'a, I>(indices: I) -> Index
    where
        I: IntoIterator<Item = &'a Index>,
    {
        let mut merged = Index::new();
        for index in indices {
            merged.absorb(index.clone());
        }
        merged
    }

    /// Move the contents of `other` into `self`, with the duplicate rule of
    /// [`merge`](Self::merge).
    pub fn absorb(&mut self, other: Index) {
        for (headword, forms) in other.entries {
            let target = self.entries.entry(headword).or_default();
            for (form, incoming) in forms {
                let list = target.entry(form).or_default();
                if list.is_empty() {
                    *list = incoming;
                    continue;
                }

                let mut held: AHashMap<(Arc<Path>, usize), usize> = AHashMap::new();
                for occurrence in list.iter() {
                    *held.entry(occurrence.dedup_key()).or_default() += 1;
                }

                // Only the surplus over what is already held is appended
                let mut arriving: AHashMap<(Arc<Path>, usize), usize> = AHashMap::new();
                for occurrence in incoming {
                    let key = occurrence.dedup_key();
                    let count = arriving.entry(key.clone()).or_default();
                    *count += 1;
                    if *count > held.get(&key).copied().unwrap_or(0) {
                        list.push(occurrence);
                    }
                }
            }
        }
    }

    pub fn stats(&self) -> IndexStats {
        let mut stats = IndexStats {
            ambiguous: self.ambiguous_forms().len(),
            ..IndexStats::default()
        };

        for forms in self.entries.values() {
            stats += IndexStats {
                headwords: 1,
                ambiguous: 0,
                forms: forms.len(),
                occurrences: forms.values().map(Vec::len).sum(),
            };
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occ(author: &str, file: &str, line: usize) -> Occurrence {
        Occurrence::from_parts(author, file, format!("{author}/{file}.txt"), line)
    }

    fn sample() -> Index {
        let mut index = Index::new();
        for line in 0..3 {
            index.insert("amo", "amat", occ("A", "one", line));
        }
        index.insert("amo", "amant", occ("A", "one", 5));
        index.insert("amo", "amant", occ("B", "two", 1));
        index.insert("lux", "lucem", occ("A", "one", 7));
        index.insert("lux", "lux", occ("B", "two", 2));
        index.insert("rex", "rex", occ("A", "one", 8));
        index.insert("rex", "regem", occ("B", "two", 3));
        index.insert("rex", "rex", occ("C", "three", 0));
        index
    }

    #[test]
    fn test_lookup() {
        let index = sample();
        let forms = index.lookup("amo");
        let expected: BTreeMap<String, usize> =
            [("amat".to_string(), 3), ("amant".to_string(), 2)].into();
        assert_eq!(forms, expected);
        assert_eq!(index.total("amo"), 5);
        assert_eq!(forms.values().sum::<usize>(), 5);
    }

    #[test]
    fn test_missing_keys_are_empty() {
        let index = sample();
        assert!(index.lookup("nox").is_empty());
        assert!(index.forms("nox").is_empty());
        assert!(index.form_data("amo", "amamus").is_empty());
        assert!(index.form_data("nox", "noctem").is_empty());
        assert_eq!(index.total("nox"), 0);
    }

    #[test]
    fn test_keys_and_forms() {
        let index = sample();
        assert_eq!(index.keys().into_iter().collect::<Vec<_>>(), vec!["amo", "lux", "rex"]);
        assert_eq!(
            index.forms("rex").into_iter().collect::<Vec<_>>(),
            vec!["regem", "rex"]
        );
        let data = index.form_data("amo", "amat");
        assert_eq!(data.len(), 3);
        assert_eq!(data.iter().map(Occurrence::line).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_filter_by_authors() {
        let index = sample();
        let only_a = index.filter_by_authors(["A"]);

        assert_eq!(only_a.total("amo"), 4);
        assert_eq!(only_a.lookup("amo")["amant"], 1);
        assert_eq!(only_a.total("rex"), 1);
        assert!(!only_a.forms("rex").contains("regem"));
        assert!(only_a.iter().all(|(_, _, list)| list.iter().all(|o| o.author() == "A")));

        // The source is untouched
        assert_eq!(index.total("amo"), 5);
    }

    #[test]
    fn test_filter_by_unknown_author_is_empty() {
        let index = sample();
        assert!(index.filter_by_authors(["Z"]).is_empty());
        assert!(index.filter_by_authors(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_ambiguous_forms() {
        let mut index = sample();
        assert!(index.ambiguous_forms().is_empty());

        index.insert("lux", "rex", occ("C", "three", 4));
        index.insert("sum", "est", occ("A", "one", 9));
        index.insert("edo", "est", occ("A", "one", 9));
        let ambiguous: Vec<_> = index.ambiguous_forms().into_iter().collect();
        assert_eq!(ambiguous, vec!["est", "rex"]);
    }

    #[test]
    fn test_exclusive_intersection() {
        let index = sample();
        let result = index.exclusive_intersection(["A", "B"]);
        // amo and lux are used by A and B only; rex is also used by C
        assert_eq!(result.into_iter().collect::<Vec<_>>(), vec!["amo", "lux"]);

        // Only rex is used by all three
        let result = index.exclusive_intersection(["A", "B", "C"]);
        assert_eq!(result.into_iter().collect::<Vec<_>>(), vec!["rex"]);
    }

    #[test]
    fn test_exclusive_intersection_requires_every_author() {
        let mut index = Index::new();
        index.insert("lux", "lux", occ("A", "one", 0));
        index.insert("lux", "lucem", occ("B", "two", 0));
        index.insert("nox", "nox", occ("A", "one", 1));
        index.insert("rex", "rex", occ("A", "one", 2));
        index.insert("rex", "rex", occ("B", "two", 2));
        index.insert("rex", "rex", occ("C", "three", 2));

        let result = index.exclusive_intersection(["A", "B"]);
        assert_eq!(result.into_iter().collect::<Vec<_>>(), vec!["lux"]);
        assert!(index.exclusive_intersection(Vec::<&str>::new()).is_empty());
    }

    #[test]
    fn test_exclusive_intersection_skips_unresolved() {
        let mut index = Index::new();
        index.insert(UNRESOLVED, "qwerty", occ("A", "one", 0));
        index.insert(UNRESOLVED, "qwerty", occ("B", "two", 0));
        assert!(index.exclusive_intersection(["A", "B"]).is_empty());
    }

    #[test]
    fn test_merge_combines_disjoint_indices() {
        let mut left = Index::new();
        left.insert("amo", "amat", occ("A", "one", 0));
        let mut right = Index::new();
        right.insert("amo", "amat", occ("B", "two", 0));
        right.insert("lux", "lux", occ("B", "two", 1));

        let merged = Index::merge([&left, &right]);
        assert_eq!(merged.total("amo"), 2);
        assert_eq!(merged.total("lux"), 1);
        assert_eq!(merged.occurrence_count(), 3);
    }

    #[test]
    fn test_merge_drops_duplicate_pair() {
        let shared = occ("A", "one", 3);
        let mut left = Index::new();
        left.insert("amo", "amat", shared.clone());
        left.insert("amo", "amat", occ("A", "one", 4));
        let mut right = Index::new();
        right.insert("amo", "amat", shared.clone());
        right.insert("amo", "amat", occ("A", "one", 5));

        let merged = Index::merge([&left, &right]);
        let lines: Vec<usize> = merged
            .form_data("amo", "amat")
            .iter()
            .map(Occurrence::line)
            .collect();
        assert_eq!(lines, vec![3, 4, 5]);
    }

    #[test]
    fn test_merge_is_order_independent() {
        let mut doubled = Index::new();
        doubled.insert("amo", "amat", occ("A", "one", 0));
        doubled.insert("amo", "amat", occ("A", "one", 0));
        doubled.insert("lux", "lux", occ("A", "one", 1));
        let mut single = Index::new();
        single.insert("amo", "amat", occ("A", "one", 0));
        single.insert("amo", "amat", occ("B", "two", 4));

        let forward = Index::merge([&doubled, &single]);
        let backward = Index::merge([&single, &doubled]);
        assert_eq!(forward.total("amo"), 3);
        assert_eq!(backward.total("amo"), 3);
        assert_eq!(forward.stats(), backward.stats());
        assert_eq!(forward.lookup("amo"), backward.lookup("amo"));
    }

    #[test]
    fn test_merge_with_itself_is_identity() {
        let index = sample();
        let merged = Index::merge([&index, &index]);
        assert_eq!(merged.stats(), index.stats());
        assert_eq!(merged.lookup("amo"), index.lookup("amo"));
    }

    #[test]
    fn test_merge_keeps_repeats_within_one_input() {
        // The same token twice on one line is two occurrences
        let mut index = Index::new();
        index.insert("amo", "amat", occ("A", "one", 0));
        index.insert("amo", "amat", occ("A", "one", 0));

        let merged = Index::merge([&index]);
        assert_eq!(merged.total("amo"), 2);
    }

    #[test]
    fn test_stats() {
        let mut index = sample();
        index.insert("lux", "rex", occ("C", "three", 4));
        let stats = index.stats();
        assert_eq!(
            stats,
            IndexStats {
                headwords: 3,
                ambiguous: 1,
                forms: 7,
                occurrences: 11,
            }
        );
        assert_eq!(Index::new().stats(), IndexStats::default());
    }
}
