use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use tempfile::{Builder, TempDir};

use diachron::analysis::LineTokenizer;
use diachron::index::{Index, Occurrence};
use diachron::ingest::{IngestConfig, IngestMode, IngestPipeline, discover_files};
use diachron::lemma::{LemmaResolver, TableResolver, UNRESOLVED};

const WORDS: [&str; 8] = ["amat", "Amant", "lux", "rex", "regem", "bellum", "Rōma", "qwerty"];

fn resolver() -> Arc<dyn LemmaResolver> {
    Arc::new(TableResolver::from_pairs([
        ("amat", "amo"),
        ("amant", "amo"),
        ("lux", "lux"),
        ("rex", "rex"),
        ("regem", "rex"),
        ("bellum", "bellum"),
        ("roma", "Roma"),
    ]))
}

fn build_corpus() -> TempDir {
    let dir = Builder::new().prefix("test_ingest").tempdir().unwrap();
    for author in 0..4 {
        let author_dir = dir.path().join(format!("Author{author}"));
        fs::create_dir_all(&author_dir).unwrap();
        for document in 0..3 {
            let mut text = String::new();
            for line in 0..25 {
                let width = (author + document + line) % 6;
                let words: Vec<&str> = (0..width)
                    .map(|i| WORDS[(author * 7 + document * 3 + line + i) % WORDS.len()])
                    .collect();
                text.push_str(&words.join(", "));
                text.push('\n');
            }
            fs::write(author_dir.join(format!("opus{document}.txt")), text).unwrap();
        }
    }
    dir
}

fn load(root: &Path, mode: IngestMode, threads: usize) -> Index {
    let config = IngestConfig::default().with_mode(mode).with_threads(threads);
    IngestPipeline::new(config, resolver())
        .unwrap()
        .load(root)
        .unwrap()
}

fn count_tokens(root: &Path) -> usize {
    discover_files(root)
        .unwrap()
        .iter()
        .map(|path| {
            LineTokenizer::new(BufReader::new(File::open(path).unwrap()))
                .map(|line| line.unwrap().1.len())
                .sum::<usize>()
        })
        .sum()
}

#[test]
fn test_repeated_loads_agree() {
    let corpus = build_corpus();
    let reference = load(corpus.path(), IngestMode::Aggregator, 4);

    for (mode, threads) in [
        (IngestMode::Aggregator, 1),
        (IngestMode::Aggregator, 8),
        (IngestMode::Sharded, 1),
        (IngestMode::Sharded, 4),
    ] {
        let index = load(corpus.path(), mode, threads);
        assert_eq!(index.stats(), reference.stats(), "{mode:?} with {threads} threads");
        for headword in reference.keys() {
            assert_eq!(index.lookup(headword), reference.lookup(headword));
        }
    }
}

/// One partial index per file, built directly from the tokenizer.
fn partials(root: &Path, resolver: &dyn LemmaResolver) -> Vec<Index> {
    discover_files(root)
        .unwrap()
        .iter()
        .map(|path| {
            let author = path.parent().unwrap().file_name().unwrap().to_string_lossy().into_owned();
            let document = path.file_stem().unwrap().to_string_lossy().into_owned();
            let mut partial = Index::new();
            for line in LineTokenizer::new(BufReader::new(File::open(path).unwrap())) {
                let (line_number, words) = line.unwrap();
                for form in words {
                    for headword in resolver.resolve_or_default(&form, &[UNRESOLVED]) {
                        let occurrence = Occurrence::from_parts(&author, &document, path, line_number);
                        partial.insert(&headword, &form, occurrence);
                    }
                }
            }
            partial
        })
        .collect()
}

#[test]
fn test_merge_order_does_not_matter() {
    let corpus = build_corpus();
    let resolver = resolver();
    let parts = partials(corpus.path(), resolver.as_ref());
    let loaded = load(corpus.path(), IngestMode::Sharded, 2);

    let forward = Index::merge(parts.iter());
    let backward = Index::merge(parts.iter().rev());
    // Interleave odd and even positions as a fixed shuffle
    let shuffled = Index::merge(parts.iter().skip(1).step_by(2).chain(parts.iter().step_by(2)));

    for merged in [&forward, &backward, &shuffled] {
        assert_eq!(merged.stats(), loaded.stats());
        for headword in loaded.keys() {
            assert_eq!(merged.lookup(headword), loaded.lookup(headword));
        }
    }

    // Feeding every partial twice changes nothing
    let twice = Index::merge(parts.iter().chain(parts.iter().rev()));
    assert_eq!(twice.stats(), loaded.stats());
}

#[test]
fn test_every_token_is_indexed_once() {
    let corpus = build_corpus();
    let index = load(corpus.path(), IngestMode::Sharded, 3);

    // No form in the table has two headwords, so each token lands exactly once
    let tokens = count_tokens(corpus.path());
    assert!(tokens > 0);
    assert_eq!(index.occurrence_count(), tokens);

    let per_author: usize = (0..4)
        .map(|author| {
            index
                .filter_by_authors([format!("Author{author}")])
                .occurrence_count()
        })
        .sum();
    assert_eq!(per_author, tokens);
}

#[test]
fn test_invalid_utf8_is_decoded_lossily() {
    let corpus = build_corpus();
    fs::write(corpus.path().join("Author0/broken.txt"), [0xff, 0xfe, b'\n', b'l', b'u', b'x']).unwrap();

    let index = load(corpus.path(), IngestMode::Aggregator, 2);
    let broken: Vec<_> = index
        .form_data("lux", "lux")
        .iter()
        .filter(|o| o.document() == "broken")
        .collect();
    assert_eq!(broken.len(), 1);
    assert_eq!(broken[0].line(), 1);
}
