//! The ingestion pipeline.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Instant;

use crossbeam_channel::unbounded;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::analysis::LineTokenizer;
use crate::error::{DiachronError, Result};
use crate::index::{Index, Occurrence};
use crate::ingest::config::{IngestConfig, IngestMode};
use crate::ingest::walker::discover_files;
use crate::lemma::{LemmaResolver, UNRESOLVED};

/// The unit a worker hands to the aggregator: one token and where it was seen.
#[derive(Debug, Clone)]
struct Posting {
    form: String,
    headwords: Vec<String>,
    occurrence: Occurrence,
}

/// Builds an [`Index`] from a corpus directory.
pub struct IngestPipeline {
    config: IngestConfig,
    resolver: Arc<dyn LemmaResolver>,
    thread_pool: ThreadPool,
}

impl IngestPipeline {
    /// Create a pipeline with its own worker pool.
    pub fn new(config: IngestConfig, resolver: Arc<dyn LemmaResolver>) -> Result<Self> {
        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(config.thread_count())
            .thread_name(|i| format!("ingest-worker-{i}"))
            .build()
            .map_err(|e| DiachronError::internal(format!("Failed to create thread pool: {e}")))?;

        Ok(IngestPipeline {
            config,
            resolver,
            thread_pool,
        })
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Index every file below `root`.
    ///
    /// Files that cannot be opened are logged and skipped. A failure to
    /// enumerate the tree aborts the load before any file is read.
    pub fn load<P: AsRef<Path>>(&self, root: P) -> Result<Index> {
        let root = root.as_ref();

        log::info!("Starting path discovery in {}", root.display());
        let files = discover_files(root).inspect_err(|e| {
            log::error!("Error walking the tree: {e}");
        })?;
        log::info!("Path discovery terminated: {} files", files.len());

        let started = Instant::now();
        let index = match self.config.mode {
            IngestMode::Aggregator => self.load_aggregated(&files)?,
            IngestMode::Sharded => self.load_sharded(&files),
        };

        log::info!(
            "Data gathering terminated: {} headwords, {} occurrences in {:?}",
            index.len(),
            index.occurrence_count(),
            started.elapsed()
        );
        Ok(index)
    }

    /// One task per file, all feeding a single aggregator that owns the index.
    fn load_aggregated(&self, files: &[PathBuf]) -> Result<Index> {
        let (sender, receiver) = unbounded::<Posting>();

        let aggregator = thread::Builder::new()
            .name("ingest-aggregator".to_string())
            .spawn(move || {
                let mut index = Index::new();
                for posting in receiver {
                    for headword in &posting.headwords {
                        index.insert(headword, &posting.form, posting.occurrence.clone());
                    }
                }
                index
            })?;

        let skipped = AtomicUsize::new(0);
        let resolver = self.resolver.as_ref();
        self.thread_pool.scope(|scope| {
            for path in files {
                let sender = sender.clone();
                let skipped = &skipped;
                scope.spawn(move |_| {
                    let result = read_file(path, resolver, |posting| {
                        if sender.send(posting).is_err() {
                            log::error!("Aggregator is gone, dropping output of {}", path.display());
                        }
                    });
                    if let Err(e) = result {
                        log::warn!("Skipping file: {e}");
                        skipped.fetch_add(1, Ordering::Relaxed);
                    }
                });
            }
        });

        // Every producer has finished; closing the channel lets the aggregator drain and exit
        drop(sender);
        let index = aggregator
            .join()
            .map_err(|_| DiachronError::ThreadJoinError("ingest aggregator panicked".to_string()))?;

        log_skipped(skipped.into_inner());
        Ok(index)
    }

    /// Per-file partial indices, reduced with [`Index::absorb`].
    ///
    /// Every file lands in exactly one partial, so the merge never sees the
    /// same source line twice and keeps every occurrence.
    fn load_sharded(&self, files: &[PathBuf]) -> Index {
        let skipped = AtomicUsize::new(0);
        let resolver = self.resolver.as_ref();

        let index = self.thread_pool.install(|| {
            files
                .par_iter()
                .map(|path| {
                    let mut partial = Index::new();
                    let result = read_file(path, resolver, |posting| {
                        for headword in &posting.headwords {
                            partial.insert(headword, &posting.form, posting.occurrence.clone());
                        }
                    });
                    if let Err(e) = result {
                        log::warn!("Skipping file: {e}");
                        skipped.fetch_add(1, Ordering::Relaxed);
                    }
                    partial
                })
                .reduce(Index::new, |mut left, right| {
                    left.absorb(right);
                    left
                })
        });

        log_skipped(skipped.into_inner());
        index
    }
}

fn log_skipped(skipped: usize) {
    if skipped > 0 {
        log::warn!("{skipped} files could not be read");
    }
}

/// Author is the parent directory name, document the file stem.
fn source_of(path: &Path) -> (Arc<str>, Arc<str>) {
    let author = path
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let document = path
        .file_stem()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    (Arc::from(author), Arc::from(document))
}

/// Tokenize one file, handing each resolved token to `emit`.
///
/// Returns the number of tokens read. Output emitted before a read error is
/// kept.
fn read_file<F>(path: &Path, resolver: &dyn LemmaResolver, mut emit: F) -> Result<usize>
where
    F: FnMut(Posting),
{
    let file = File::open(path).map_err(|e| DiachronError::file_access(path, e))?;
    let (author, document) = source_of(path);
    let shared_path: Arc<Path> = Arc::from(path);

    let mut tokens = 0usize;
    for line in LineTokenizer::new(BufReader::new(file)) {
        let (line_number, words) = line.map_err(|e| DiachronError::file_access(path, e))?;
        for form in words {
            let headwords = resolver.resolve_or_default(&form, &[UNRESOLVED]);
            let occurrence = Occurrence::new(
                Arc::clone(&author),
                Arc::clone(&document),
                Arc::clone(&shared_path),
                line_number,
            );
            emit(Posting {
                form,
                headwords,
                occurrence,
            });
            tokens += 1;
        }
    }

    log::debug!("Read {tokens} tokens from {}", path.display());
    Ok(tokens)
}
