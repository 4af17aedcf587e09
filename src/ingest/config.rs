//! Configuration for the ingestion pipeline.

use serde::{Deserialize, Serialize};

/// How worker output reaches the final index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestMode {
    /// Workers send every occurrence over a channel to a single aggregator
    /// thread, which owns the index.
    #[default]
    Aggregator,
    /// Each file builds its own partial index; partials are merged at the end.
    Sharded,
}

impl std::str::FromStr for IngestMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aggregator" => Ok(IngestMode::Aggregator),
            "sharded" => Ok(IngestMode::Sharded),
            other => Err(format!("unknown ingest mode: {other}")),
        }
    }
}

/// Settings for [`IngestPipeline`](crate::ingest::IngestPipeline).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub mode: IngestMode,
    /// Worker threads; defaults to the number of CPUs.
    pub threads: Option<usize>,
}

impl IngestConfig {
    pub fn with_mode(mut self, mode: IngestMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn thread_count(&self) -> usize {
        self.threads.filter(|&n| n > 0).unwrap_or_else(num_cpus::get)
    }
}
