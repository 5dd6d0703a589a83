//! Ingestion error taxonomy.
//!
//! Pipeline-level failures ([`IngestError`]) abort only their own ingestion
//! pass and are handed to whatever drives startup. Per-record problems are
//! values ([`MalformedRecord`]) collected in the ingestion reports; they never
//! abort a batch.

use std::path::PathBuf;

use serde::Serialize;

#[derive(thiserror::Error, Debug)]
pub enum IngestError {
    /// The launch feed could not be fetched or was not a JSON array.
    #[error("failed to download launch data from {url}: {reason}")]
    FetchFailure { url: String, reason: String },

    /// The planet dataset could not be opened or read.
    #[error("planet dataset unavailable at {}: {source}", .path.display())]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The launch store rejected the batch write.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl IngestError {
    pub fn fetch(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::FetchFailure {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn data_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DataUnavailable {
            path: path.into(),
            source,
        }
    }
}

/// A single launch record or planet row that was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedRecord {
    /// Zero-based position in the feed array, or data row number in the dataset.
    pub index: usize,
    pub reason: String,
}

impl std::fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "record {}: {}", self.index, self.reason)
    }
}
