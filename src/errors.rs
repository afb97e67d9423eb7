use std::io;

use thiserror::Error;

use crate::types::RecordId;

/// Error type for dataset ingestion failures.
///
/// View-state transitions and the derivation pipeline are total functions and
/// never return these; only the loading boundary can fail.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("failed to read dataset: {0}")]
    ReadDataset(#[from] io::Error),
    #[error("failed to parse dataset: {0}")]
    ParseDataset(#[from] serde_json::Error),
    #[error("duplicate record id {0} in dataset")]
    DuplicateRecordId(RecordId),
}
