use thiserror::Error;

use crate::journal::JournalError;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("journal error: {0}")]
    Journal(#[from] JournalError),
    #[error("failed to decode journal action: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("journal replay out of order: expected seq {expected}, found {found}")]
    ReplayGap { expected: u64, found: u64 },
}
