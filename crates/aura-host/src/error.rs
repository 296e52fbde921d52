use thiserror::Error;

use aura_kernel::KernelError;
use aura_reasoner::ReasonerError;
use aura_state::{JournalError, StateError};

#[derive(Debug, Error)]
pub enum HostError {
    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),
    #[error("state error: {0}")]
    State(#[from] StateError),
    #[error("journal error: {0}")]
    Journal(#[from] JournalError),
    #[error("reasoner error: {0}")]
    Reasoner(#[from] ReasonerError),
    #[error("control channel closed")]
    ChannelClosed,
}
