pub mod fs;
pub mod mem;

use thiserror::Error;

/// Monotonic cursor assigned to every persisted action.
pub type JournalSeq = u64;

/// Owned entry returned by journal readers. The payload is the JSON encoding
/// of an [`aura_types::Action`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub seq: JournalSeq,
    pub payload: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("corrupt entry: {0}")]
    Corrupt(String),
}

/// Uniform interface implemented by concrete journal backends (filesystem,
/// in-memory) so the store can target a single abstraction.
pub trait Journal: Send {
    fn append(&mut self, payload: &[u8]) -> Result<JournalSeq, JournalError>;

    /// Loads entries starting at `from` (inclusive). Passing 0 returns the
    /// full log.
    fn load_from(&self, from: JournalSeq) -> Result<Vec<JournalEntry>, JournalError>;

    /// Returns the next sequence that will be assigned on append.
    fn next_seq(&self) -> JournalSeq;
}
