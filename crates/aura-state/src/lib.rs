//! State store for the Aura kernel: an immutable state tree mutated only by
//! pure slice reducers responding to [`aura_types::Syscall`] actions, with
//! every dispatched action recorded in an append-only journal before it is
//! applied.

pub mod error;
pub mod journal;
pub mod reducers;
pub mod state;
pub mod store;

pub use error::StateError;
pub use journal::{Journal, JournalEntry, JournalError};
pub use state::{
    AuraState, ForgeSlice, GoalSlice, HistorySlice, KernelSlice, SandboxRun, SandboxSlice,
    SessionSlice,
};
pub use store::Store;
