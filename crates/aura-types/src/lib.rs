//! Shared data model for the Aura cognitive kernel.
//!
//! Everything here is plain serde data: tasks and their typed payloads, the
//! append-only history transcript, goal trees, document-forge progress, triage
//! verdicts, and the closed [`Syscall`] union that is the sole way state is
//! mutated.

pub mod forge;
pub mod goal;
pub mod history;
pub mod reasoning;
pub mod syscall;
pub mod task;

pub use forge::{ChapterOutline, DocumentOutline, ForgeStatus, ForgedChapter, ForgedDocument};
pub use goal::{GoalId, GoalNode, GoalStatus, GoalTree};
pub use history::{EntryId, Feedback, HistoryEntry, Role};
pub use reasoning::{BrainstormIdea, TriageCategory, TriageVerdict};
pub use syscall::{Action, BypassReason, Syscall};
pub use task::{ChatMode, Language, Task, TaskId, TaskKind, TraceId};

/// Milliseconds since the Unix epoch, used to stamp tasks and history entries
/// at creation time (reducers never read the clock).
pub fn now_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
