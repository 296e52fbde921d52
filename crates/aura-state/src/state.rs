use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use aura_types::{ForgeStatus, ForgedDocument, GoalTree, HistoryEntry, Language, Task};

/// Scheduling state: the FIFO queue and the single running slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KernelSlice {
    pub tick: u64,
    pub task_queue: Vec<Task>,
    pub running_task: Option<Task>,
    /// Execution counts per task kind, for observers.
    #[serde(default)]
    pub task_frequencies: IndexMap<String, u64>,
    #[serde(default)]
    pub sandbox: SandboxSlice,
}

/// Last code execution observed by the kernel, for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SandboxSlice {
    pub last_run: Option<SandboxRun>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SandboxRun {
    pub language: Language,
    pub code: String,
    pub result: String,
}

/// The append-only transcript.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySlice {
    pub entries: Vec<HistoryEntry>,
}

/// Goal trees planted by strategic decomposition, most recent last.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalSlice {
    pub trees: Vec<GoalTree>,
}

/// Document-forge progress and output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForgeSlice {
    pub status: ForgeStatus,
    pub document: Option<ForgedDocument>,
}

/// Session-wide flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSlice {
    pub paused: bool,
}

/// The whole state tree. Each field is a slice owned by exactly one reducer;
/// the root reducer composes them by shallow merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuraState {
    pub kernel: KernelSlice,
    pub history: HistorySlice,
    pub goals: GoalSlice,
    pub forge: ForgeSlice,
    pub session: SessionSlice,
}
