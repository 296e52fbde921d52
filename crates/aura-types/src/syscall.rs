use serde::{Deserialize, Serialize};

use crate::forge::{ForgeStatus, ForgedDocument};
use crate::goal::{GoalId, GoalStatus, GoalTree};
use crate::history::{EntryId, Feedback, HistoryEntry};
use crate::task::{Language, Task, TraceId};

/// Why a task entered the running slot without going through FIFO promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BypassReason {
    /// A crystallized-skill trigger matched the raw command.
    Reflex,
    /// An operator forced immediate execution.
    Forced,
}

/// The sole mutation primitive. A closed, enumerable union so the action log
/// can be replayed deterministically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum Syscall {
    EnqueueTask { task: Task },
    /// Move the queue head into the running slot. No-op when the slot is
    /// occupied or the queue is empty, so redundant invocation is safe.
    PromoteHead,
    /// Install a task directly, outside FIFO discipline. When the slot is
    /// occupied the task is pushed to the front of the queue instead, so the
    /// at-most-one invariant holds.
    SetRunningTask { task: Task, bypass: BypassReason },
    ClearRunningTask,
    /// Zero-latency chaining: replace the completed task with its follow-up
    /// without returning to the scheduler.
    ReplaceRunningTask { task: Task },
    AppendHistory { entry: HistoryEntry },
    AnnotateFeedback { entry: EntryId, feedback: Feedback },
    SetPaused { paused: bool },
    BumpTick,
    RecordTaskFrequency { kind: String },
    PlantGoalTree { tree: GoalTree },
    SetGoalStatus { goal: GoalId, status: GoalStatus },
    SetForgeStatus { status: ForgeStatus },
    SetForgeDocument { document: ForgedDocument },
    RecordSandboxRun {
        language: Language,
        code: String,
        result: String,
    },
}

impl Syscall {
    /// Stable name of the call, for logging and frequency accounting.
    pub fn name(&self) -> &'static str {
        match self {
            Syscall::EnqueueTask { .. } => "enqueue_task",
            Syscall::PromoteHead => "promote_head",
            Syscall::SetRunningTask { .. } => "set_running_task",
            Syscall::ClearRunningTask => "clear_running_task",
            Syscall::ReplaceRunningTask { .. } => "replace_running_task",
            Syscall::AppendHistory { .. } => "append_history",
            Syscall::AnnotateFeedback { .. } => "annotate_feedback",
            Syscall::SetPaused { .. } => "set_paused",
            Syscall::BumpTick => "bump_tick",
            Syscall::RecordTaskFrequency { .. } => "record_task_frequency",
            Syscall::PlantGoalTree { .. } => "plant_goal_tree",
            Syscall::SetGoalStatus { .. } => "set_goal_status",
            Syscall::SetForgeStatus { .. } => "set_forge_status",
            Syscall::SetForgeDocument { .. } => "set_forge_document",
            Syscall::RecordSandboxRun { .. } => "record_sandbox_run",
        }
    }
}

/// Journal envelope for a dispatched syscall. `seq` is assigned by the store
/// at dispatch time and is dense and monotonic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub seq: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<TraceId>,
    pub syscall: Syscall,
}
