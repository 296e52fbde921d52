use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::reasoning::TriageVerdict;

/// Unique identifier for a [`Task`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Diagnostic correlation id threading a user action through the tasks,
/// history entries and journal actions it causes. Random, no uniqueness
/// enforcement beyond generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraceId(Uuid);

impl TraceId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Presentation mode for a chat generation task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    Plain,
    Vision,
    GapAnalysis,
}

/// Languages the sandboxed code runtime can execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Python,
    Ruby,
    Lua,
    Scheme,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Ruby => "ruby",
            Language::Lua => "lua",
            Language::Scheme => "scheme",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "python" | "py" => Ok(Language::Python),
            "ruby" | "rb" => Ok(Language::Ruby),
            "lua" => Ok(Language::Lua),
            "scheme" | "scm" => Ok(Language::Scheme),
            other => Err(format!("unknown language '{other}'")),
        }
    }
}

/// A unit of asynchronous work. Immutable once created; the executor promotes
/// each id at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub kind: TaskKind,
    pub created_at_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<TraceId>,
}

impl Task {
    pub fn new(kind: TaskKind) -> Self {
        Self {
            id: TaskId::random(),
            kind,
            created_at_ms: crate::now_ms(),
            trace_id: None,
        }
    }

    pub fn with_trace(mut self, trace: TraceId) -> Self {
        self.trace_id = Some(trace);
        self
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }
}

/// Task payloads, one variant per handler the executor knows about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskKind {
    /// Append the raw user utterance to the transcript.
    RecordPercept { input: String },
    /// Stream a chat reply from the Reasoning Service into one bot entry.
    GenerateChatResponse {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        strategy: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mode: Option<ChatMode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prompt_override: Option<String>,
    },
    /// Run code in the sandbox; when `code` is absent the Reasoning Service
    /// generates it from `goal` first.
    ExecuteCode {
        language: Language,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<String>,
        goal: String,
    },
    /// Decompose a goal into subtasks, plant a goal tree, and chain a
    /// gap-analysis chat follow-up.
    DecomposeStrategicGoal { triage: TriageVerdict },
    /// Generate verification code for a claim, run it, explain the outcome.
    VerifyMathClaim { claim: String },
    /// Multi-stage document generation with per-chapter progress updates.
    ForgeDocument { goal: String },
    /// Persona-driven idea generation.
    Brainstorm { topic: String, personas: Vec<String> },
    /// Run a pre-registered skill body without consulting the Reasoning
    /// Service (the reflex fast path).
    ExecuteCrystallizedSkill { skill: String, command: String },
}

impl TaskKind {
    pub fn name(&self) -> &'static str {
        match self {
            TaskKind::RecordPercept { .. } => "record_percept",
            TaskKind::GenerateChatResponse { .. } => "generate_chat_response",
            TaskKind::ExecuteCode { .. } => "execute_code",
            TaskKind::DecomposeStrategicGoal { .. } => "decompose_strategic_goal",
            TaskKind::VerifyMathClaim { .. } => "verify_math_claim",
            TaskKind::ForgeDocument { .. } => "forge_document",
            TaskKind::Brainstorm { .. } => "brainstorm",
            TaskKind::ExecuteCrystallizedSkill { .. } => "execute_crystallized_skill",
        }
    }
}
