use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::task::TraceId;

/// Unique identifier for a [`HistoryEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Bot,
    System,
    Tool,
}

/// User feedback attached to an entry after the fact. The only mutation the
/// transcript permits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    Positive,
    Negative,
}

/// One record in the append-only transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: EntryId,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub created_at_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<TraceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
}

impl HistoryEntry {
    fn blank(role: Role) -> Self {
        Self {
            id: EntryId::random(),
            role,
            text: None,
            created_at_ms: crate::now_ms(),
            tool_name: None,
            tool_result: None,
            trace_id: None,
            feedback: None,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        let mut entry = Self::blank(Role::User);
        entry.text = Some(text.into());
        entry
    }

    pub fn bot(text: impl Into<String>) -> Self {
        let mut entry = Self::blank(Role::Bot);
        entry.text = Some(text.into());
        entry
    }

    pub fn system(text: impl Into<String>) -> Self {
        let mut entry = Self::blank(Role::System);
        entry.text = Some(text.into());
        entry
    }

    pub fn tool(name: impl Into<String>, result: impl Into<String>) -> Self {
        let mut entry = Self::blank(Role::Tool);
        entry.tool_name = Some(name.into());
        entry.tool_result = Some(result.into());
        entry
    }

    pub fn with_trace(mut self, trace: TraceId) -> Self {
        self.trace_id = Some(trace);
        self
    }

    /// Entry text for display: `text` for chat roles, the tool result for
    /// tool entries.
    pub fn display_text(&self) -> &str {
        self.text
            .as_deref()
            .or(self.tool_result.as_deref())
            .unwrap_or_default()
    }
}
