use serde::{Deserialize, Serialize};

/// Categories the triage step can assign to a raw user command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriageCategory {
    SimpleChat,
    CodeTask,
    ComplexTask,
    MathProof,
    Brainstorm,
    Vision,
    SymbolicSolve,
}

/// Result of classifying a user command. Produced by the Reasoning Service
/// under a JSON schema; a failed or malformed classification degrades to
/// [`TriageVerdict::fallback`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageVerdict {
    pub category: TriageCategory,
    pub goal: String,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl TriageVerdict {
    /// Default verdict when classification fails: treat the command as plain
    /// chat so the user sees normal behavior with no error surfaced.
    pub fn fallback(command: &str) -> Self {
        Self {
            category: TriageCategory::SimpleChat,
            goal: command.to_string(),
            reasoning: "classification unavailable, defaulting to chat".into(),
            code: None,
        }
    }
}

/// One persona's contribution to a brainstorming session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrainstormIdea {
    pub persona: String,
    pub idea: String,
}
