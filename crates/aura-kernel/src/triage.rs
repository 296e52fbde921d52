//! Task-type selection: one Reasoning Service call classifies the command,
//! a static table maps the category onto a task payload, and any failure
//! degrades to plain chat with nothing surfaced to the user.

use aura_reasoner::Reasoner;
use aura_types::{Language, TaskKind, TriageCategory, TriageVerdict};

const DEFAULT_PERSONAS: [&str; 3] = ["Optimist", "Skeptic", "Pragmatist"];

/// Classify a command, falling back to simple chat when the Reasoning
/// Service fails or returns something the schema rejects.
pub(crate) async fn classify(reasoner: &dyn Reasoner, command: &str) -> TriageVerdict {
    match reasoner.triage(command).await {
        Ok(verdict) => verdict,
        Err(err) => {
            log::warn!("triage failed for command, defaulting to chat: {err}");
            TriageVerdict::fallback(command)
        }
    }
}

/// Static category → task mapping.
pub(crate) fn task_for(verdict: &TriageVerdict) -> TaskKind {
    match verdict.category {
        TriageCategory::SimpleChat => TaskKind::GenerateChatResponse {
            strategy: None,
            mode: None,
            prompt_override: None,
        },
        TriageCategory::Vision => TaskKind::GenerateChatResponse {
            strategy: None,
            mode: Some(aura_types::ChatMode::Vision),
            prompt_override: None,
        },
        TriageCategory::CodeTask => TaskKind::ExecuteCode {
            language: Language::Python,
            code: verdict.code.clone(),
            goal: verdict.goal.clone(),
        },
        TriageCategory::SymbolicSolve => TaskKind::ExecuteCode {
            language: Language::Python,
            code: None,
            goal: verdict.goal.clone(),
        },
        TriageCategory::ComplexTask => TaskKind::DecomposeStrategicGoal {
            triage: verdict.clone(),
        },
        TriageCategory::MathProof => TaskKind::VerifyMathClaim {
            claim: verdict.goal.clone(),
        },
        TriageCategory::Brainstorm => TaskKind::Brainstorm {
            topic: verdict.goal.clone(),
            personas: DEFAULT_PERSONAS.iter().map(|p| p.to_string()).collect(),
        },
    }
}
