use async_trait::async_trait;

use aura_types::{BrainstormIdea, DocumentOutline, Language, TriageVerdict};

use crate::errors::ReasonerError;
use crate::types::{ChatRequest, ChatStream};

/// The Reasoning Service the kernel calls out to. Every operation is
/// fallible; callers catch and degrade (default classification, empty subtask
/// list, error text in the transcript) rather than crash the kernel.
#[async_trait]
pub trait Reasoner: Send + Sync {
    /// Streamed chat generation over the transcript.
    async fn chat(&self, request: ChatRequest) -> Result<ChatStream, ReasonerError>;

    /// Classify a raw user command into a task category plus goal/reasoning.
    async fn triage(&self, command: &str) -> Result<TriageVerdict, ReasonerError>;

    /// Ordered subtask titles for a goal.
    async fn decompose_goal(&self, goal: &str) -> Result<Vec<String>, ReasonerError>;

    /// Raw source (no markdown fences) achieving `goal` in `language`.
    async fn generate_code(&self, language: Language, goal: &str)
        -> Result<String, ReasonerError>;

    /// Python source that checks a mathematical claim and prints a verdict.
    async fn math_verification_code(&self, claim: &str) -> Result<String, ReasonerError>;

    /// Chapter outline for a document-forge goal.
    async fn document_outline(&self, goal: &str) -> Result<DocumentOutline, ReasonerError>;

    /// Markdown body for one chapter, given the surrounding context.
    async fn chapter_content(&self, title: &str, context: &str) -> Result<String, ReasonerError>;

    /// Persona-attributed ideas on a topic.
    async fn brainstorm(
        &self,
        topic: &str,
        personas: &[String],
    ) -> Result<Vec<BrainstormIdea>, ReasonerError>;
}
