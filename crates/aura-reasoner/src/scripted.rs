//! Scripted reasoner for tests: per-operation reply queues plus a call log so
//! tests can assert which operations ran (and which never did).

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use aura_types::{BrainstormIdea, DocumentOutline, Language, TriageVerdict};

use crate::errors::ReasonerError;
use crate::parse;
use crate::provider::Reasoner;
use crate::types::{ChatRequest, ChatStream, stream_from_chunks};

type Script<T> = Mutex<VecDeque<Result<T, String>>>;

#[derive(Default)]
pub struct ScriptedReasoner {
    chats: Script<Vec<String>>,
    /// Raw JSON text, run through the real parse/validate path.
    triages: Script<String>,
    decompositions: Script<Vec<String>>,
    code: Script<String>,
    verifications: Script<String>,
    outlines: Script<DocumentOutline>,
    chapters: Script<String>,
    ideas: Script<Vec<BrainstormIdea>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedReasoner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_chat<I, S>(&self, chunks: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.chats
            .lock()
            .unwrap()
            .push_back(Ok(chunks.into_iter().map(Into::into).collect()));
    }

    pub fn push_chat_failure(&self, message: impl Into<String>) {
        self.chats.lock().unwrap().push_back(Err(message.into()));
    }

    pub fn push_triage(&self, verdict: &TriageVerdict) {
        let raw = serde_json::to_string(verdict).expect("verdict serializes");
        self.push_triage_json(raw);
    }

    pub fn push_triage_json(&self, raw: impl Into<String>) {
        self.triages.lock().unwrap().push_back(Ok(raw.into()));
    }

    pub fn push_triage_failure(&self, message: impl Into<String>) {
        self.triages.lock().unwrap().push_back(Err(message.into()));
    }

    pub fn push_subtasks<I, S>(&self, subtasks: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.decompositions
            .lock()
            .unwrap()
            .push_back(Ok(subtasks.into_iter().map(Into::into).collect()));
    }

    pub fn push_subtasks_failure(&self, message: impl Into<String>) {
        self.decompositions
            .lock()
            .unwrap()
            .push_back(Err(message.into()));
    }

    pub fn push_code(&self, source: impl Into<String>) {
        self.code.lock().unwrap().push_back(Ok(source.into()));
    }

    pub fn push_code_failure(&self, message: impl Into<String>) {
        self.code.lock().unwrap().push_back(Err(message.into()));
    }

    pub fn push_verification_code(&self, source: impl Into<String>) {
        self.verifications
            .lock()
            .unwrap()
            .push_back(Ok(source.into()));
    }

    pub fn push_outline(&self, outline: DocumentOutline) {
        self.outlines.lock().unwrap().push_back(Ok(outline));
    }

    pub fn push_outline_failure(&self, message: impl Into<String>) {
        self.outlines.lock().unwrap().push_back(Err(message.into()));
    }

    pub fn push_chapter(&self, content: impl Into<String>) {
        self.chapters.lock().unwrap().push_back(Ok(content.into()));
    }

    pub fn push_ideas(&self, ideas: Vec<BrainstormIdea>) {
        self.ideas.lock().unwrap().push_back(Ok(ideas));
    }

    pub fn push_ideas_failure(&self, message: impl Into<String>) {
        self.ideas.lock().unwrap().push_back(Err(message.into()));
    }

    /// Operations invoked so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn take<T>(&self, script: &Script<T>, op: &'static str) -> Result<T, ReasonerError> {
        self.calls.lock().unwrap().push(op.to_string());
        match script.lock().unwrap().pop_front() {
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => Err(ReasonerError::Scripted(message)),
            None => Err(ReasonerError::ScriptExhausted(op)),
        }
    }
}

#[async_trait]
impl Reasoner for ScriptedReasoner {
    async fn chat(&self, _request: ChatRequest) -> Result<ChatStream, ReasonerError> {
        let chunks = self.take(&self.chats, "chat")?;
        Ok(stream_from_chunks(chunks))
    }

    async fn triage(&self, _command: &str) -> Result<TriageVerdict, ReasonerError> {
        let raw = self.take(&self.triages, "triage")?;
        parse::triage_verdict(&raw)
    }

    async fn decompose_goal(&self, _goal: &str) -> Result<Vec<String>, ReasonerError> {
        self.take(&self.decompositions, "decompose_goal")
    }

    async fn generate_code(
        &self,
        _language: Language,
        _goal: &str,
    ) -> Result<String, ReasonerError> {
        self.take(&self.code, "generate_code")
    }

    async fn math_verification_code(&self, _claim: &str) -> Result<String, ReasonerError> {
        self.take(&self.verifications, "math_verification_code")
    }

    async fn document_outline(&self, _goal: &str) -> Result<DocumentOutline, ReasonerError> {
        self.take(&self.outlines, "document_outline")
    }

    async fn chapter_content(
        &self,
        _title: &str,
        _context: &str,
    ) -> Result<String, ReasonerError> {
        self.take(&self.chapters, "chapter_content")
    }

    async fn brainstorm(
        &self,
        _topic: &str,
        _personas: &[String],
    ) -> Result<Vec<BrainstormIdea>, ReasonerError> {
        self.take(&self.ideas, "brainstorm")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::collect_text;
    use aura_types::TriageCategory;

    #[tokio::test]
    async fn scripted_replies_drain_in_order() {
        let reasoner = ScriptedReasoner::new();
        reasoner.push_chat(["a", "b"]);
        reasoner.push_chat_failure("boom");

        let first = reasoner.chat(ChatRequest::default()).await.unwrap();
        assert_eq!(collect_text(first).await.unwrap(), "ab");

        let second = reasoner.chat(ChatRequest::default()).await;
        assert!(matches!(second, Err(ReasonerError::Scripted(_))));

        let third = reasoner.chat(ChatRequest::default()).await;
        assert!(matches!(third, Err(ReasonerError::ScriptExhausted("chat"))));
        assert_eq!(reasoner.calls(), vec!["chat", "chat", "chat"]);
    }

    #[tokio::test]
    async fn triage_goes_through_real_parsing() {
        let reasoner = ScriptedReasoner::new();
        reasoner.push_triage_json(
            r#"{"category":"math_proof","goal":"prove it","reasoning":"proof request"}"#,
        );
        reasoner.push_triage_json("not json at all");

        let verdict = reasoner.triage("cmd").await.unwrap();
        assert_eq!(verdict.category, TriageCategory::MathProof);

        assert!(reasoner.triage("cmd").await.is_err());
    }
}
