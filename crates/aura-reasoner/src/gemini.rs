//! Gemini adapter: thin prompt-template + parse wrappers over the
//! `generateContent` endpoints. Chat uses the SSE streaming variant; every
//! other operation is a single-shot generation parsed by [`crate::parse`].

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::{Value, json};

use aura_types::{BrainstormIdea, DocumentOutline, Language, TriageVerdict};

use crate::errors::ReasonerError;
use crate::parse;
use crate::prompts;
use crate::provider::Reasoner;
use crate::types::{ChatChunk, ChatRequest, ChatStream};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const API_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Build from `GEMINI_API_KEY` / `GEMINI_BASE_URL` / `GEMINI_MODEL`.
    pub fn from_env() -> Result<Self, ReasonerError> {
        let api_key =
            std::env::var(API_KEY_VAR).map_err(|_| ReasonerError::MissingApiKey(API_KEY_VAR))?;
        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            config.model = model;
        }
        Ok(config)
    }
}

pub struct GeminiReasoner {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiReasoner {
    pub fn new(config: GeminiConfig) -> Result<Self, ReasonerError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ReasonerError::Transport(err.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, ReasonerError> {
        Self::new(GeminiConfig::from_env()?)
    }

    fn endpoint(&self, verb: &str) -> String {
        format!(
            "{}/models/{}:{verb}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn request_body(prompt: &str) -> Value {
        json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }]
        })
    }

    /// Single-shot generation returning the concatenated candidate text.
    async fn generate(&self, prompt: &str) -> Result<String, ReasonerError> {
        let response = self
            .client
            .post(self.endpoint("generateContent"))
            .query(&[("key", self.config.api_key.as_str())])
            .json(&Self::request_body(prompt))
            .send()
            .await
            .map_err(|err| ReasonerError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ReasonerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|err| ReasonerError::Parse(err.to_string()))?;
        candidate_text(&value)
            .ok_or_else(|| ReasonerError::Parse("response contained no candidate text".into()))
    }
}

/// Concatenated text parts of the first candidate, if any.
fn candidate_text(value: &Value) -> Option<String> {
    let parts = value
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    if text.is_empty() { None } else { Some(text) }
}

enum SseLine {
    Chunk(ChatChunk),
    Skip,
    Done,
}

fn parse_sse_line(line: &str) -> Result<SseLine, ReasonerError> {
    let Some(data) = line.strip_prefix("data:") else {
        return Ok(SseLine::Skip);
    };
    let data = data.trim();
    if data.is_empty() {
        return Ok(SseLine::Skip);
    }
    if data == "[DONE]" {
        return Ok(SseLine::Done);
    }
    let value: Value =
        serde_json::from_str(data).map_err(|err| ReasonerError::Parse(err.to_string()))?;
    match candidate_text(&value) {
        Some(text) => Ok(SseLine::Chunk(ChatChunk { text })),
        None => Ok(SseLine::Skip),
    }
}

struct SseState<S> {
    inner: S,
    buf: String,
}

/// Turn a raw byte stream of SSE frames into a [`ChatStream`].
fn sse_chat_stream<S, B, E>(inner: S) -> ChatStream
where
    S: futures::Stream<Item = Result<B, E>> + Send + Unpin + 'static,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
{
    let stream = futures::stream::unfold(
        SseState {
            inner,
            buf: String::new(),
        },
        |mut state| async move {
            loop {
                if let Some(pos) = state.buf.find('\n') {
                    let line = state.buf[..pos].trim_end_matches('\r').to_string();
                    state.buf.drain(..=pos);
                    match parse_sse_line(&line) {
                        Ok(SseLine::Chunk(chunk)) => return Some((Ok(chunk), state)),
                        Ok(SseLine::Skip) => continue,
                        Ok(SseLine::Done) => return None,
                        Err(err) => return Some((Err(err), state)),
                    }
                }
                match state.inner.next().await {
                    Some(Ok(bytes)) => {
                        state.buf.push_str(&String::from_utf8_lossy(bytes.as_ref()));
                    }
                    Some(Err(err)) => {
                        return Some((Err(ReasonerError::Transport(err.to_string())), state));
                    }
                    None => {
                        // Flush a final unterminated line, then end.
                        let line = std::mem::take(&mut state.buf);
                        let line = line.trim();
                        if line.is_empty() {
                            return None;
                        }
                        return match parse_sse_line(line) {
                            Ok(SseLine::Chunk(chunk)) => Some((Ok(chunk), state)),
                            Ok(_) => None,
                            Err(err) => Some((Err(err), state)),
                        };
                    }
                }
            }
        },
    );
    Box::pin(stream)
}

#[async_trait]
impl Reasoner for GeminiReasoner {
    async fn chat(&self, request: ChatRequest) -> Result<ChatStream, ReasonerError> {
        let prompt = prompts::chat(&request);
        let response = self
            .client
            .post(self.endpoint("streamGenerateContent"))
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("alt", "sse"),
            ])
            .json(&Self::request_body(&prompt))
            .send()
            .await
            .map_err(|err| ReasonerError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ReasonerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(sse_chat_stream(Box::pin(response.bytes_stream())))
    }

    async fn triage(&self, command: &str) -> Result<TriageVerdict, ReasonerError> {
        let raw = self.generate(&prompts::triage(command)).await?;
        parse::triage_verdict(&raw)
    }

    async fn decompose_goal(&self, goal: &str) -> Result<Vec<String>, ReasonerError> {
        let raw = self.generate(&prompts::decompose(goal)).await?;
        parse::subtask_list(&raw)
    }

    async fn generate_code(
        &self,
        language: Language,
        goal: &str,
    ) -> Result<String, ReasonerError> {
        let raw = self.generate(&prompts::generate_code(language, goal)).await?;
        Ok(parse::strip_code_fences(&raw))
    }

    async fn math_verification_code(&self, claim: &str) -> Result<String, ReasonerError> {
        let raw = self.generate(&prompts::math_verification(claim)).await?;
        Ok(parse::strip_code_fences(&raw))
    }

    async fn document_outline(&self, goal: &str) -> Result<DocumentOutline, ReasonerError> {
        let raw = self.generate(&prompts::outline(goal)).await?;
        parse::document_outline(&raw)
    }

    async fn chapter_content(&self, title: &str, context: &str) -> Result<String, ReasonerError> {
        self.generate(&prompts::chapter(title, context)).await
    }

    async fn brainstorm(
        &self,
        topic: &str,
        personas: &[String],
    ) -> Result<Vec<BrainstormIdea>, ReasonerError> {
        let raw = self.generate(&prompts::brainstorm(topic, personas)).await?;
        parse::brainstorm_ideas(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::collect_text;

    #[test]
    fn endpoint_joins_base_and_model() {
        let mut config = GeminiConfig::new("k");
        config.base_url = "https://example.test/v1beta/".into();
        config.model = "gemini-test".into();
        let reasoner = GeminiReasoner::new(config).unwrap();
        assert_eq!(
            reasoner.endpoint("generateContent"),
            "https://example.test/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn candidate_text_concatenates_parts() {
        let value = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Hello " }, { "text": "there" }] }
            }]
        });
        assert_eq!(candidate_text(&value).unwrap(), "Hello there");
        assert!(candidate_text(&json!({"candidates": []})).is_none());
    }

    #[tokio::test]
    async fn sse_stream_reassembles_split_frames() {
        let frame = json!({
            "candidates": [{ "content": { "parts": [{ "text": "chunk" }] } }]
        })
        .to_string();
        let full = format!("data: {frame}\n\ndata: [DONE]\n");
        let (left, right) = full.split_at(20);
        let frames: Vec<Result<String, std::convert::Infallible>> =
            vec![Ok(left.to_string()), Ok(right.to_string())];
        let stream = sse_chat_stream(futures::stream::iter(frames));
        assert_eq!(collect_text(stream).await.unwrap(), "chunk");
    }
}
