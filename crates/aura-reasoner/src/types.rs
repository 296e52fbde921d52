//! Request and streaming types shared by all reasoner adapters.

use std::pin::Pin;

use futures::{Stream, StreamExt};

use aura_types::{ChatMode, HistoryEntry};

use crate::errors::ReasonerError;

/// Input to a chat generation: the transcript so far plus optional strategy
/// context, presentation mode, and a full prompt override.
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub history: Vec<HistoryEntry>,
    pub strategy: Option<String>,
    pub mode: Option<ChatMode>,
    pub prompt_override: Option<String>,
}

/// One incremental piece of a streamed chat reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatChunk {
    pub text: String,
}

/// Stream of chat chunks returned by adapters.
pub type ChatStream = Pin<Box<dyn Stream<Item = Result<ChatChunk, ReasonerError>> + Send>>;

/// Build a [`ChatStream`] from in-memory chunks (used by the scripted
/// reasoner and by tests).
pub fn stream_from_chunks(chunks: Vec<String>) -> ChatStream {
    Box::pin(futures::stream::iter(
        chunks.into_iter().map(|text| Ok(ChatChunk { text })),
    ))
}

/// Drain a stream into one string, failing on the first transport error.
pub async fn collect_text(mut stream: ChatStream) -> Result<String, ReasonerError> {
    let mut out = String::new();
    while let Some(chunk) = stream.next().await {
        out.push_str(&chunk?.text);
    }
    Ok(out)
}
