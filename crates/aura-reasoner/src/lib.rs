//! Reasoning Service contract and adapters.
//!
//! The kernel consumes the [`Reasoner`] trait; this crate ships the Gemini
//! HTTP adapter (feature `gemini`, on by default) and the scripted test
//! double used throughout the integration tests.

pub mod errors;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod parse;
pub mod prompts;
pub mod provider;
pub mod scripted;
pub mod types;

pub use errors::ReasonerError;
#[cfg(feature = "gemini")]
pub use gemini::{GeminiConfig, GeminiReasoner};
pub use provider::Reasoner;
pub use scripted::ScriptedReasoner;
pub use types::{ChatChunk, ChatRequest, ChatStream, collect_text, stream_from_chunks};
