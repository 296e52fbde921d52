//! Sandboxed polyglot code execution.
//!
//! The kernel consumes the [`CodeRuntime`] trait; this crate ships the
//! subprocess-backed [`process::ProcessRuntime`] and the scripted
//! [`static_runtime::StaticRuntime`] test double. Callers are expected to
//! fold a [`SandboxError`] into a textual "Runtime Error: …" result rather
//! than propagate it.

pub mod error;
pub mod process;
pub mod static_runtime;

use async_trait::async_trait;

use aura_types::Language;

pub use error::SandboxError;
pub use process::{Interpreter, ProcessRuntime, ProcessRuntimeConfig};
pub use static_runtime::StaticRuntime;

/// A sandboxed multi-language execution host.
#[async_trait]
pub trait CodeRuntime: Send + Sync {
    /// Run `code` under `language`, returning captured stdout.
    async fn run(&self, language: Language, code: &str) -> Result<String, SandboxError>;
}
