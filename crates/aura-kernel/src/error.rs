use thiserror::Error;

use aura_reasoner::ReasonerError;
use aura_sandbox::SandboxError;
use aura_state::StateError;

#[derive(Debug, Error)]
pub enum KernelError {
    #[error("state error: {0}")]
    State(#[from] StateError),
    #[error("reasoner error: {0}")]
    Reasoner(#[from] ReasonerError),
    #[error("sandbox error: {0}")]
    Sandbox(#[from] SandboxError),
    #[error("unknown crystallized skill '{0}'")]
    SkillNotFound(String),
}
