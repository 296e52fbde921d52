use thiserror::Error;

use aura_types::Language;

#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("no interpreter configured for {0}")]
    Unsupported(Language),
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("execution exceeded {0} seconds")]
    Timeout(u64),
    #[error("process exited with {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },
    #[error("scripted failure: {0}")]
    Scripted(String),
}
