use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReasonerError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("provider returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("failed to parse provider output: {0}")]
    Parse(String),
    #[error("output failed schema validation: {0}")]
    Schema(String),
    #[error("missing API key: set {0}")]
    MissingApiKey(&'static str),
    #[error("scripted reasoner has no reply queued for '{0}'")]
    ScriptExhausted(&'static str),
    #[error("scripted failure: {0}")]
    Scripted(String),
}
