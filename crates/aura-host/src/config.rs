use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use aura_kernel::Kernel;
use aura_reasoner::GeminiReasoner;
use aura_sandbox::{ProcessRuntime, ProcessRuntimeConfig};
use aura_state::journal::fs::FsJournal;
use aura_state::Store;

use crate::error::HostError;

/// Host configuration, resolved from the environment.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Directory for the on-disk action journal; `None` keeps the session
    /// in memory.
    pub journal_dir: Option<PathBuf>,
    /// Wall-clock limit for one sandboxed code execution.
    pub sandbox_timeout: Duration,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            journal_dir: None,
            sandbox_timeout: Duration::from_secs(30),
        }
    }
}

impl HostConfig {
    /// Read `AURA_JOURNAL_DIR` and `AURA_SANDBOX_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = std::env::var("AURA_JOURNAL_DIR") {
            if !dir.is_empty() {
                config.journal_dir = Some(PathBuf::from(dir));
            }
        }
        if let Some(secs) = std::env::var("AURA_SANDBOX_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
        {
            config.sandbox_timeout = Duration::from_secs(secs);
        }
        config
    }

    pub fn with_journal_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.journal_dir = Some(dir.into());
        self
    }

    /// Open the store: filesystem-journaled when a directory is configured,
    /// otherwise in memory.
    pub fn open_store(&self) -> Result<Store, HostError> {
        match &self.journal_dir {
            Some(dir) => {
                let journal = FsJournal::open(dir)?;
                Ok(Store::open(Box::new(journal))?)
            }
            None => Ok(Store::in_memory()),
        }
    }

    /// Build a kernel wired to the Gemini reasoner (keyed from the
    /// environment) and the subprocess code runtime.
    pub fn build_kernel(&self) -> Result<Kernel, HostError> {
        let store = self.open_store()?;
        let reasoner = Arc::new(GeminiReasoner::from_env()?);
        let runtime_config = ProcessRuntimeConfig {
            timeout: self.sandbox_timeout,
            ..ProcessRuntimeConfig::default()
        };
        let runtime = Arc::new(ProcessRuntime::new(runtime_config));
        Ok(Kernel::new(store, reasoner, runtime))
    }
}
