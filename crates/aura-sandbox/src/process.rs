//! Subprocess-backed runtime: writes the source to a temp file and runs the
//! configured interpreter under a wall-clock timeout.

use std::collections::HashMap;
use std::io::Write;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::process::Command;
use tokio::time::timeout;

use aura_types::Language;

use crate::error::SandboxError;
use crate::CodeRuntime;

/// Interpreter invocation for one language. The source file path is appended
/// as the final argument.
#[derive(Debug, Clone)]
pub struct Interpreter {
    pub program: String,
    pub args: Vec<String>,
}

impl Interpreter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone)]
pub struct ProcessRuntimeConfig {
    pub interpreters: HashMap<Language, Interpreter>,
    pub timeout: Duration,
}

impl Default for ProcessRuntimeConfig {
    fn default() -> Self {
        let mut interpreters = HashMap::new();
        interpreters.insert(Language::Python, Interpreter::new("python3"));
        interpreters.insert(Language::Ruby, Interpreter::new("ruby"));
        interpreters.insert(Language::Lua, Interpreter::new("lua"));
        interpreters.insert(
            Language::Scheme,
            Interpreter::new("guile").with_args(["--no-auto-compile", "-s"]),
        );
        Self {
            interpreters,
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct ProcessRuntime {
    config: ProcessRuntimeConfig,
}

impl ProcessRuntime {
    pub fn new(config: ProcessRuntimeConfig) -> Self {
        Self { config }
    }
}

impl Default for ProcessRuntime {
    fn default() -> Self {
        Self::new(ProcessRuntimeConfig::default())
    }
}

#[async_trait]
impl CodeRuntime for ProcessRuntime {
    async fn run(&self, language: Language, code: &str) -> Result<String, SandboxError> {
        let interpreter = self
            .config
            .interpreters
            .get(&language)
            .ok_or(SandboxError::Unsupported(language))?;

        let mut source = NamedTempFile::new()?;
        source.write_all(code.as_bytes())?;
        source.flush()?;

        log::debug!(
            "running {} source ({} bytes) via {}",
            language,
            code.len(),
            interpreter.program
        );

        let mut command = Command::new(&interpreter.program);
        command
            .args(&interpreter.args)
            .arg(source.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = timeout(self.config.timeout, command.output())
            .await
            .map_err(|_| SandboxError::Timeout(self.config.timeout.as_secs()))?
            .map_err(|err| SandboxError::Spawn {
                program: interpreter.program.clone(),
                source: err,
            })?;

        if !output.status.success() {
            return Err(SandboxError::NonZeroExit {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

// Spawning real interpreters is environment-dependent, so these run only with
// `--features live-tests`.
#[cfg(all(test, feature = "live-tests"))]
mod live_tests {
    use super::*;

    #[tokio::test]
    async fn python_prints_stdout() {
        let runtime = ProcessRuntime::default();
        let out = runtime
            .run(Language::Python, "print(2 + 2)")
            .await
            .unwrap();
        assert_eq!(out.trim(), "4");
    }

    #[tokio::test]
    async fn python_error_is_nonzero_exit() {
        let runtime = ProcessRuntime::default();
        let err = runtime
            .run(Language::Python, "raise ValueError('nope')")
            .await
            .unwrap_err();
        assert!(matches!(err, SandboxError::NonZeroExit { .. }));
    }
}
