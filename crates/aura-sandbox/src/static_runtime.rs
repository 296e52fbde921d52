//! Scripted runtime for tests: canned outputs or forced failures, plus a log
//! of every run for assertions.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use aura_types::Language;

use crate::error::SandboxError;
use crate::CodeRuntime;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRun {
    pub language: Language,
    pub code: String,
}

#[derive(Default)]
pub struct StaticRuntime {
    outputs: Mutex<VecDeque<Result<String, String>>>,
    runs: Mutex<Vec<RecordedRun>>,
}

impl StaticRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_output(&self, output: impl Into<String>) {
        self.outputs.lock().unwrap().push_back(Ok(output.into()));
    }

    pub fn push_failure(&self, message: impl Into<String>) {
        self.outputs.lock().unwrap().push_back(Err(message.into()));
    }

    pub fn runs(&self) -> Vec<RecordedRun> {
        self.runs.lock().unwrap().clone()
    }
}

#[async_trait]
impl CodeRuntime for StaticRuntime {
    async fn run(&self, language: Language, code: &str) -> Result<String, SandboxError> {
        self.runs.lock().unwrap().push(RecordedRun {
            language,
            code: code.to_string(),
        });
        match self.outputs.lock().unwrap().pop_front() {
            Some(Ok(output)) => Ok(output),
            Some(Err(message)) => Err(SandboxError::Scripted(message)),
            // An unscripted run succeeds with empty output so most tests do
            // not have to care about sandbox scripting.
            None => Ok(String::new()),
        }
    }
}
