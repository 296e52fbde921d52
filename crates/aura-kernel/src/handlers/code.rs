use aura_types::{HistoryEntry, Language, Syscall};

use crate::error::KernelError;
use crate::executor::TaskOutcome;

use super::HandlerCx;

/// Run code in the sandbox, generating it first when the task carries only a
/// goal. Runtime failures become an inline error result, never an executor
/// error.
pub(crate) async fn run(
    cx: &mut HandlerCx<'_>,
    language: Language,
    code: Option<String>,
    goal: &str,
) -> Result<TaskOutcome, KernelError> {
    let source = match code {
        Some(source) => source,
        None => cx.reasoner.generate_code(language, goal).await?,
    };

    let result = match cx.runtime.run(language, &source).await {
        Ok(output) => output,
        Err(err) => format!("Runtime Error: {err}"),
    };

    cx.dispatch(Syscall::RecordSandboxRun {
        language,
        code: source,
        result: result.clone(),
    })?;
    cx.append_history(HistoryEntry::tool(format!("sandbox.{language}"), result))?;
    Ok(TaskOutcome::idle())
}
