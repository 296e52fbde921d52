use aura_types::{HistoryEntry, Syscall};

use crate::error::KernelError;
use crate::executor::TaskOutcome;

use super::HandlerCx;

/// Execute a crystallized skill body directly in the sandbox. The Reasoning
/// Service is never consulted on this path.
pub(crate) async fn run(
    cx: &mut HandlerCx<'_>,
    skill_name: &str,
    command: &str,
) -> Result<TaskOutcome, KernelError> {
    let Some(skill) = cx.skills.get(skill_name) else {
        return Err(KernelError::SkillNotFound(skill_name.to_string()));
    };
    let language = skill.language;
    let code = skill.code.replace("{{command}}", command);

    let result = match cx.runtime.run(language, &code).await {
        Ok(output) => output,
        Err(err) => format!("Runtime Error: {err}"),
    };

    cx.dispatch(Syscall::RecordSandboxRun {
        language,
        code,
        result: result.clone(),
    })?;
    cx.append_history(HistoryEntry::tool(format!("skill.{skill_name}"), result))?;
    Ok(TaskOutcome::idle())
}
