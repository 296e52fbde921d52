use aura_reasoner::{ChatRequest, collect_text, prompts};
use aura_types::{HistoryEntry, Language, Syscall};

use crate::error::KernelError;
use crate::executor::TaskOutcome;

use super::HandlerCx;

/// Generate verification code, run it, then explain the printed verdict in
/// plain language.
pub(crate) async fn run(cx: &mut HandlerCx<'_>, claim: &str) -> Result<TaskOutcome, KernelError> {
    let code = cx.reasoner.math_verification_code(claim).await?;
    let result = match cx.runtime.run(Language::Python, &code).await {
        Ok(output) => output,
        Err(err) => format!("Runtime Error: {err}"),
    };

    cx.dispatch(Syscall::RecordSandboxRun {
        language: Language::Python,
        code,
        result: result.clone(),
    })?;
    cx.append_history(HistoryEntry::tool("math.verify", result.clone()))?;

    let request = ChatRequest {
        history: cx.history().to_vec(),
        strategy: None,
        mode: None,
        prompt_override: Some(prompts::explain_verification(claim, &result)),
    };
    let stream = cx.reasoner.chat(request).await?;
    let explanation = collect_text(stream).await?;
    cx.append_history(HistoryEntry::bot(explanation))?;
    Ok(TaskOutcome::idle())
}
