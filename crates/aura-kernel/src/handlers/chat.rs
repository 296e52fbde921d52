use aura_reasoner::{ChatRequest, collect_text};
use aura_types::{ChatMode, HistoryEntry};

use crate::error::KernelError;
use crate::executor::TaskOutcome;

use super::HandlerCx;

/// Stream a reply from the Reasoning Service and append it as one bot entry.
/// A failed stream surfaces as a system entry via the executor's wrapper.
pub(crate) async fn run(
    cx: &mut HandlerCx<'_>,
    strategy: Option<String>,
    mode: Option<ChatMode>,
    prompt_override: Option<String>,
) -> Result<TaskOutcome, KernelError> {
    let request = ChatRequest {
        history: cx.history().to_vec(),
        strategy,
        mode,
        prompt_override,
    };
    let stream = cx.reasoner.chat(request).await?;
    let text = collect_text(stream).await?;
    cx.append_history(HistoryEntry::bot(text))?;
    Ok(TaskOutcome::idle())
}
