use aura_types::HistoryEntry;

use crate::error::KernelError;
use crate::executor::TaskOutcome;

use super::HandlerCx;

pub(crate) async fn run(
    cx: &mut HandlerCx<'_>,
    topic: &str,
    personas: &[String],
) -> Result<TaskOutcome, KernelError> {
    let ideas = cx.reasoner.brainstorm(topic, personas).await?;

    let mut text = format!("Brainstorm on \"{topic}\":\n");
    for idea in &ideas {
        text.push_str(&format!("- {}: {}\n", idea.persona, idea.idea));
    }
    if ideas.is_empty() {
        text.push_str("(no ideas produced)\n");
    }
    cx.append_history(HistoryEntry::bot(text))?;
    Ok(TaskOutcome::idle())
}
