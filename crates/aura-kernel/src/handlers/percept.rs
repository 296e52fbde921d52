use aura_types::HistoryEntry;

use crate::error::KernelError;
use crate::executor::TaskOutcome;

use super::HandlerCx;

pub(crate) fn run(cx: &mut HandlerCx<'_>, input: &str) -> Result<TaskOutcome, KernelError> {
    cx.append_history(HistoryEntry::user(input))?;
    Ok(TaskOutcome::idle())
}
