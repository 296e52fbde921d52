use aura_types::{ForgeStatus, ForgedChapter, ForgedDocument, HistoryEntry, Syscall};

use crate::error::KernelError;
use crate::executor::TaskOutcome;

use super::HandlerCx;

/// Multi-stage document generation inside one task: outline, then one chapter
/// at a time, with a progress syscall before each stage so observers can
/// render per-chapter progress before the task completes.
pub(crate) async fn run(cx: &mut HandlerCx<'_>, goal: &str) -> Result<TaskOutcome, KernelError> {
    cx.dispatch(Syscall::SetForgeStatus {
        status: ForgeStatus::Outlining,
    })?;

    let outline = match cx.reasoner.document_outline(goal).await {
        Ok(outline) => outline,
        Err(err) => {
            fail(cx, &err.to_string())?;
            return Err(err.into());
        }
    };

    let total = outline.chapters.len();
    let mut chapters = Vec::with_capacity(total);
    let mut context = format!("# {}\n", outline.title);
    for (index, chapter) in outline.chapters.iter().enumerate() {
        cx.dispatch(Syscall::SetForgeStatus {
            status: ForgeStatus::WritingChapter {
                index,
                total,
                title: chapter.title.clone(),
            },
        })?;
        let content = match cx.reasoner.chapter_content(&chapter.title, &context).await {
            Ok(content) => content,
            Err(err) => {
                fail(cx, &err.to_string())?;
                return Err(err.into());
            }
        };
        context.push_str(&format!("## {}\n", chapter.title));
        chapters.push(ForgedChapter {
            title: chapter.title.clone(),
            content,
        });
    }

    let title = outline.title.clone();
    cx.dispatch(Syscall::SetForgeDocument {
        document: ForgedDocument { title, chapters },
    })?;
    cx.dispatch(Syscall::SetForgeStatus {
        status: ForgeStatus::Done,
    })?;
    cx.append_history(HistoryEntry::bot(format!(
        "Forged document \"{}\" with {total} chapters.",
        outline.title
    )))?;
    Ok(TaskOutcome::idle())
}

fn fail(cx: &mut HandlerCx<'_>, reason: &str) -> Result<(), KernelError> {
    cx.dispatch(Syscall::SetForgeStatus {
        status: ForgeStatus::Failed {
            reason: reason.to_string(),
        },
    })
}
