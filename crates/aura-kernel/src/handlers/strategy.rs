use aura_reasoner::prompts;
use aura_types::{ChatMode, GoalTree, HistoryEntry, Syscall, Task, TaskKind, TriageVerdict};

use crate::error::KernelError;
use crate::executor::TaskOutcome;

use super::HandlerCx;

/// Decompose the goal, plant the tree, publish the numbered plan, and always
/// chain the gap-analysis chat in the same execution tick: decomposition
/// alone is not considered a sufficient response.
pub(crate) async fn run(
    cx: &mut HandlerCx<'_>,
    triage: &TriageVerdict,
) -> Result<TaskOutcome, KernelError> {
    let goal = &triage.goal;
    let subtasks = match cx.reasoner.decompose_goal(goal).await {
        Ok(subtasks) => subtasks,
        Err(err) => {
            log::warn!("decomposition failed for '{goal}': {err}");
            Vec::new()
        }
    };

    cx.dispatch(Syscall::PlantGoalTree {
        tree: GoalTree::from_subtasks(goal, &subtasks),
    })?;

    let mut plan = format!("Strategic plan for \"{goal}\":\n");
    for (index, subtask) in subtasks.iter().enumerate() {
        plan.push_str(&format!("{}. {subtask}\n", index + 1));
    }
    if subtasks.is_empty() {
        plan.push_str("(no subtasks could be derived)\n");
    }
    cx.append_history(HistoryEntry::bot(plan))?;

    let mut follow_up = Task::new(TaskKind::GenerateChatResponse {
        strategy: Some(goal.clone()),
        mode: Some(ChatMode::GapAnalysis),
        prompt_override: Some(prompts::gap_analysis(goal, &subtasks)),
    });
    if let Some(trace) = cx.trace {
        follow_up = follow_up.with_trace(trace);
    }
    Ok(TaskOutcome::chain(follow_up))
}
