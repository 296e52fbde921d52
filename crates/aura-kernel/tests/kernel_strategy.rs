//! Strategic decomposition: the goal-tree round trip and the mandatory
//! zero-gap chaining into the gap-analysis chat.

mod helpers;

use aura_types::{ChatMode, GoalStatus, Role, Task, TaskKind, TriageCategory};
use helpers::{verdict, world};

#[tokio::test]
async fn decomposition_plants_tree_and_chains_chat_with_no_scheduler_gap() {
    let mut world = world();
    world
        .reasoner
        .push_subtasks(["survey options", "build prototype", "evaluate"]);
    world
        .kernel
        .enqueue(Task::new(TaskKind::DecomposeStrategicGoal {
            triage: verdict(TriageCategory::ComplexTask, "Solve X"),
        }))
        .unwrap();

    // One tick promotes and executes the decomposition.
    assert!(world.kernel.tick().await.unwrap());

    // Goal tree rooted at the goal with the scripted children.
    let trees = &world.kernel.state().goals.trees;
    assert_eq!(trees.len(), 1);
    assert_eq!(trees[0].root.title, "Solve X");
    assert_eq!(trees[0].root.status, GoalStatus::Active);
    let children: Vec<&str> = trees[0]
        .root
        .children
        .iter()
        .map(|child| child.title.as_str())
        .collect();
    assert_eq!(children, vec!["survey options", "build prototype", "evaluate"]);

    // Numbered plan in one bot entry.
    let plan = world.kernel.history().last().unwrap();
    assert_eq!(plan.role, Role::Bot);
    let text = plan.text.as_ref().unwrap();
    assert!(text.contains("Solve X"));
    assert!(text.contains("1. survey options"));
    assert!(text.contains("3. evaluate"));

    // The follow-up chat is already the running task: no scheduler gap.
    let running = world.kernel.state().kernel.running_task.as_ref().unwrap();
    match &running.kind {
        TaskKind::GenerateChatResponse {
            mode,
            prompt_override,
            strategy,
        } => {
            assert_eq!(*mode, Some(ChatMode::GapAnalysis));
            assert_eq!(strategy.as_deref(), Some("Solve X"));
            assert!(prompt_override.as_ref().unwrap().contains("survey options"));
        }
        other => panic!("expected chained chat task, got {other:?}"),
    }

    // Draining finishes the chained narrative.
    world.reasoner.push_chat(["Gap analysis: looks complete."]);
    world.kernel.run_until_idle().await.unwrap();
    let last = world.kernel.history().last().unwrap();
    assert_eq!(last.text.as_deref(), Some("Gap analysis: looks complete."));
}

#[tokio::test]
async fn decomposition_failure_degrades_to_empty_plan_but_still_chains() {
    let mut world = world();
    world.reasoner.push_subtasks_failure("decomposer offline");
    world
        .kernel
        .enqueue(Task::new(TaskKind::DecomposeStrategicGoal {
            triage: verdict(TriageCategory::ComplexTask, "Solve Y"),
        }))
        .unwrap();

    assert!(world.kernel.tick().await.unwrap());

    let trees = &world.kernel.state().goals.trees;
    assert_eq!(trees[0].root.title, "Solve Y");
    assert!(trees[0].root.children.is_empty());

    // The narrative follow-up is chained regardless.
    assert!(matches!(
        world.kernel.state().kernel.running_task.as_ref().unwrap().kind,
        TaskKind::GenerateChatResponse { .. }
    ));

    world.reasoner.push_chat(["No plan could be derived."]);
    world.kernel.run_until_idle().await.unwrap();
    assert!(world.kernel.state().kernel.running_task.is_none());
}

#[tokio::test]
async fn chained_task_inherits_the_trace() {
    let mut world = world();
    world.reasoner.push_subtasks(["only step"]);
    world.reasoner.push_chat(["done"]);

    let trace = aura_types::TraceId::random();
    world
        .kernel
        .enqueue(
            Task::new(TaskKind::DecomposeStrategicGoal {
                triage: verdict(TriageCategory::ComplexTask, "Solve Z"),
            })
            .with_trace(trace),
        )
        .unwrap();
    world.kernel.tick().await.unwrap();

    let running = world.kernel.state().kernel.running_task.as_ref().unwrap();
    assert_eq!(running.trace_id, Some(trace));

    world.kernel.run_until_idle().await.unwrap();
    // Every action dispatched on behalf of this submission carries the trace.
    let actions = world.kernel.store().actions().unwrap();
    assert!(actions.iter().all(|action| action.trace_id == Some(trace)));
}
