//! Scheduling properties: mutual exclusion, FIFO order, liveness, pause, and
//! idempotent dispatch under duplicate signals.

mod helpers;

use aura_state::{reducers, AuraState};
use aura_types::{Language, Role, Syscall, Task, TaskKind};
use helpers::world;

fn code_task(goal: &str) -> Task {
    Task::new(TaskKind::ExecuteCode {
        language: Language::Python,
        code: Some(format!("print('{goal}')")),
        goal: goal.into(),
    })
}

#[tokio::test]
async fn running_slot_holds_at_most_one_task() {
    let mut world = world();
    for goal in ["a", "b", "c"] {
        world.runtime.push_output(format!("{goal}\n"));
        world.kernel.enqueue(code_task(goal)).unwrap();
    }
    world.kernel.run_until_idle().await.unwrap();

    // Replay the action log and check that every promotion found an empty
    // slot: the kernel never issued a redundant or overlapping promotion.
    let mut state = AuraState::default();
    let mut promotions = 0;
    for action in world.kernel.store().actions().unwrap() {
        if matches!(action.syscall, Syscall::PromoteHead) {
            assert!(state.kernel.running_task.is_none());
            promotions += 1;
        }
        state = reducers::reduce(&state, &action.syscall);
    }
    assert_eq!(promotions, 3);
    assert!(state.kernel.running_task.is_none());
    assert!(state.kernel.task_queue.is_empty());
}

#[tokio::test]
async fn tasks_execute_in_fifo_order() {
    let mut world = world();
    for goal in ["first", "second"] {
        world.runtime.push_output(format!("{goal} output"));
        world.kernel.enqueue(code_task(goal)).unwrap();
    }
    world.kernel.run_until_idle().await.unwrap();

    let tools: Vec<&str> = world
        .kernel
        .history()
        .iter()
        .filter(|entry| entry.role == Role::Tool)
        .map(|entry| entry.tool_result.as_deref().unwrap())
        .collect();
    assert_eq!(tools, vec!["first output", "second output"]);
}

#[tokio::test]
async fn nonempty_queue_is_promoted_within_one_cycle() {
    let mut world = world();
    world.runtime.push_output("done");
    world.kernel.enqueue(code_task("x")).unwrap();

    // One tick both promotes and executes.
    assert!(world.kernel.tick().await.unwrap());
    assert_eq!(world.kernel.state().kernel.tick, 1);
    assert!(world.kernel.state().kernel.task_queue.is_empty());
    assert!(world.kernel.state().kernel.running_task.is_none());

    // Idle kernel reports no work.
    assert!(!world.kernel.tick().await.unwrap());
}

#[tokio::test]
async fn pause_suppresses_promotion_and_resume_drains() {
    let mut world = world();
    world.runtime.push_output("later");
    world.kernel.enqueue(code_task("x")).unwrap();
    world.kernel.pause().unwrap();

    assert!(!world.kernel.tick().await.unwrap());
    assert!(world.kernel.state().kernel.running_task.is_none());
    assert_eq!(world.kernel.state().kernel.task_queue.len(), 1);

    world.kernel.resume().unwrap();
    world.kernel.run_until_idle().await.unwrap();
    assert!(world.kernel.state().kernel.task_queue.is_empty());
    assert_eq!(world.runtime.runs().len(), 1);
}

#[tokio::test]
async fn duplicate_dispatch_signal_is_suppressed() {
    let mut world = world();
    world.reasoner.push_chat(["once"]);
    let task = Task::new(TaskKind::GenerateChatResponse {
        strategy: None,
        mode: None,
        prompt_override: None,
    });
    world.kernel.enqueue(task.clone()).unwrap();
    world.kernel.run_until_idle().await.unwrap();
    assert_eq!(world.reasoner.calls(), vec!["chat"]);

    // Simulate a stale "running task changed" signal carrying the same task.
    world
        .kernel
        .store_mut()
        .dispatch(Syscall::ReplaceRunningTask { task }, None)
        .unwrap();
    world.kernel.run_until_idle().await.unwrap();

    // The handler did not run again and the slot was cleared.
    assert_eq!(world.reasoner.calls(), vec!["chat"]);
    assert!(world.kernel.state().kernel.running_task.is_none());
}

#[tokio::test]
async fn force_run_bypasses_queue_but_is_journaled() {
    let mut world = world();
    world.runtime.push_output("forced");
    world.kernel.force_run(code_task("forced")).unwrap();
    world.kernel.run_until_idle().await.unwrap();

    assert_eq!(world.runtime.runs().len(), 1);
    let actions = world.kernel.store().actions().unwrap();
    let names: Vec<&str> = actions.iter().map(|action| action.syscall.name()).collect();
    assert!(names.contains(&"set_running_task"));
    assert!(!names.contains(&"promote_head"));
}
