use std::sync::Arc;

use aura_host::spawn;
use aura_kernel::Kernel;
use aura_reasoner::ScriptedReasoner;
use aura_sandbox::StaticRuntime;
use aura_state::Store;
use aura_types::{Role, TriageCategory, TriageVerdict};

fn scripted_kernel() -> (Kernel, Arc<ScriptedReasoner>, Arc<StaticRuntime>) {
    let reasoner = Arc::new(ScriptedReasoner::new());
    let runtime = Arc::new(StaticRuntime::new());
    let kernel = Kernel::new(Store::in_memory(), reasoner.clone(), runtime.clone());
    (kernel, reasoner, runtime)
}

fn chat_verdict(goal: &str) -> TriageVerdict {
    TriageVerdict {
        category: TriageCategory::SimpleChat,
        goal: goal.into(),
        reasoning: "scripted".into(),
        code: None,
    }
}

#[tokio::test]
async fn submit_drain_and_read_history() {
    let (kernel, reasoner, _runtime) = scripted_kernel();
    reasoner.push_triage(&chat_verdict("greet"));
    reasoner.push_chat(["hello from the daemon"]);

    let (join, handle) = spawn(kernel);

    handle.submit("hi aura").await.unwrap();
    handle.drain().await.unwrap();

    let history = handle.history_tail(10).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[1].text.as_deref(), Some("hello from the daemon"));

    handle.shutdown().await.unwrap();
    join.await.unwrap().unwrap();
}

#[tokio::test]
async fn pause_defers_work_until_resume() {
    let (kernel, reasoner, _runtime) = scripted_kernel();
    reasoner.push_triage(&chat_verdict("later"));
    reasoner.push_chat(["deferred reply"]);

    let (join, handle) = spawn(kernel);

    handle.pause().await.unwrap();
    handle.submit("do it later").await.unwrap();
    handle.drain().await.unwrap();

    // Queued but not executed while paused.
    let snapshot = handle.snapshot().await.unwrap();
    assert!(snapshot.session.paused);
    assert_eq!(snapshot.kernel.task_queue.len(), 2);
    assert!(handle.history_tail(10).await.unwrap().is_empty());

    handle.resume().await.unwrap();
    handle.drain().await.unwrap();
    let history = handle.history_tail(10).await.unwrap();
    assert_eq!(history.len(), 2);

    handle.shutdown().await.unwrap();
    join.await.unwrap().unwrap();
}

#[tokio::test]
async fn journal_dump_reflects_dispatched_actions() {
    let (kernel, reasoner, _runtime) = scripted_kernel();
    reasoner.push_triage(&chat_verdict("log me"));
    reasoner.push_chat(["ok"]);

    let (join, handle) = spawn(kernel);
    let trace = handle.submit("log me").await.unwrap();
    handle.drain().await.unwrap();

    let actions = handle.journal().await.unwrap();
    assert!(!actions.is_empty());
    // The submission's trace threads through every resulting action.
    assert!(actions.iter().all(|action| action.trace_id == Some(trace)));

    handle.shutdown().await.unwrap();
    join.await.unwrap().unwrap();
}

#[tokio::test]
async fn daemon_stops_when_all_handles_drop() {
    let (kernel, _reasoner, _runtime) = scripted_kernel();
    let (join, handle) = spawn(kernel);
    drop(handle);
    join.await.unwrap().unwrap();
}
