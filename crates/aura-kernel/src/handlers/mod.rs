//! Per-task-kind handlers. Each handler may await the Reasoning Service or
//! the Code Runtime, append history entries, and dispatch further syscalls as
//! it progresses; the executor owns the completion guarantee around them.

mod brainstorm;
mod chat;
mod code;
mod forge;
mod math;
mod percept;
mod skill;
mod strategy;

use aura_reasoner::Reasoner;
use aura_sandbox::CodeRuntime;
use aura_state::Store;
use aura_types::{HistoryEntry, Syscall, Task, TaskKind, TraceId};

use crate::error::KernelError;
use crate::executor::TaskOutcome;
use crate::reflex::SkillRegistry;

/// Everything a handler can touch. Holds a snapshot-consistent view of state
/// through the store; mutation goes through [`HandlerCx::dispatch`] only.
pub(crate) struct HandlerCx<'a> {
    pub store: &'a mut Store,
    pub reasoner: &'a dyn Reasoner,
    pub runtime: &'a dyn CodeRuntime,
    pub skills: &'a SkillRegistry,
    pub trace: Option<TraceId>,
}

impl HandlerCx<'_> {
    pub(crate) fn dispatch(&mut self, syscall: Syscall) -> Result<(), KernelError> {
        self.store.dispatch(syscall, self.trace)?;
        Ok(())
    }

    pub(crate) fn append_history(&mut self, entry: HistoryEntry) -> Result<(), KernelError> {
        let entry = match self.trace {
            Some(trace) => entry.with_trace(trace),
            None => entry,
        };
        self.dispatch(Syscall::AppendHistory { entry })
    }

    pub(crate) fn history(&self) -> &[HistoryEntry] {
        &self.store.state().history.entries
    }
}

/// Dispatch on the task kind.
pub(crate) async fn run(
    cx: &mut HandlerCx<'_>,
    task: &Task,
) -> Result<TaskOutcome, KernelError> {
    match &task.kind {
        TaskKind::RecordPercept { input } => percept::run(cx, input),
        TaskKind::GenerateChatResponse {
            strategy,
            mode,
            prompt_override,
        } => chat::run(cx, strategy.clone(), *mode, prompt_override.clone()).await,
        TaskKind::ExecuteCode {
            language,
            code,
            goal,
        } => code::run(cx, *language, code.clone(), goal).await,
        TaskKind::DecomposeStrategicGoal { triage } => strategy::run(cx, triage).await,
        TaskKind::VerifyMathClaim { claim } => math::run(cx, claim).await,
        TaskKind::ForgeDocument { goal } => forge::run(cx, goal).await,
        TaskKind::Brainstorm { topic, personas } => brainstorm::run(cx, topic, personas).await,
        TaskKind::ExecuteCrystallizedSkill { skill, command } => {
            skill::run(cx, skill, command).await
        }
    }
}
