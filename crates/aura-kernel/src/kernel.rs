//! The kernel: owns the store, the collaborators, the skill registry and the
//! dispatch guard, and drives promote/execute cycles.

use std::sync::Arc;

use aura_reasoner::Reasoner;
use aura_sandbox::CodeRuntime;
use aura_state::{AuraState, Store};
use aura_types::{
    BypassReason, EntryId, Feedback, HistoryEntry, Syscall, Task, TaskKind, TraceId,
};

use crate::error::KernelError;
use crate::executor::{self, DispatchGuard};
use crate::handlers::HandlerCx;
use crate::reflex::SkillRegistry;
use crate::scheduler;
use crate::triage;

pub struct Kernel {
    store: Store,
    reasoner: Arc<dyn Reasoner>,
    runtime: Arc<dyn CodeRuntime>,
    skills: SkillRegistry,
    guard: DispatchGuard,
}

impl Kernel {
    pub fn new(
        store: Store,
        reasoner: Arc<dyn Reasoner>,
        runtime: Arc<dyn CodeRuntime>,
    ) -> Self {
        Self {
            store,
            reasoner,
            runtime,
            skills: SkillRegistry::new(),
            guard: DispatchGuard::new(),
        }
    }

    pub fn with_skills(mut self, skills: SkillRegistry) -> Self {
        self.skills = skills;
        self
    }

    pub fn state(&self) -> &AuraState {
        self.store.state()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.store.state().history.entries
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn is_paused(&self) -> bool {
        self.store.state().session.paused
    }

    /// Suppresses promotion and dispatch. A task already dispatched runs to
    /// completion; there is no per-task cancellation.
    pub fn pause(&mut self) -> Result<(), KernelError> {
        self.store.dispatch(Syscall::SetPaused { paused: true }, None)?;
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), KernelError> {
        self.store
            .dispatch(Syscall::SetPaused { paused: false }, None)?;
        Ok(())
    }

    /// Process raw user input: the reflex registry is consulted first and on
    /// a match the Reasoning Service is never invoked; otherwise a percept
    /// task and the triaged main task are queued.
    pub async fn submit(&mut self, input: &str) -> Result<TraceId, KernelError> {
        let trace = TraceId::random();

        if let Some(skill) = self.skills.match_command(input) {
            let skill_name = skill.name.clone();
            log::info!("reflex '{skill_name}' matched, bypassing triage");
            self.store.dispatch(
                Syscall::AppendHistory {
                    entry: HistoryEntry::user(input).with_trace(trace),
                },
                Some(trace),
            )?;
            self.store.dispatch(
                Syscall::AppendHistory {
                    entry: HistoryEntry::system(format!("Reflex '{skill_name}' triggered."))
                        .with_trace(trace),
                },
                Some(trace),
            )?;
            let task = Task::new(TaskKind::ExecuteCrystallizedSkill {
                skill: skill_name,
                command: input.to_string(),
            })
            .with_trace(trace);
            self.store.dispatch(
                Syscall::SetRunningTask {
                    task,
                    bypass: BypassReason::Reflex,
                },
                Some(trace),
            )?;
            return Ok(trace);
        }

        let percept = Task::new(TaskKind::RecordPercept {
            input: input.to_string(),
        })
        .with_trace(trace);
        self.store
            .dispatch(Syscall::EnqueueTask { task: percept }, Some(trace))?;

        let verdict = triage::classify(self.reasoner.as_ref(), input).await;
        let main = Task::new(triage::task_for(&verdict)).with_trace(trace);
        self.store
            .dispatch(Syscall::EnqueueTask { task: main }, Some(trace))?;
        Ok(trace)
    }

    /// Queue a task through the normal FIFO path.
    pub fn enqueue(&mut self, task: Task) -> Result<(), KernelError> {
        let trace = task.trace_id;
        self.store.dispatch(Syscall::EnqueueTask { task }, trace)?;
        Ok(())
    }

    /// Install a task directly in the running slot (the operator "force run"
    /// path). Journaled like every other promotion.
    pub fn force_run(&mut self, task: Task) -> Result<(), KernelError> {
        let trace = task.trace_id;
        self.store.dispatch(
            Syscall::SetRunningTask {
                task,
                bypass: BypassReason::Forced,
            },
            trace,
        )?;
        Ok(())
    }

    pub fn annotate_feedback(
        &mut self,
        entry: EntryId,
        feedback: Feedback,
    ) -> Result<(), KernelError> {
        self.store
            .dispatch(Syscall::AnnotateFeedback { entry, feedback }, None)?;
        Ok(())
    }

    /// One scheduling cycle: promote the queue head when the slot is idle,
    /// then execute the running task if it has not been dispatched before.
    /// Returns whether any work was done.
    pub async fn tick(&mut self) -> Result<bool, KernelError> {
        if self.store.state().session.paused {
            return Ok(false);
        }

        let mut worked = false;
        if scheduler::should_promote(self.store.state()) {
            let trace = self
                .store
                .state()
                .kernel
                .task_queue
                .first()
                .and_then(|task| task.trace_id);
            self.store.dispatch(Syscall::PromoteHead, trace)?;
            worked = true;
        }

        let Some(task) = self.store.state().kernel.running_task.clone() else {
            return Ok(worked);
        };

        if !self.guard.admit(task.id) {
            // A stale duplicate signal for an already-dispatched task. The
            // suppression is silent; clearing the slot keeps the scheduler
            // live.
            log::debug!("suppressing duplicate dispatch of task {}", task.id);
            self.store
                .dispatch(Syscall::ClearRunningTask, task.trace_id)?;
            return Ok(true);
        }

        let mut cx = HandlerCx {
            store: &mut self.store,
            reasoner: self.reasoner.as_ref(),
            runtime: self.runtime.as_ref(),
            skills: &self.skills,
            trace: task.trace_id,
        };
        executor::execute(&mut cx, &task).await?;
        Ok(true)
    }

    /// Drive cycles until the queue is drained and the slot is empty (or the
    /// kernel is paused).
    pub async fn run_until_idle(&mut self) -> Result<(), KernelError> {
        while self.tick().await? {}
        Ok(())
    }
}
