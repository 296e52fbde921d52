//! Execution step: the process-once guard, handler dispatch, and the
//! completion guarantee that keeps the kernel from deadlocking.

use std::collections::{HashSet, VecDeque};

use aura_types::{HistoryEntry, Syscall, Task, TaskId};

use crate::error::KernelError;
use crate::handlers::{self, HandlerCx};

const DISPATCH_GUARD_CAPACITY: usize = 512;

/// What the executor does with the running slot once a handler finishes.
#[derive(Debug)]
pub enum NextAction {
    /// Clear the slot and return control to the scheduler.
    Idle,
    /// Install a follow-up task directly, bypassing the queue, so there is no
    /// scheduler gap between the two.
    RunImmediately(Task),
    /// Put a task at the back of the queue and clear the slot.
    Requeue(Task),
}

/// Handler return value.
#[derive(Debug)]
pub struct TaskOutcome {
    pub next: NextAction,
}

impl TaskOutcome {
    pub fn idle() -> Self {
        Self {
            next: NextAction::Idle,
        }
    }

    pub fn chain(task: Task) -> Self {
        Self {
            next: NextAction::RunImmediately(task),
        }
    }

    pub fn requeue(task: Task) -> Self {
        Self {
            next: NextAction::Requeue(task),
        }
    }
}

/// Bounded set of task ids that have already been dispatched. Duplicate
/// signals for the same id are suppressed silently; this is a reentrancy
/// defense, not a business rule.
#[derive(Debug)]
pub(crate) struct DispatchGuard {
    seen: HashSet<TaskId>,
    order: VecDeque<TaskId>,
    capacity: usize,
}

impl DispatchGuard {
    pub(crate) fn new() -> Self {
        Self::with_capacity(DISPATCH_GUARD_CAPACITY)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            seen: HashSet::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    /// Record the id. Returns false when it was already dispatched.
    pub(crate) fn admit(&mut self, id: TaskId) -> bool {
        if self.seen.contains(&id) {
            return false;
        }
        if self.order.len() >= self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.seen.remove(&evicted);
            }
        }
        self.order.push_back(id);
        self.seen.insert(id);
        true
    }
}

/// Run the handler for `task` and settle the running slot exactly once,
/// whether the handler succeeded, chained a follow-up, or failed.
pub(crate) async fn execute(cx: &mut HandlerCx<'_>, task: &Task) -> Result<(), KernelError> {
    cx.dispatch(Syscall::BumpTick)?;
    cx.dispatch(Syscall::RecordTaskFrequency {
        kind: task.kind_name().to_string(),
    })?;

    let next = match handlers::run(cx, task).await {
        Ok(outcome) => outcome.next,
        Err(err) => {
            log::error!("task {} ({}) failed: {err}", task.id, task.kind_name());
            let entry =
                HistoryEntry::system(format!("Task {} failed: {err}", task.kind_name()));
            if let Err(append_err) = cx.append_history(entry) {
                log::error!("failed to record task failure: {append_err}");
            }
            NextAction::Idle
        }
    };

    match next {
        NextAction::Idle => cx.dispatch(Syscall::ClearRunningTask),
        NextAction::RunImmediately(follow_up) => {
            cx.dispatch(Syscall::ReplaceRunningTask { task: follow_up })
        }
        NextAction::Requeue(requeued) => {
            cx.dispatch(Syscall::EnqueueTask { task: requeued })?;
            cx.dispatch(Syscall::ClearRunningTask)
        }
    }
}
