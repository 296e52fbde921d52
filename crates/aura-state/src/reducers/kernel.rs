use aura_types::Syscall;

use crate::state::{KernelSlice, SandboxRun};

pub(crate) fn reduce(slice: &KernelSlice, call: &Syscall) -> Option<KernelSlice> {
    match call {
        Syscall::EnqueueTask { task } => {
            let mut next = slice.clone();
            next.task_queue.push(task.clone());
            Some(next)
        }
        Syscall::PromoteHead => {
            // Redundant promotion must be harmless: the scheduler may fire on
            // every state change.
            if slice.running_task.is_some() || slice.task_queue.is_empty() {
                return None;
            }
            let mut next = slice.clone();
            let head = next.task_queue.remove(0);
            next.running_task = Some(head);
            Some(next)
        }
        Syscall::SetRunningTask { task, bypass } => {
            let mut next = slice.clone();
            if next.running_task.is_some() {
                // The slot is taken; keep the at-most-one invariant and let
                // the bypassed task win the next promotion instead.
                log::debug!(
                    "bypass ({bypass:?}) with occupied slot, front-queueing task {}",
                    task.id
                );
                next.task_queue.insert(0, task.clone());
            } else {
                next.running_task = Some(task.clone());
            }
            Some(next)
        }
        Syscall::ClearRunningTask => {
            if slice.running_task.is_none() {
                return None;
            }
            let mut next = slice.clone();
            next.running_task = None;
            Some(next)
        }
        Syscall::ReplaceRunningTask { task } => {
            let mut next = slice.clone();
            next.running_task = Some(task.clone());
            Some(next)
        }
        Syscall::BumpTick => {
            let mut next = slice.clone();
            next.tick += 1;
            Some(next)
        }
        Syscall::RecordTaskFrequency { kind } => {
            let mut next = slice.clone();
            *next.task_frequencies.entry(kind.clone()).or_insert(0) += 1;
            Some(next)
        }
        Syscall::RecordSandboxRun {
            language,
            code,
            result,
        } => {
            let mut next = slice.clone();
            next.sandbox.last_run = Some(SandboxRun {
                language: *language,
                code: code.clone(),
                result: result.clone(),
            });
            Some(next)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_types::{BypassReason, Task, TaskKind};

    fn chat_task() -> Task {
        Task::new(TaskKind::GenerateChatResponse {
            strategy: None,
            mode: None,
            prompt_override: None,
        })
    }

    #[test]
    fn promote_takes_fifo_head() {
        let a = chat_task();
        let b = chat_task();
        let mut slice = KernelSlice::default();
        slice.task_queue = vec![a.clone(), b.clone()];

        let next = reduce(&slice, &Syscall::PromoteHead).unwrap();
        assert_eq!(next.running_task.as_ref().unwrap().id, a.id);
        assert_eq!(next.task_queue.len(), 1);
        assert_eq!(next.task_queue[0].id, b.id);
    }

    #[test]
    fn promote_is_noop_while_running() {
        let mut slice = KernelSlice::default();
        slice.running_task = Some(chat_task());
        slice.task_queue = vec![chat_task()];
        assert!(reduce(&slice, &Syscall::PromoteHead).is_none());
    }

    #[test]
    fn bypass_front_queues_when_slot_occupied() {
        let running = chat_task();
        let queued = chat_task();
        let reflex = chat_task();
        let mut slice = KernelSlice::default();
        slice.running_task = Some(running.clone());
        slice.task_queue = vec![queued.clone()];

        let next = reduce(
            &slice,
            &Syscall::SetRunningTask {
                task: reflex.clone(),
                bypass: BypassReason::Reflex,
            },
        )
        .unwrap();
        assert_eq!(next.running_task.as_ref().unwrap().id, running.id);
        assert_eq!(next.task_queue[0].id, reflex.id);
        assert_eq!(next.task_queue[1].id, queued.id);
    }

    #[test]
    fn frequency_accumulates() {
        let slice = KernelSlice::default();
        let call = Syscall::RecordTaskFrequency {
            kind: "execute_code".into(),
        };
        let once = reduce(&slice, &call).unwrap();
        let twice = reduce(&once, &call).unwrap();
        assert_eq!(twice.task_frequencies["execute_code"], 2);
    }
}
