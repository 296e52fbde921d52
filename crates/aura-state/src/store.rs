use aura_types::{Action, Syscall, TraceId};

use crate::error::StateError;
use crate::journal::mem::MemJournal;
use crate::journal::Journal;
use crate::reducers;
use crate::state::AuraState;

/// The state store: owns the current tree and the journal. Every mutation
/// goes through [`Store::dispatch`], which appends the action to the journal
/// before reducing, so the log is always at least as new as the state.
pub struct Store {
    state: AuraState,
    journal: Box<dyn Journal>,
    next_seq: u64,
}

impl Store {
    /// Ephemeral store backed by an in-memory journal.
    pub fn in_memory() -> Self {
        Self {
            state: AuraState::default(),
            journal: Box::new(MemJournal::new()),
            next_seq: 0,
        }
    }

    /// Open a store over an existing journal, replaying its actions to
    /// rebuild the state tree.
    pub fn open(journal: Box<dyn Journal>) -> Result<Self, StateError> {
        let mut state = AuraState::default();
        let mut expected: u64 = 0;
        for entry in journal.load_from(0)? {
            let action: Action = serde_json::from_slice(&entry.payload)?;
            if action.seq != expected {
                return Err(StateError::ReplayGap {
                    expected,
                    found: action.seq,
                });
            }
            state = reducers::reduce(&state, &action.syscall);
            expected += 1;
        }
        Ok(Self {
            state,
            journal,
            next_seq: expected,
        })
    }

    pub fn state(&self) -> &AuraState {
        &self.state
    }

    /// Journal then reduce one syscall.
    pub fn dispatch(
        &mut self,
        syscall: Syscall,
        trace_id: Option<TraceId>,
    ) -> Result<(), StateError> {
        let action = Action {
            seq: self.next_seq,
            trace_id,
            syscall,
        };
        let payload = serde_json::to_vec(&action)?;
        self.journal.append(&payload)?;
        self.next_seq += 1;
        self.state = reducers::reduce(&self.state, &action.syscall);
        log::trace!("applied action #{} ({})", action.seq, action.syscall.name());
        Ok(())
    }

    /// Decode the full action log, oldest first.
    pub fn actions(&self) -> Result<Vec<Action>, StateError> {
        self.journal
            .load_from(0)?
            .into_iter()
            .map(|entry| serde_json::from_slice(&entry.payload).map_err(StateError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_types::{HistoryEntry, Task, TaskKind};

    fn percept(input: &str) -> Task {
        Task::new(TaskKind::RecordPercept {
            input: input.into(),
        })
    }

    #[test]
    fn dispatch_applies_and_journals() {
        let mut store = Store::in_memory();
        store
            .dispatch(
                Syscall::EnqueueTask {
                    task: percept("hi"),
                },
                None,
            )
            .unwrap();
        store.dispatch(Syscall::PromoteHead, None).unwrap();

        assert!(store.state().kernel.running_task.is_some());
        assert!(store.state().kernel.task_queue.is_empty());

        let actions = store.actions().unwrap();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].seq, 0);
        assert_eq!(actions[1].syscall.name(), "promote_head");
    }

    #[test]
    fn replay_reproduces_state() {
        let journal = MemJournal::new();
        let mut store = Store {
            state: AuraState::default(),
            journal: Box::new(journal.clone()),
            next_seq: 0,
        };
        store
            .dispatch(
                Syscall::AppendHistory {
                    entry: HistoryEntry::user("hello"),
                },
                Some(TraceId::random()),
            )
            .unwrap();
        store
            .dispatch(Syscall::SetPaused { paused: true }, None)
            .unwrap();

        let replayed = Store::open(Box::new(MemJournal::from_entries(&journal.entries())))
            .unwrap();
        assert_eq!(replayed.state(), store.state());
        assert_eq!(replayed.next_seq, 2);
    }
}
