use aura_types::Syscall;

use crate::state::HistorySlice;

pub(crate) fn reduce(slice: &HistorySlice, call: &Syscall) -> Option<HistorySlice> {
    match call {
        Syscall::AppendHistory { entry } => {
            let mut next = slice.clone();
            next.entries.push(entry.clone());
            Some(next)
        }
        Syscall::AnnotateFeedback { entry, feedback } => {
            let position = slice.entries.iter().position(|e| e.id == *entry)?;
            let mut next = slice.clone();
            next.entries[position].feedback = Some(*feedback);
            Some(next)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_types::{EntryId, Feedback, HistoryEntry};

    #[test]
    fn append_preserves_order() {
        let slice = HistorySlice::default();
        let first = HistoryEntry::user("hi");
        let second = HistoryEntry::bot("hello");

        let slice = reduce(
            &slice,
            &Syscall::AppendHistory {
                entry: first.clone(),
            },
        )
        .unwrap();
        let slice = reduce(
            &slice,
            &Syscall::AppendHistory {
                entry: second.clone(),
            },
        )
        .unwrap();
        assert_eq!(slice.entries[0].id, first.id);
        assert_eq!(slice.entries[1].id, second.id);
    }

    #[test]
    fn feedback_targets_matching_entry_only() {
        let entry = HistoryEntry::bot("answer");
        let mut slice = HistorySlice::default();
        slice.entries.push(entry.clone());

        let annotated = reduce(
            &slice,
            &Syscall::AnnotateFeedback {
                entry: entry.id,
                feedback: Feedback::Positive,
            },
        )
        .unwrap();
        assert_eq!(annotated.entries[0].feedback, Some(Feedback::Positive));

        // Unknown id leaves the slice untouched.
        assert!(
            reduce(
                &slice,
                &Syscall::AnnotateFeedback {
                    entry: EntryId::random(),
                    feedback: Feedback::Negative,
                },
            )
            .is_none()
        );
    }
}
