use std::sync::{Arc, Mutex};

use super::{Journal, JournalEntry, JournalError, JournalSeq};

/// Simple in-memory journal useful for unit tests and ephemeral sessions.
#[derive(Debug, Default, Clone)]
pub struct MemJournal {
    entries: Arc<Mutex<Vec<JournalEntry>>>,
}

impl MemJournal {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn from_entries(entries: &[JournalEntry]) -> Self {
        Self {
            entries: Arc::new(Mutex::new(entries.to_vec())),
        }
    }

    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries.lock().unwrap().clone()
    }
}

impl Journal for MemJournal {
    fn append(&mut self, payload: &[u8]) -> Result<JournalSeq, JournalError> {
        let mut guard = self.entries.lock().unwrap();
        let seq = guard.len() as JournalSeq;
        guard.push(JournalEntry {
            seq,
            payload: payload.to_vec(),
        });
        Ok(seq)
    }

    fn load_from(&self, from: JournalSeq) -> Result<Vec<JournalEntry>, JournalError> {
        Ok(self
            .entries()
            .into_iter()
            .filter(|entry| entry.seq >= from)
            .collect())
    }

    fn next_seq(&self) -> JournalSeq {
        self.entries.lock().unwrap().len() as JournalSeq
    }
}
