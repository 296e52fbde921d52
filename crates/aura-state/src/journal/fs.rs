use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{Journal, JournalEntry, JournalError, JournalSeq};

const JOURNAL_DIR: &str = "journal";
const JOURNAL_FILE: &str = "actions.log";

/// One line of the on-disk log. The payload is carried as a JSON string so
/// the record stays line-delimited regardless of its content.
#[derive(Debug, Serialize, Deserialize)]
struct DiskRecord {
    seq: JournalSeq,
    payload: String,
}

/// Filesystem-backed journal that stores line-delimited JSON records, synced
/// on every append.
#[derive(Debug)]
pub struct FsJournal {
    path: PathBuf,
    next_seq: JournalSeq,
}

impl FsJournal {
    pub fn open(root: impl AsRef<Path>) -> Result<Self, JournalError> {
        let journal_dir = root.as_ref().join(JOURNAL_DIR);
        fs::create_dir_all(&journal_dir)?;
        let path = journal_dir.join(JOURNAL_FILE);
        if !path.exists() {
            File::create(&path)?;
        }
        let entries = read_all_records(&path)?;
        let next_seq = entries.last().map(|entry| entry.seq + 1).unwrap_or(0);
        Ok(Self { path, next_seq })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Journal for FsJournal {
    fn append(&mut self, payload: &[u8]) -> Result<JournalSeq, JournalError> {
        let seq = self.next_seq;
        let record = DiskRecord {
            seq,
            payload: String::from_utf8(payload.to_vec())
                .map_err(|err| JournalError::Corrupt(format!("payload not utf8: {err}")))?,
        };
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.sync_all()?;
        self.next_seq += 1;
        Ok(seq)
    }

    fn load_from(&self, from: JournalSeq) -> Result<Vec<JournalEntry>, JournalError> {
        let mut entries = read_all_records(&self.path)?;
        entries.retain(|entry| entry.seq >= from);
        Ok(entries)
    }

    fn next_seq(&self) -> JournalSeq {
        self.next_seq
    }
}

fn read_all_records(path: &Path) -> Result<Vec<JournalEntry>, JournalError> {
    let raw = fs::read_to_string(path)?;
    let mut entries = Vec::new();
    for (line_no, line) in raw.split('\n').enumerate() {
        if line.is_empty() {
            continue;
        }
        let record: DiskRecord = serde_json::from_str(line).map_err(|err| {
            JournalError::Corrupt(format!("line {}: {err}", line_no + 1))
        })?;
        entries.push(JournalEntry {
            seq: record.seq,
            payload: record.payload.into_bytes(),
        });
    }
    // A well-formed log always ends with a newline; anything else means the
    // last append was cut short.
    if !raw.is_empty() && !raw.ends_with('\n') {
        return Err(JournalError::Corrupt("truncated final entry".into()));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_and_recovers_entries() {
        let tmp = TempDir::new().unwrap();
        let mut journal = FsJournal::open(tmp.path()).unwrap();
        assert_eq!(journal.next_seq(), 0);
        journal.append(br#"{"a":1}"#).unwrap();
        journal.append(br#"{"b":2}"#).unwrap();

        let again = FsJournal::open(tmp.path()).unwrap();
        assert_eq!(again.next_seq(), 2);
        let entries = again.load_from(0).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].seq, 0);
        assert_eq!(entries[0].payload, br#"{"a":1}"#);
    }

    #[test]
    fn load_from_filters_sequence() {
        let tmp = TempDir::new().unwrap();
        let mut journal = FsJournal::open(tmp.path()).unwrap();
        for payload in [b"\"one\"".as_ref(), b"\"two\"", b"\"three\""] {
            journal.append(payload).unwrap();
        }
        let entries = journal.load_from(2).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].payload, b"\"three\"");
    }

    #[test]
    fn detects_truncated_entry() {
        let tmp = TempDir::new().unwrap();
        {
            let mut journal = FsJournal::open(tmp.path()).unwrap();
            journal.append(br#"{"payload":"x"}"#).unwrap();
        }

        let log_path = tmp.path().join(JOURNAL_DIR).join(JOURNAL_FILE);
        let len = std::fs::metadata(&log_path).unwrap().len();
        let file = OpenOptions::new().write(true).open(&log_path).unwrap();
        file.set_len(len - 1).unwrap();

        let err = FsJournal::open(tmp.path()).unwrap_err();
        assert!(matches!(err, JournalError::Corrupt(_)));
    }
}
