// Conversation Log
//
// Append-only list of exchanges guarded by a mutex. When a path is set the
// whole list is rewritten as bincode after every append, through a temporary
// file renamed into place.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use log::{debug, info};
use parking_lot::Mutex;
use serde::{Serialize, Deserialize};
use tempfile::NamedTempFile;

use super::error::{HistoryError, HistoryResult};

/// Upper bound on the number of exchanges returned by [`ConversationLog::recent`]
pub const MAX_RECENT: usize = 50;

/// One question/answer exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub question: String,
    pub answer: String,
    /// Milliseconds since the Unix epoch
    pub timestamp_ms: i64,
}

impl ConversationRecord {
    /// Create a record stamped with the current time
    pub fn now(question: impl Into<String>, answer: impl Into<String>) -> Self {
        ConversationRecord {
            question: question.into(),
            answer: answer.into(),
            timestamp_ms: Utc::now().timestamp_millis(),
        }
    }

    /// Timestamp as a UTC date-time
    pub fn time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp_ms).single()
    }
}

/// Conversation log, optionally backed by a file
#[derive(Debug)]
pub struct ConversationLog {
    path: Option<PathBuf>,
    records: Mutex<Vec<ConversationRecord>>,
}

impl ConversationLog {
    /// Create a log that is never written to disk
    pub fn in_memory() -> Self {
        ConversationLog {
            path: None,
            records: Mutex::new(Vec::new()),
        }
    }

    /// Open a log backed by `path`, loading existing records if the file exists
    pub fn open(path: impl AsRef<Path>) -> HistoryResult<Self> {
        let path = path.as_ref().to_path_buf();

        let records = match fs::read(&path) {
            Ok(bytes) if bytes.is_empty() => Vec::new(),
            Ok(bytes) => bincode::deserialize::<Vec<ConversationRecord>>(&bytes).map_err(|source| {
                HistoryError::Corrupt { path: path.clone(), source }
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(source) => return Err(HistoryError::Io { path, source }),
        };

        info!("Loaded {} conversation records from {}", records.len(), path.display());

        Ok(ConversationLog {
            path: Some(path),
            records: Mutex::new(records),
        })
    }

    /// Get the backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append an exchange and persist the log
    pub fn record(&self, question: &str, answer: &str) -> HistoryResult<ConversationRecord> {
        let record = ConversationRecord::now(question, answer);
        let mut records = self.records.lock();
        records.push(record.clone());

        if let Err(err) = self.persist(&records) {
            // Memory and file must agree
            records.pop();
            return Err(err);
        }

        debug!("Recorded exchange #{}", records.len());
        Ok(record)
    }

    /// Most recent exchanges, newest first, at most `min(limit, MAX_RECENT)`
    pub fn recent(&self, limit: usize) -> Vec<ConversationRecord> {
        let records = self.records.lock();
        records
            .iter()
            .rev()
            .take(limit.min(MAX_RECENT))
            .cloned()
            .collect()
    }

    /// Number of stored exchanges
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Remove every exchange
    pub fn clear(&self) -> HistoryResult<()> {
        let mut records = self.records.lock();
        records.clear();
        self.persist(&records)
    }

    fn persist(&self, records: &[ConversationRecord]) -> HistoryResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let bytes = bincode::serialize(records)?;
        let io_error = |source: io::Error| HistoryError::Io {
            path: path.clone(),
            source,
        };

        // Write beside the target and rename over it so readers never see a partial file
        let dir = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut file = NamedTempFile::new_in(dir).map_err(io_error)?;
        file.write_all(&bytes).map_err(io_error)?;
        file.as_file().sync_all().map_err(io_error)?;
        file.persist(path).map_err(|err| io_error(err.error))?;
        Ok(())
    }
}
