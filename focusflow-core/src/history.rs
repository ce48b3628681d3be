//! Session history store
//!
//! The history is a single JSON file holding an array of session records,
//! oldest first. Records are only ever appended; entries already in the file
//! are carried through every write unchanged, even ones analytics can't use.
//!
//! Writes go to a sibling temporary file that is renamed over the original, so
//! a reader never sees a half-written array. Within one process, appends and
//! read-then-recompute cycles are serialized by the store's lock.

use crate::analytics::{self, AnalyticsSnapshot};
use crate::error::{Error, Result};
use crate::types::{SessionRecord, SessionStatus};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Append-only session history backed by a JSON file.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    lock: Mutex<()>,
}

/// Raw history plus the snapshot derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub sessions: Vec<SessionRecord>,
    pub stats: AnalyticsSnapshot,
}

impl HistoryStore {
    /// Open a store at `path`. The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a record built from `status` and `at`.
    pub fn record(&self, status: SessionStatus, at: DateTime<Utc>) -> Result<()> {
        self.append(SessionRecord::new(status, at))
    }

    /// Append one record.
    ///
    /// Existing entries are written back exactly as read, including entries
    /// the analytics ignore. A corrupt history file is reported rather than
    /// overwritten.
    pub fn append(&self, record: SessionRecord) -> Result<()> {
        let _guard = self.guard();

        let mut entries = self.read_entries()?;
        entries.push(serde_json::to_value(record)?);
        self.write_entries(&entries)?;

        tracing::info!(
            path = %self.path.display(),
            count = entries.len(),
            "Session recorded"
        );
        Ok(())
    }

    /// Read the full history.
    ///
    /// A missing file is an empty history. A file that is not a JSON array is
    /// [`Error::CorruptHistory`]. Array entries that are not objects are skipped.
    pub fn load(&self) -> Result<Vec<SessionRecord>> {
        let _guard = self.guard();
        self.read_records()
    }

    /// Read the full history, substituting an empty one if it is unreadable.
    pub fn load_or_empty(&self) -> Vec<SessionRecord> {
        let _guard = self.guard();
        self.read_records_or_empty()
    }

    /// Load the history and compute the analytics snapshot as seen at `now`.
    pub fn snapshot<Tz: TimeZone>(&self, now: DateTime<Tz>) -> AnalyticsSnapshot {
        self.report(now).stats
    }

    /// Load the history and bundle it with its snapshot.
    pub fn report<Tz: TimeZone>(&self, now: DateTime<Tz>) -> AnalyticsReport {
        let _guard = self.guard();
        let sessions = self.read_records_or_empty();
        let stats = analytics::compute_snapshot(&sessions, now);
        AnalyticsReport { sessions, stats }
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // The lock guards no data, so a poisoned lock is still usable
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read_records_or_empty(&self) -> Vec<SessionRecord> {
        match self.read_records() {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Session history unreadable, treating as empty"
                );
                Vec::new()
            }
        }
    }

    /// The raw history array. Missing or blank files are an empty array.
    fn read_entries(&self) -> Result<Vec<serde_json::Value>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No session history yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| Error::CorruptHistory {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn read_records(&self) -> Result<Vec<SessionRecord>> {
        let entries = self.read_entries()?;

        let total = entries.len();
        let records: Vec<SessionRecord> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();

        if records.len() < total {
            tracing::debug!(
                path = %self.path.display(),
                skipped = total - records.len(),
                "Skipped non-object history entries"
            );
        }

        Ok(records)
    }

    fn write_entries(&self, entries: &[serde_json::Value]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(entries)?;

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}
