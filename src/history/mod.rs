// Calculation history module
//
// Bounded, most-recent-first log of past calculations with a JSON file
// mirror. The store owns the entry list; callers decide when to persist.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;

/// Maximum number of history entries kept, in memory and on disk.
///
/// When a new entry arrives at the cap, the oldest entry is evicted. The cap
/// bounds both the panel the user scrolls and the size of the persisted
/// file; entries beyond it are gone for good.
pub const HISTORY_CAPACITY: usize = 50;

/// One completed calculation.
///
/// The field names are the persisted JSON shape - do not rename them without
/// migrating existing history files. Entries are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Expression text, e.g. `"3 + 4"` or `"sin(30)"`.
    pub calculation: String,

    /// Display-formatted result, e.g. `"1,500"`.
    pub result: String,

    /// Local wall-clock time the calculation completed.
    pub timestamp: String,
}

impl HistoryEntry {
    /// Create an entry stamped with the current local time.
    pub fn new(calculation: String, result: String) -> Self {
        Self {
            calculation,
            result,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Bounded calculation history with a persisted JSON mirror.
///
/// Ordering is most-recent-first. The store never mutates an entry after
/// creation; the list only grows at the front, shrinks at the cap, or is
/// bulk-cleared on explicit user request.
///
/// # Related Types
///
/// - [`crate::state::StateChange::HistoryRecorded`]: how new entries reach
///   the store
/// - [`crate::ui::CalcController`]: persists after every mutation and once
///   more at session teardown
#[derive(Debug)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    history_path: Utf8PathBuf,
}

impl HistoryStore {
    /// Create a store backed by `calculator-history.json` in the data
    /// directory, creating the directory if needed. The list starts empty;
    /// call [`load`](Self::load) to restore the persisted entries.
    pub fn new<P: AsRef<Utf8Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref();

        if !data_dir.exists() {
            fs::create_dir_all(data_dir)
                .with_context(|| format!("Failed to create data directory: {}", data_dir))?;
        }

        Ok(Self {
            entries: Vec::new(),
            history_path: data_dir.join("calculator-history.json"),
        })
    }

    /// Restore the entry list from disk.
    ///
    /// A missing or unparsable file counts as empty history rather than an
    /// error; a corrupt file must never keep the calculator from starting.
    pub fn load(&mut self) {
        if !self.history_path.exists() {
            tracing::info!(
                "History file not found at {}, starting empty",
                self.history_path
            );
            self.entries = Vec::new();
            return;
        }

        let contents = match fs::read_to_string(&self.history_path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!("Failed to read history file {}: {}", self.history_path, e);
                self.entries = Vec::new();
                return;
            }
        };

        match serde_json::from_str::<Vec<HistoryEntry>>(&contents) {
            Ok(mut entries) => {
                entries.truncate(HISTORY_CAPACITY);
                tracing::info!(
                    "Loaded {} history entries from {}",
                    entries.len(),
                    self.history_path
                );
                self.entries = entries;
            }
            Err(e) => {
                tracing::warn!(
                    "History file {} is unparsable, starting empty: {}",
                    self.history_path,
                    e
                );
                self.entries = Vec::new();
            }
        }
    }

    /// Prepend an entry, evicting the oldest once the cap is reached.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    /// Empty the list. Confirmation is the caller's responsibility.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Write the full list to disk.
    pub fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)
            .context("Failed to serialize history to JSON")?;

        fs::write(&self.history_path, json)
            .with_context(|| format!("Failed to write history file: {}", self.history_path))?;

        tracing::debug!(
            "Persisted {} history entries to {}",
            self.entries.len(),
            self.history_path
        );
        Ok(())
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Path of the persisted mirror.
    pub fn history_path(&self) -> &Utf8Path {
        &self.history_path
    }
}
