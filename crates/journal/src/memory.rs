//! In-memory backend
//!
//! Rows live in a vector in append order. An availability switch lets
//! callers simulate a storage outage: while it is off, every call fails with
//! a connection error and nothing is written.

use crate::backend::Backend;
use crate::Result;
use ft_core::{FingerprintRecord, Game, HistoryEntry, StoreError};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Volatile backend sharing its rows between clones
#[derive(Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    rows: RwLock<Vec<FingerprintRecord>>,
    unavailable: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the simulated outage
    pub fn set_available(&self, available: bool) {
        self.inner.unavailable.store(!available, Ordering::SeqCst);
    }

    fn connect(&self) -> Result<&RwLock<Vec<FingerprintRecord>>> {
        if self.inner.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Connection("memory backend is offline".to_string()));
        }
        Ok(&self.inner.rows)
    }
}

impl Backend for MemoryBackend {
    fn insert(&self, record: &FingerprintRecord) -> Result<()> {
        self.connect()?.write().push(record.clone());
        Ok(())
    }

    fn count(&self) -> Result<u64> {
        Ok(self.connect()?.read().len() as u64)
    }

    fn max_timestamp(&self, game: Game) -> Result<Option<i64>> {
        let rows = self.connect()?.read();
        Ok(rows.iter().filter(|r| r.game == game).map(|r| r.timestamp).max())
    }

    fn rows_at(&self, game: Game, timestamp: i64) -> Result<Vec<FingerprintRecord>> {
        let rows = self.connect()?.read();
        Ok(rows
            .iter()
            .filter(|r| r.game == game && r.timestamp == timestamp)
            .cloned()
            .collect())
    }

    fn find_by_sha(&self, game: Game, sha: &str) -> Result<Option<FingerprintRecord>> {
        let rows = self.connect()?.read();
        Ok(rows.iter().rev().find(|r| r.game == game && r.sha == sha).cloned())
    }

    fn history(&self, game: Game) -> Result<Vec<HistoryEntry>> {
        let rows = self.connect()?.read();
        let mut entries: Vec<HistoryEntry> = rows
            .iter()
            .rev()
            .filter(|r| r.game == game)
            .map(FingerprintRecord::history_entry)
            .collect();
        // Stable sort keeps newest appends first among equal timestamps
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }
}
