//! Storage seam for fingerprint rows

use crate::Result;
use ft_core::{FingerprintRecord, Game, HistoryEntry};
use serde::{Deserialize, Serialize};

/// Name of the fingerprint table
pub const TABLE: &str = "fingerprint";

/// Raw storage operations behind [`crate::FingerprintStore`]
///
/// Implementations acquire whatever handle they need per call and release
/// it before returning, on success and failure alike. No implementation
/// retries on its own.
pub trait Backend: Send + Sync {
    /// Persist one row. Must be all-or-nothing.
    fn insert(&self, record: &FingerprintRecord) -> Result<()>;

    /// Total number of rows across all games
    fn count(&self) -> Result<u64>;

    /// Largest timestamp stored for `game`, `None` when it has no rows
    fn max_timestamp(&self, game: Game) -> Result<Option<i64>>;

    /// Rows of `game` stored at exactly `timestamp`, oldest append first
    fn rows_at(&self, game: Game, timestamp: i64) -> Result<Vec<FingerprintRecord>>;

    /// Most recently appended row for `(game, sha)`
    fn find_by_sha(&self, game: Game, sha: &str) -> Result<Option<FingerprintRecord>>;

    /// History of `game`, newest timestamp first, ties newest append first
    fn history(&self, game: Game) -> Result<Vec<HistoryEntry>>;
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn insert(&self, record: &FingerprintRecord) -> Result<()> {
        (**self).insert(record)
    }

    fn count(&self) -> Result<u64> {
        (**self).count()
    }

    fn max_timestamp(&self, game: Game) -> Result<Option<i64>> {
        (**self).max_timestamp(game)
    }

    fn rows_at(&self, game: Game, timestamp: i64) -> Result<Vec<FingerprintRecord>> {
        (**self).rows_at(game, timestamp)
    }

    fn find_by_sha(&self, game: Game, sha: &str) -> Result<Option<FingerprintRecord>> {
        (**self).find_by_sha(game, sha)
    }

    fn history(&self, game: Game) -> Result<Vec<HistoryEntry>> {
        (**self).history(game)
    }
}

/// On-disk row layout: `fingerprint(Game, Sha, Version, Timestamp, Json)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StoredRow {
    pub game: Game,
    pub sha: String,
    pub version: String,
    pub timestamp: i64,
    pub json: Option<String>,
}

impl From<&FingerprintRecord> for StoredRow {
    fn from(record: &FingerprintRecord) -> Self {
        Self {
            game: record.game,
            sha: record.sha.clone(),
            version: record.version.clone(),
            timestamp: record.timestamp,
            json: record.payload.clone(),
        }
    }
}

impl From<StoredRow> for FingerprintRecord {
    fn from(row: StoredRow) -> Self {
        Self {
            game: row.game,
            sha: row.sha,
            version: row.version,
            timestamp: row.timestamp,
            payload: row.json,
        }
    }
}
