//! Append-only fingerprint journal using sled
//!
//! Layout:
//! ```text
//! fingerprint      game(1) | timestamp(8, BE) | seq(8, BE)  ->  StoredRow (JSON)
//! fingerprint_sha  game(1) | sha bytes                      ->  fingerprint key
//! ```
//! Key order in `fingerprint` is `(game, timestamp, append order)`, so the
//! last key under a game prefix is always the authoritative latest row.

use crate::backend::{Backend, StoredRow, TABLE};
use crate::Result;
use ft_core::{FingerprintRecord, Game, HistoryEntry, StoreError};
use serde::{Deserialize, Serialize};
use sled::transaction::{ConflictableTransactionResult, TransactionError};
use sled::{Db, Transactional, Tree};
use std::path::PathBuf;
use tracing::{debug, info};

const SHA_TABLE: &str = "fingerprint_sha";
const KEY_LEN: usize = 17;

/// Where the journal lives on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the databases
    pub path: PathBuf,
    /// Database name, a subdirectory of `path`
    pub database: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data"),
            database: "fingertrail".to_string(),
        }
    }
}

impl StorageConfig {
    pub fn database_path(&self) -> PathBuf {
        self.path.join(&self.database)
    }
}

/// Sled-backed fingerprint journal
pub struct SledJournal {
    db: Db,
    config: StorageConfig,
}

impl SledJournal {
    /// Open or create the journal described by `config`
    pub fn open(config: &StorageConfig) -> Result<Self> {
        let path = config.database_path();
        let db = sled::open(&path).map_err(storage_error)?;
        info!("Opened fingerprint journal at {}", path.display());

        Ok(Self {
            db,
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Scoped handle on the row table
    fn rows(&self) -> Result<Tree> {
        self.db.open_tree(TABLE).map_err(storage_error)
    }

    /// Scoped handle on the sha index
    fn sha_index(&self) -> Result<Tree> {
        self.db.open_tree(SHA_TABLE).map_err(storage_error)
    }
}

impl Backend for SledJournal {
    fn insert(&self, record: &FingerprintRecord) -> Result<()> {
        let rows = self.rows()?;
        let sha_index = self.sha_index()?;

        let seq = self.db.generate_id().map_err(storage_error)?;
        let key = row_key(record.game, record.timestamp, seq);
        let value = serde_json::to_vec(&StoredRow::from(record))
            .map_err(|e| StoreError::Query(format!("failed to encode row: {}", e)))?;
        let index_key = sha_key(record.game, &record.sha);

        // Row and index land together or not at all
        (&rows, &sha_index)
            .transaction(|(rows, sha_index)| -> ConflictableTransactionResult<(), ()> {
                rows.insert(&key[..], value.as_slice())?;
                sha_index.insert(index_key.as_slice(), &key[..])?;
                Ok(())
            })
            .map_err(|e| match e {
                TransactionError::Storage(e) => storage_error(e),
                TransactionError::Abort(()) => StoreError::Query("append aborted".to_string()),
            })?;

        self.db.flush().map_err(storage_error)?;
        debug!("Appended {} {} at seq {}", record.game, record.sha, seq);
        Ok(())
    }

    fn count(&self) -> Result<u64> {
        Ok(self.rows()?.len() as u64)
    }

    fn max_timestamp(&self, game: Game) -> Result<Option<i64>> {
        let rows = self.rows()?;
        match rows.scan_prefix([game.tag()]).next_back() {
            Some(item) => {
                let (key, _) = item.map_err(storage_error)?;
                Ok(Some(key_timestamp(&key)?))
            }
            None => Ok(None),
        }
    }

    fn rows_at(&self, game: Game, timestamp: i64) -> Result<Vec<FingerprintRecord>> {
        let rows = self.rows()?;
        let mut prefix = Vec::with_capacity(9);
        prefix.push(game.tag());
        prefix.extend_from_slice(&encode_timestamp(timestamp));

        let mut records = Vec::new();
        for item in rows.scan_prefix(prefix) {
            let (_, value) = item.map_err(storage_error)?;
            records.push(decode_row(&value)?);
        }
        Ok(records)
    }

    fn find_by_sha(&self, game: Game, sha: &str) -> Result<Option<FingerprintRecord>> {
        let sha_index = self.sha_index()?;
        let key = match sha_index.get(sha_key(game, sha)).map_err(storage_error)? {
            Some(key) => key,
            None => return Ok(None),
        };

        match self.rows()?.get(&key).map_err(storage_error)? {
            Some(value) => Ok(Some(decode_row(&value)?)),
            None => Err(StoreError::Query(format!(
                "sha index for {} {} points at a missing row",
                game, sha
            ))),
        }
    }

    fn history(&self, game: Game) -> Result<Vec<HistoryEntry>> {
        let rows = self.rows()?;
        let mut entries = Vec::new();
        for item in rows.scan_prefix([game.tag()]).rev() {
            let (_, value) = item.map_err(storage_error)?;
            entries.push(decode_row(&value)?.history_entry());
        }
        Ok(entries)
    }
}

fn storage_error(e: sled::Error) -> StoreError {
    match e {
        sled::Error::Io(e) => StoreError::Connection(e.to_string()),
        other => StoreError::Query(other.to_string()),
    }
}

fn encode_timestamp(timestamp: i64) -> [u8; 8] {
    // Flip the sign bit so big-endian byte order matches numeric order
    ((timestamp as u64) ^ (1 << 63)).to_be_bytes()
}

fn row_key(game: Game, timestamp: i64, seq: u64) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    key[0] = game.tag();
    key[1..9].copy_from_slice(&encode_timestamp(timestamp));
    key[9..].copy_from_slice(&seq.to_be_bytes());
    key
}

fn key_timestamp(key: &[u8]) -> Result<i64> {
    let bytes: [u8; 8] = key
        .get(1..9)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| StoreError::Query(format!("malformed row key of {} bytes", key.len())))?;
    Ok((u64::from_be_bytes(bytes) ^ (1 << 63)) as i64)
}

fn sha_key(game: Game, sha: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + sha.len());
    key.push(game.tag());
    key.extend_from_slice(sha.as_bytes());
    key
}

fn decode_row(value: &[u8]) -> Result<FingerprintRecord> {
    let row: StoredRow = serde_json::from_slice(value)
        .map_err(|e| StoreError::Query(format!("unreadable row: {}", e)))?;
    Ok(row.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_temp() -> (TempDir, SledJournal) {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig {
            path: temp_dir.path().to_path_buf(),
            database: "test".to_string(),
        };
        let journal = SledJournal::open(&config).unwrap();
        (temp_dir, journal)
    }

    fn record(game: Game, sha: &str, timestamp: i64) -> FingerprintRecord {
        FingerprintRecord::new(game, sha, "1.0", timestamp, None).unwrap()
    }

    #[test]
    fn test_timestamp_encoding_preserves_order() {
        let samples = [1i64, 2, 255, 256, 1_000, 1_700_000_000, i64::MAX];
        for pair in samples.windows(2) {
            assert!(encode_timestamp(pair[0]) < encode_timestamp(pair[1]));
        }
        let key = row_key(Game::BrawlStars, 1_700_000_000, 42);
        assert_eq!(key_timestamp(&key).unwrap(), 1_700_000_000);
    }

    #[test]
    fn test_games_do_not_leak_into_each_other() {
        let (_dir, journal) = open_temp();
        journal.insert(&record(Game::ClashRoyale, "a", 100)).unwrap();
        journal.insert(&record(Game::ClashofClans, "b", 200)).unwrap();

        assert_eq!(journal.max_timestamp(Game::ClashRoyale).unwrap(), Some(100));
        assert_eq!(journal.max_timestamp(Game::ClashofClans).unwrap(), Some(200));
        assert_eq!(journal.max_timestamp(Game::BrawlStars).unwrap(), None);
        assert_eq!(journal.history(Game::ClashRoyale).unwrap().len(), 1);
        assert!(journal.find_by_sha(Game::ClashRoyale, "b").unwrap().is_none());
    }

    #[test]
    fn test_rows_at_keeps_append_order() {
        let (_dir, journal) = open_temp();
        journal.insert(&record(Game::HayDayPop, "first", 500)).unwrap();
        journal.insert(&record(Game::HayDayPop, "second", 500)).unwrap();
        journal.insert(&record(Game::HayDayPop, "later", 600)).unwrap();

        let rows = journal.rows_at(Game::HayDayPop, 500).unwrap();
        let shas: Vec<_> = rows.iter().map(|r| r.sha.as_str()).collect();
        assert_eq!(shas, vec!["first", "second"]);
    }

    #[test]
    fn test_sha_index_prefers_latest_append() {
        let (_dir, journal) = open_temp();
        journal.insert(&record(Game::ClashRoyale, "dup", 900)).unwrap();
        journal.insert(&record(Game::ClashRoyale, "dup", 100)).unwrap();

        let found = journal.find_by_sha(Game::ClashRoyale, "dup").unwrap().unwrap();
        assert_eq!(found.timestamp, 100);
    }

    #[test]
    fn test_reopen_keeps_rows() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig {
            path: temp_dir.path().to_path_buf(),
            database: "persist".to_string(),
        };

        {
            let journal = SledJournal::open(&config).unwrap();
            journal.insert(&record(Game::BrawlStars, "abc", 1000)).unwrap();
            journal.insert(&record(Game::BrawlStars, "def", 2000)).unwrap();
        }

        let journal = SledJournal::open(&config).unwrap();
        assert_eq!(journal.count().unwrap(), 2);
        assert_eq!(journal.max_timestamp(Game::BrawlStars).unwrap(), Some(2000));

        // Sequence numbers keep growing after reopen
        journal.insert(&record(Game::BrawlStars, "ghi", 2000)).unwrap();
        let rows = journal.rows_at(Game::BrawlStars, 2000).unwrap();
        assert_eq!(rows.last().unwrap().sha, "ghi");
    }
}
