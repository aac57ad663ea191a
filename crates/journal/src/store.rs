//! Fingerprint store: the query layer over a [`Backend`]
//!
//! Storage failures are logged here and handed back as values
//! ([`Lookup::Failed`] or `Err`), never retried. Retry policy belongs to the
//! caller.

use crate::backend::Backend;
use crate::Result;
use ft_core::{FingerprintDocument, FingerprintRecord, Game, HistoryEntry, Lookup, StoreError};
use tracing::{debug, error, info, warn};

/// Per-game fingerprint history
pub struct FingerprintStore<B> {
    backend: B,
}

impl<B: Backend> FingerprintStore<B> {
    /// Wrap `backend` and run the startup health check
    ///
    /// Fails with [`StoreError::StartupFatal`] when the initial count cannot
    /// be read; the owning process is expected to exit.
    pub fn open(backend: B) -> Result<Self> {
        let store = Self { backend };

        match store.count() {
            Lookup::Failed(e) => {
                error!("Fingerprint store startup check failed: {}", e);
                Err(StoreError::StartupFatal(e.to_string()))
            }
            lookup => {
                info!("Fingerprint store ready ({} records)", lookup.sentinel());
                Ok(store)
            }
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Append a new record
    pub fn append(&self, record: &FingerprintRecord) -> Result<()> {
        record.validate()?;

        if let Err(e) = self.backend.insert(record) {
            error!("Failed to append fingerprint {} for {}: {}", record.sha, record.game, e);
            return Err(e);
        }

        debug!(
            "Appended fingerprint {} ({}) for {} at {}",
            record.sha, record.version, record.game, record.timestamp
        );
        Ok(())
    }

    /// Total number of records across all games
    pub fn count(&self) -> Lookup<u64> {
        match self.backend.count() {
            Ok(n) => Lookup::Value(n),
            Err(e) => {
                error!("Failed to count fingerprints: {}", e);
                Lookup::Failed(e)
            }
        }
    }

    /// Largest timestamp recorded for `game`
    pub fn max_timestamp(&self, game: Game) -> Lookup<i64> {
        let result = self.backend.max_timestamp(game);
        if let Err(e) = &result {
            error!("Failed to read max timestamp for {}: {}", game, e);
        }
        result.into()
    }

    /// Latest record for `game`, payload included
    ///
    /// When several rows share the maximum timestamp, the most recently
    /// appended one wins.
    pub fn latest(&self, game: Game) -> Lookup<FingerprintRecord> {
        let timestamp = match self.max_timestamp(game) {
            Lookup::Value(ts) => ts,
            Lookup::Empty => return Lookup::Empty,
            Lookup::Failed(e) => return Lookup::Failed(e),
        };

        match self.backend.rows_at(game, timestamp) {
            Ok(mut rows) => {
                if rows.len() > 1 {
                    debug!("{} rows for {} share timestamp {}", rows.len(), game, timestamp);
                }
                // Rows come back in append order
                Lookup::from_option(rows.pop())
            }
            Err(e) => {
                error!("Failed to read latest fingerprint for {}: {}", game, e);
                Lookup::Failed(e)
            }
        }
    }

    /// Raw record for `(game, sha)`
    pub fn record_by_sha(&self, game: Game, sha: &str) -> Lookup<FingerprintRecord> {
        let result = self.backend.find_by_sha(game, sha);
        if let Err(e) = &result {
            error!("Failed to look up fingerprint {} for {}: {}", sha, game, e);
        }
        result.into()
    }

    /// Fingerprint document stored for `(game, sha)`
    pub fn by_sha(&self, game: Game, sha: &str) -> Result<FingerprintDocument> {
        let record = match self.record_by_sha(game, sha) {
            Lookup::Value(record) => record,
            Lookup::Empty => {
                return Err(StoreError::NotFound {
                    game,
                    sha: sha.to_string(),
                })
            }
            Lookup::Failed(e) => return Err(e),
        };

        match record.document() {
            Ok(Some(document)) => Ok(document),
            Ok(None) => Err(StoreError::MissingPayload {
                game,
                sha: sha.to_string(),
            }),
            Err(e) => {
                warn!("Stored payload for {} {} is malformed: {}", game, sha, e);
                Err(e)
            }
        }
    }

    /// History of `game`, newest first, payload bodies excluded
    pub fn history(&self, game: Game) -> Lookup<Vec<HistoryEntry>> {
        match self.backend.history(game) {
            Ok(entries) if entries.is_empty() => Lookup::Empty,
            Ok(entries) => Lookup::Value(entries),
            Err(e) => {
                error!("Failed to read fingerprint history for {}: {}", game, e);
                Lookup::Failed(e)
            }
        }
    }
}
