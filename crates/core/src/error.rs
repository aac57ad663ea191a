//! Store error taxonomy

use crate::Game;
use thiserror::Error;

/// Errors surfaced by the fingerprint store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Storage could not be reached
    #[error("storage unreachable: {0}")]
    Connection(String),

    /// Storage was reachable but rejected the operation
    #[error("storage query failed: {0}")]
    Query(String),

    /// No record exists for the requested key
    #[error("no fingerprint for {game} with sha {sha}")]
    NotFound { game: Game, sha: String },

    /// A record exists but carries no payload document
    #[error("fingerprint {sha} for {game} has no payload")]
    MissingPayload { game: Game, sha: String },

    /// The stored payload is not a valid fingerprint document
    #[error("stored payload is malformed: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The record violates the data model and was never sent to storage
    #[error("invalid fingerprint record: {0}")]
    InvalidRecord(String),

    /// The initial health check failed
    #[error("fingerprint store failed its startup check: {0}")]
    StartupFatal(String),
}

impl StoreError {
    /// True for errors that mean storage itself is unavailable
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, StoreError::Connection(_) | StoreError::Query(_))
    }
}
