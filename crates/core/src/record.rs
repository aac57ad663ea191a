//! Fingerprint records and documents

use crate::{Game, StoreError};
use serde::{Deserialize, Serialize};

/// One captured fingerprint of a game build
///
/// Records are append-only. Once stored they are never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintRecord {
    pub game: Game,
    /// Opaque content hash of the build
    pub sha: String,
    pub version: String,
    /// Capture time in seconds since the Unix epoch (always positive)
    pub timestamp: i64,
    /// Raw fingerprint document, if one was captured
    pub payload: Option<String>,
}

impl FingerprintRecord {
    /// Create a record, rejecting values the store could not order or look up
    pub fn new(
        game: Game,
        sha: impl Into<String>,
        version: impl Into<String>,
        timestamp: i64,
        payload: Option<String>,
    ) -> Result<Self, StoreError> {
        let record = Self {
            game,
            sha: sha.into(),
            version: version.into(),
            timestamp,
            payload,
        };
        record.validate()?;
        Ok(record)
    }

    /// Check the invariants storage relies on
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.timestamp <= 0 {
            return Err(StoreError::InvalidRecord(format!(
                "timestamp must be positive, got {}",
                self.timestamp
            )));
        }
        if self.sha.is_empty() {
            return Err(StoreError::InvalidRecord("sha must not be empty".to_string()));
        }
        Ok(())
    }

    /// True when a non-empty payload is attached
    pub fn has_payload(&self) -> bool {
        self.payload.as_deref().is_some_and(|p| !p.is_empty())
    }

    /// Parse the payload into a structured document
    ///
    /// `Ok(None)` means no payload was captured. A payload that is present
    /// but unparseable is an error, never an absence.
    pub fn document(&self) -> Result<Option<FingerprintDocument>, StoreError> {
        match self.payload.as_deref() {
            Some(raw) if !raw.is_empty() => Ok(Some(serde_json::from_str(raw)?)),
            _ => Ok(None),
        }
    }

    /// Lightweight view without the payload body
    pub fn history_entry(&self) -> HistoryEntry {
        HistoryEntry {
            sha: self.sha.clone(),
            version: self.version.clone(),
            timestamp: self.timestamp,
            has_payload: self.has_payload(),
        }
    }
}

/// History row returned by listings (payload body excluded)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub sha: String,
    pub version: String,
    pub timestamp: i64,
    pub has_payload: bool,
}

/// Structured fingerprint document published with a game build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintDocument {
    pub sha: String,
    pub version: String,
    #[serde(default)]
    pub files: Vec<FileFingerprint>,
}

/// Hash of a single asset file in a build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFingerprint {
    pub file: String,
    pub sha: String,
}
