//! Core types for Fingertrail
//!
//! This crate provides:
//! - The closed set of tracked games and their status codes
//! - Fingerprint records, history entries and fingerprint documents
//! - The `Lookup` outcome type shared by every store query
//! - The store error taxonomy

pub mod error;
pub mod game;
pub mod lookup;
pub mod record;

// Re-exports
pub use error::StoreError;
pub use game::{Game, ParseGameError, Status};
pub use lookup::Lookup;
pub use record::{FileFingerprint, FingerprintDocument, FingerprintRecord, HistoryEntry};

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
