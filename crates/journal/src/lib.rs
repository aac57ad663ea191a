//! Fingerprint journal and query layer
//!
//! This crate provides:
//! - The `Backend` storage seam
//! - Append-only sled journal (`SledJournal`)
//! - In-memory backend with outage simulation (`MemoryBackend`)
//! - `FingerprintStore`, the query layer with the `Lookup` failure contract

pub mod backend;
pub mod journal;
pub mod memory;
pub mod store;

// Re-exports
pub use backend::{Backend, StoredRow};
pub use journal::{SledJournal, StorageConfig};
pub use memory::MemoryBackend;
pub use store::FingerprintStore;

/// Result type for journal operations
pub type Result<T> = ft_core::Result<T>;
