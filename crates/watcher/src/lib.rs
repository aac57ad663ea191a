//! Remote build watching for Fingertrail
//!
//! This crate provides:
//! - Game-state sources reporting the current remote fingerprint
//! - The periodic change detector feeding the fingerprint store
//! - Per-game status tracking (online, content update, stale)
//! - Notification dispatch for detected content updates

pub mod detector;
pub mod notify;
pub mod source;
pub mod status;

pub use detector::{unix_now, CheckOutcome, Detector, DetectorConfig};
pub use notify::{LogNotifier, Notification, Notifier, NotifyError};
pub use source::{GameStateSource, ManifestDirSource, RemoteFingerprint, SourceError};
pub use status::{GameReport, StatusBoard};
