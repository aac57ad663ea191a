//! Sources of the current remote fingerprint per game

use async_trait::async_trait;
use ft_core::{FingerprintDocument, Game};
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Fingerprint as currently published for a game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFingerprint {
    pub sha: String,
    pub version: String,
    /// Raw document, stored verbatim as the record payload
    pub payload: Option<String>,
}

/// Why a source could not report a fingerprint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("source unavailable: {0}")]
    Unavailable(String),

    #[error("game is under maintenance")]
    Maintenance,

    #[error("malformed fingerprint: {0}")]
    Malformed(String),
}

/// Authoritative view of what each game currently serves
#[async_trait]
pub trait GameStateSource: Send + Sync {
    async fn fetch(&self, game: Game) -> Result<RemoteFingerprint, SourceError>;
}

/// Reads published fingerprints from a directory tree
///
/// ```text
/// <root>/
///   clash-royale/
///     fingerprint.json
///     maintenance        (optional marker)
///   brawl-stars/
///     fingerprint.json
/// ```
pub struct ManifestDirSource {
    root: PathBuf,
}

impl ManifestDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn game_dir(&self, game: Game) -> PathBuf {
        self.root.join(game.slug())
    }
}

#[async_trait]
impl GameStateSource for ManifestDirSource {
    async fn fetch(&self, game: Game) -> Result<RemoteFingerprint, SourceError> {
        let dir = self.game_dir(game);

        if tokio::fs::try_exists(dir.join("maintenance")).await.unwrap_or(false) {
            return Err(SourceError::Maintenance);
        }

        let path = dir.join("fingerprint.json");
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SourceError::Unavailable(format!("{} not found", path.display())))
            }
            Err(e) => return Err(SourceError::Unavailable(format!("{}: {}", path.display(), e))),
        };

        let document: FingerprintDocument =
            serde_json::from_str(&raw).map_err(|e| SourceError::Malformed(e.to_string()))?;
        debug!("Read fingerprint {} ({}) for {}", document.sha, document.version, game);

        Ok(RemoteFingerprint {
            sha: document.sha,
            version: document.version,
            payload: Some(raw),
        })
    }
}
