//! Daemon lifecycle: store, change detector, HTTP server

use crate::config::Config;
use crate::server::{self, AppState, SharedStore};
use anyhow::{Context, Result};
use journal::{Backend, FingerprintStore, MemoryBackend, SledJournal};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};
use watcher::{Detector, LogNotifier, ManifestDirSource};

/// Open the configured backend, or an in-memory one for `memory`
pub fn open_store(config: &Config, memory: bool) -> Result<SharedStore> {
    let backend: Box<dyn Backend> = if memory {
        info!("Using in-memory fingerprint store");
        Box::new(MemoryBackend::new())
    } else {
        let journal = SledJournal::open(&config.storage).with_context(|| {
            format!(
                "Failed to open fingerprint journal at {}",
                config.storage.database_path().display()
            )
        })?;
        Box::new(journal)
    };

    let store = FingerprintStore::open(backend).context("Fingerprint store is unusable")?;
    Ok(Arc::new(store))
}

/// Run the daemon in the foreground until Ctrl-C
pub async fn serve(config: Config, memory: bool) -> Result<()> {
    let store = open_store(&config, memory)?;

    let detector = Detector::new(
        store.clone(),
        ManifestDirSource::new(&config.source.manifest_dir),
        LogNotifier::new(config.notify.topic.clone()),
        config.detector_config(),
    );
    let board = detector.status_board();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let detector_task = tokio::spawn(detector.run(shutdown_rx.clone()));

    let server_task = if config.server.enabled {
        let listener = tokio::net::TcpListener::bind(&config.server.bind)
            .await
            .with_context(|| format!("Failed to bind {}", config.server.bind))?;
        info!("HTTP server listening on {}", config.server.bind);

        let app = server::router(AppState {
            store,
            board,
            games: config.detector.games.clone(),
        });
        let mut rx = shutdown_rx;
        Some(tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = rx.wait_for(|stop| *stop).await;
                })
                .await
        }))
    } else {
        info!("HTTP server disabled");
        None
    };

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Shutting down");
    let _ = shutdown_tx.send(true);

    if let Err(e) = detector_task.await {
        error!("Change detector task failed: {}", e);
    }
    if let Some(task) = server_task {
        match task.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!("HTTP server error: {}", e),
            Err(e) => error!("HTTP server task failed: {}", e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ft_core::{FingerprintRecord, Game};

    #[test]
    fn test_memory_store_starts_empty() {
        let store = open_store(&Config::default(), true).unwrap();
        assert_eq!(store.count().value(), Some(0));
    }

    #[test]
    fn test_sled_store_persists_between_opens() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.path = temp_dir.path().to_path_buf();

        {
            let store = open_store(&config, false).unwrap();
            let record = FingerprintRecord::new(Game::BrawlStars, "abc", "1.0", 10, None).unwrap();
            store.append(&record).unwrap();
        }

        let store = open_store(&config, false).unwrap();
        assert_eq!(store.count().value(), Some(1));
    }
}
