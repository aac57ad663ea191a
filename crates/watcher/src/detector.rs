//! Periodic change detector
//!
//! On every tick, each tracked game is checked in turn: the current remote
//! fingerprint is compared against the latest stored one and a new record
//! is appended when they differ. Games are never checked in parallel, so the
//! detector holds at most one storage handle at a time.

use crate::notify::{Notification, Notifier};
use crate::source::{GameStateSource, SourceError};
use crate::status::StatusBoard;
use ft_core::{FingerprintRecord, Game, Lookup, StoreError};
use journal::{Backend, FingerprintStore};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// Detector tunables
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Games checked on every tick, in order
    pub games: Vec<Game>,
    /// Time between ticks
    pub status_check_interval: Duration,
    /// Grace period for content status and staleness
    pub content_update_timeout: Duration,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            games: Game::ALL.to_vec(),
            status_check_interval: Duration::from_secs(10),
            content_update_timeout: Duration::from_secs(2 * 60 * 60),
        }
    }
}

/// Result of checking one game
#[derive(Debug)]
pub enum CheckOutcome {
    /// Remote fingerprint matches the latest stored one
    Unchanged,
    /// A new fingerprint was stored
    Recorded(FingerprintRecord),
    /// The source could not be read; retried next tick
    SourceUnavailable(SourceError),
    /// The latest stored fingerprint could not be read; nothing was written
    StoreUnavailable(StoreError),
    /// A change was detected but the append failed; not retried this tick
    AppendFailed(StoreError),
}

/// Compares remote fingerprints against the store and records changes
pub struct Detector<B, S, N> {
    store: Arc<FingerprintStore<B>>,
    source: S,
    notifier: N,
    config: DetectorConfig,
    board: StatusBoard,
}

impl<B, S, N> Detector<B, S, N>
where
    B: Backend,
    S: GameStateSource,
    N: Notifier,
{
    pub fn new(
        store: Arc<FingerprintStore<B>>,
        source: S,
        notifier: N,
        config: DetectorConfig,
    ) -> Self {
        let board = StatusBoard::new(config.content_update_timeout);
        Self {
            store,
            source,
            notifier,
            config,
            board,
        }
    }

    /// Handle on the status table, updated by every check
    pub fn status_board(&self) -> StatusBoard {
        self.board.clone()
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Check a single game at time `now` (seconds since epoch)
    pub async fn check_game(&self, game: Game, now: i64) -> CheckOutcome {
        let remote = match self.source.fetch(game).await {
            Ok(remote) => remote,
            Err(e) => {
                self.board.unreachable(game, e == SourceError::Maintenance);
                if self.board.is_stale(game, now) {
                    warn!(
                        "No fingerprint for {} within {:?}, data is stale: {}",
                        game, self.config.content_update_timeout, e
                    );
                } else {
                    warn!("Skipping {} this tick: {}", game, e);
                }
                return CheckOutcome::SourceUnavailable(e);
            }
        };

        let previous = match self.store.latest(game) {
            Lookup::Value(record) => Some(record),
            Lookup::Empty => None,
            Lookup::Failed(e) => {
                warn!("Skipping {} this tick, latest fingerprint unknown: {}", game, e);
                return CheckOutcome::StoreUnavailable(e);
            }
        };

        if let Some(previous) = &previous {
            if previous.sha == remote.sha {
                self.board.observed(game, now, Some(previous.timestamp));
                debug!("{} unchanged at {}", game, remote.sha);
                return CheckOutcome::Unchanged;
            }
        }

        // A clock behind the stored latest would never overtake it; the tie
        // rule makes an equal timestamp win by append order instead.
        let timestamp = previous.as_ref().map_or(now, |p| now.max(p.timestamp));

        let record = FingerprintRecord::new(game, remote.sha, remote.version, timestamp, remote.payload);
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                error!("Refusing to record fingerprint for {}: {}", game, e);
                return CheckOutcome::AppendFailed(e);
            }
        };

        if let Err(e) = self.store.append(&record) {
            // The notification for this change is lost; a later tick will
            // see the same difference and try again.
            self.board.observed(game, now, None);
            return CheckOutcome::AppendFailed(e);
        }

        match &previous {
            Some(previous) => info!(
                "{} changed {} ({}) -> {} ({})",
                game, previous.sha, previous.version, record.sha, record.version
            ),
            None => info!("First fingerprint for {}: {} ({})", game, record.sha, record.version),
        }
        self.board.observed(game, now, Some(record.timestamp));

        if let Err(e) = self.notifier.notify(&Notification::content_update(&record)).await {
            warn!("Failed to send content update for {}: {}", game, e);
        }

        CheckOutcome::Recorded(record)
    }

    /// Check every configured game once, sequentially
    pub async fn tick(&self, now: i64) -> Vec<(Game, CheckOutcome)> {
        let mut outcomes = Vec::with_capacity(self.config.games.len());
        for &game in &self.config.games {
            outcomes.push((game, self.check_game(game, now).await));
        }
        outcomes
    }

    /// Tick on a fixed interval until `shutdown` turns true
    ///
    /// A tick in progress always completes before the loop exits.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut timer = interval(self.config.status_check_interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            "Starting change detector for {} games (interval: {:?})",
            self.config.games.len(),
            self.config.status_check_interval
        );

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    let outcomes = self.tick(unix_now()).await;
                    let recorded = outcomes
                        .iter()
                        .filter(|(_, o)| matches!(o, CheckOutcome::Recorded(_)))
                        .count();
                    if recorded > 0 {
                        info!("Tick recorded {} new fingerprints", recorded);
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Change detector stopped");
    }
}

/// Current time in seconds since the Unix epoch
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
