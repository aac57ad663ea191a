//! Per-game status derived from detector observations
//!
//! `content_update_timeout` acts as a grace period: a recorded change keeps
//! the game in `Content` status for that long, and a game whose source has
//! not answered for that long is flagged stale.

use ft_core::{Game, Status};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Reachability of a game's source at the last check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reachability {
    Reachable,
    Unreachable,
    Maintenance,
}

#[derive(Debug, Clone, Copy)]
struct Observation {
    reachability: Reachability,
    /// Last time the source answered
    last_observed: Option<i64>,
    /// Timestamp of the latest stored fingerprint
    last_change: Option<i64>,
}

/// Point-in-time status of one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameReport {
    pub game: Game,
    pub status: Status,
    pub code: u8,
    pub last_observed: Option<i64>,
    pub last_change: Option<i64>,
    pub stale: bool,
}

/// Shared, cheaply cloneable status table
#[derive(Debug, Clone)]
pub struct StatusBoard {
    observations: Arc<RwLock<HashMap<Game, Observation>>>,
    grace_period: Duration,
}

impl StatusBoard {
    pub fn new(grace_period: Duration) -> Self {
        Self {
            observations: Arc::new(RwLock::new(HashMap::new())),
            grace_period,
        }
    }

    /// The source answered at `now`; `last_change` is the latest stored timestamp
    pub fn observed(&self, game: Game, now: i64, last_change: Option<i64>) {
        let mut observations = self.observations.write();
        let entry = observations.entry(game).or_insert(Observation {
            reachability: Reachability::Reachable,
            last_observed: None,
            last_change: None,
        });
        entry.reachability = Reachability::Reachable;
        entry.last_observed = Some(now);
        if last_change.is_some() {
            entry.last_change = last_change;
        }
    }

    /// The source failed; `maintenance` distinguishes planned downtime
    pub fn unreachable(&self, game: Game, maintenance: bool) {
        let reachability = if maintenance {
            Reachability::Maintenance
        } else {
            Reachability::Unreachable
        };
        self.observations
            .write()
            .entry(game)
            .and_modify(|o| o.reachability = reachability)
            .or_insert(Observation {
                reachability,
                last_observed: None,
                last_change: None,
            });
    }

    /// True when the last successful observation is older than the grace period
    pub fn is_stale(&self, game: Game, now: i64) -> bool {
        self.observations
            .read()
            .get(&game)
            .and_then(|o| o.last_observed)
            .is_some_and(|seen| self.elapsed(seen, now) > self.grace_period)
    }

    /// Status of `game` at `now`
    pub fn report(&self, game: Game, now: i64) -> GameReport {
        let observation = self.observations.read().get(&game).copied();

        let (status, last_observed, last_change) = match observation {
            None => (Status::Offline, None, None),
            Some(o) => {
                let status = match o.reachability {
                    Reachability::Unreachable => Status::Offline,
                    Reachability::Maintenance => Status::Maintenance,
                    Reachability::Reachable => match o.last_change {
                        Some(change) if self.elapsed(change, now) < self.grace_period => {
                            Status::Content
                        }
                        _ => Status::Online,
                    },
                };
                (status, o.last_observed, o.last_change)
            }
        };

        GameReport {
            game,
            status,
            code: status.code(),
            last_observed,
            last_change,
            stale: self.is_stale(game, now),
        }
    }

    /// Reports for `games` at `now`
    pub fn snapshot(&self, games: &[Game], now: i64) -> Vec<GameReport> {
        games.iter().map(|&game| self.report(game, now)).collect()
    }

    fn elapsed(&self, since: i64, now: i64) -> Duration {
        Duration::from_secs(now.saturating_sub(since).max(0) as u64)
    }
}
