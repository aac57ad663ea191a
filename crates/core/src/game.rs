//! Supported games and status codes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A game whose builds are fingerprinted
///
/// The set is closed; adding a game is a code change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Game {
    ClashRoyale,
    ClashofClans,
    BrawlStars,
    HayDayPop,
}

impl Game {
    /// Every tracked game, in storage tag order
    pub const ALL: [Game; 4] = [
        Game::ClashRoyale,
        Game::ClashofClans,
        Game::BrawlStars,
        Game::HayDayPop,
    ];

    /// Name stored in the `Game` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Game::ClashRoyale => "ClashRoyale",
            Game::ClashofClans => "ClashofClans",
            Game::BrawlStars => "BrawlStars",
            Game::HayDayPop => "HayDayPop",
        }
    }

    /// URL and directory friendly name
    pub fn slug(&self) -> &'static str {
        match self {
            Game::ClashRoyale => "clash-royale",
            Game::ClashofClans => "clash-of-clans",
            Game::BrawlStars => "brawl-stars",
            Game::HayDayPop => "hay-day-pop",
        }
    }

    /// Human readable name used in notifications
    pub fn display_name(&self) -> &'static str {
        match self {
            Game::ClashRoyale => "Clash Royale",
            Game::ClashofClans => "Clash of Clans",
            Game::BrawlStars => "Brawl Stars",
            Game::HayDayPop => "Hay Day Pop",
        }
    }

    /// Single byte tag used as the key prefix in storage
    pub fn tag(&self) -> u8 {
        match self {
            Game::ClashRoyale => 0,
            Game::ClashofClans => 1,
            Game::BrawlStars => 2,
            Game::HayDayPop => 3,
        }
    }

    /// Inverse of [`Game::tag`]
    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.get(tag as usize).copied()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known game
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown game: {0}")]
pub struct ParseGameError(pub String);

impl FromStr for Game {
    type Err = ParseGameError;

    /// Accepts the storage name or the slug, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Game::ALL
            .into_iter()
            .find(|game| game.as_str().eq_ignore_ascii_case(s) || game.slug().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseGameError(s.to_string()))
    }
}

/// Reported status of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Online = 0,
    Offline = 1,
    Maintenance = 2,
    /// A content update was recorded recently
    Content = 3,
}

impl Status {
    /// Numeric status code
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_name_and_slug() {
        assert_eq!("ClashRoyale".parse::<Game>(), Ok(Game::ClashRoyale));
        assert_eq!("clashroyale".parse::<Game>(), Ok(Game::ClashRoyale));
        assert_eq!("brawl-stars".parse::<Game>(), Ok(Game::BrawlStars));
        assert_eq!("HAY-DAY-POP".parse::<Game>(), Ok(Game::HayDayPop));
        assert!("Boom Beach".parse::<Game>().is_err());
    }

    #[test]
    fn test_tags_are_stable() {
        for game in Game::ALL {
            assert_eq!(Game::from_tag(game.tag()), Some(game));
        }
        assert_eq!(Game::from_tag(4), None);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(Status::Online.code(), 0);
        assert_eq!(Status::Offline.code(), 1);
        assert_eq!(Status::Maintenance.code(), 2);
        assert_eq!(Status::Content.code(), 3);
    }
}
