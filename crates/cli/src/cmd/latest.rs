//! Show the latest fingerprint for one game

use crate::config::Config;
use crate::util;
use anyhow::Result;
use ft_core::{Game, Lookup};
use owo_colors::OwoColorize;

pub async fn run(config: &Config, game: Game) -> Result<()> {
    let store = util::open_store(config)?;

    match store.latest(game) {
        Lookup::Value(record) => {
            println!("{}", "Latest fingerprint".bold());
            util::display_record(&record);
            Ok(())
        }
        Lookup::Empty => {
            println!("{}", format!("No fingerprints recorded for {}", game.display_name()).dimmed());
            Ok(())
        }
        Lookup::Failed(e) => Err(e.into()),
    }
}
