//! Show fingerprint history for one game

use crate::config::Config;
use crate::util;
use anyhow::Result;
use ft_core::{Game, Lookup};
use owo_colors::OwoColorize;

pub async fn run(config: &Config, game: Game, limit: Option<usize>) -> Result<()> {
    let store = util::open_store(config)?;

    let entries = match store.history(game) {
        Lookup::Value(entries) => entries,
        Lookup::Empty => {
            println!("{}", format!("No fingerprints recorded for {}", game.display_name()).dimmed());
            return Ok(());
        }
        Lookup::Failed(e) => return Err(e.into()),
    };

    println!(
        "{} {}",
        "History for".bold(),
        game.display_name().bold().cyan()
    );
    println!();

    let shown = limit.unwrap_or(entries.len());
    for entry in entries.iter().take(shown) {
        util::display_entry_compact(entry);
    }

    if entries.len() > shown {
        println!();
        println!(
            "{}",
            format!("... {} older fingerprints (use --limit to show more)", entries.len() - shown)
                .dimmed()
        );
    }

    Ok(())
}
