//! Print the stored fingerprint document for a sha

use crate::config::Config;
use crate::util;
use anyhow::{Context, Result};
use ft_core::Game;
use owo_colors::OwoColorize;

pub async fn run(config: &Config, game: Game, sha: &str, json: bool) -> Result<()> {
    let store = util::open_store(config)?;

    let document = store
        .by_sha(game, sha)
        .with_context(|| format!("Failed to load fingerprint {} for {}", sha, game))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    println!(
        "{} {} {}",
        game.display_name().bold().cyan(),
        util::short_sha(&document.sha).yellow(),
        format!("v{}", document.version).cyan()
    );
    println!("{}", format!("{} files", document.files.len()).dimmed());
    println!();

    for file in &document.files {
        println!("  {}  {}", util::short_sha(&file.sha).yellow(), file.file);
    }

    Ok(())
}
