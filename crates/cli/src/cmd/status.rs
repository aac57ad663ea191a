//! Show record counts and the latest fingerprint per game

use crate::config::Config;
use crate::util;
use anyhow::Result;
use ft_core::Lookup;
use owo_colors::OwoColorize;

pub async fn run(config: &Config) -> Result<()> {
    let store = util::open_store(config)?;

    println!("{}", "Fingerprint Store".bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();

    println!(
        "Database:      {}",
        config.storage.database_path().display().to_string().cyan()
    );
    match store.count() {
        Lookup::Failed(e) => println!("Records:       {}", format!("unavailable ({})", e).red()),
        count => println!("Records:       {}", count.value().unwrap_or(0)),
    }
    println!();

    for &game in &config.detector.games {
        print!("{:<14} ", format!("{}:", game.display_name()));
        match store.latest(game) {
            Lookup::Value(record) => println!(
                "{} {} {}",
                util::short_sha(&record.sha).yellow(),
                format!("v{}", record.version).cyan(),
                util::format_relative_time(record.timestamp).dimmed()
            ),
            Lookup::Empty => println!("{}", "no fingerprints yet".dimmed()),
            Lookup::Failed(e) => println!("{}", format!("unavailable ({})", e).red()),
        }
    }

    Ok(())
}
