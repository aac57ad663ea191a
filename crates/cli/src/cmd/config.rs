//! Configuration command
//!
//! Prints the effective configuration, its location, or a commented example.

use crate::config::{self, Config};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::Path;

pub async fn run(config: &Config, explicit: Option<&Path>, example: bool, path: bool) -> Result<()> {
    if example {
        print!("{}", config::example_config());
        return Ok(());
    }

    let location = match explicit {
        Some(explicit) => explicit.to_path_buf(),
        None => config::config_file_path().context("Could not determine config file path")?,
    };

    if path {
        println!("{}", location.display());
        return Ok(());
    }

    println!("{}", "Configuration".bold());
    let suffix = if location.exists() { "" } else { " (not found, using defaults)" };
    println!(
        "{}: {}{}\n",
        "Location".dimmed(),
        location.display().dimmed(),
        suffix.dimmed()
    );

    println!("{}", "[storage]".yellow());
    println!("  {} = {}", "path".cyan(), config.storage.path.display());
    println!("  {} = {}", "database".cyan(), config.storage.database);

    println!("\n{}", "[detector]".yellow());
    println!(
        "  {} = {} {}",
        "status_check_interval_secs".cyan(),
        config.detector.status_check_interval_secs,
        format!("({}s)", config.detector.status_check_interval_secs).dimmed()
    );
    println!(
        "  {} = {} {}",
        "content_update_timeout_hours".cyan(),
        config.detector.content_update_timeout_hours,
        format!("({}h)", config.detector.content_update_timeout_hours).dimmed()
    );
    let games: Vec<_> = config.detector.games.iter().map(|g| g.as_str()).collect();
    println!("  {} = [{}]", "games".cyan(), games.join(", "));

    println!("\n{}", "[server]".yellow());
    println!("  {} = {}", "enabled".cyan(), config.server.enabled);
    println!("  {} = {}", "bind".cyan(), config.server.bind);

    println!("\n{}", "[notify]".yellow());
    println!("  {} = {}", "topic".cyan(), config.notify.topic);

    println!("\n{}", "[source]".yellow());
    println!("  {} = {}", "manifest_dir".cyan(), config.source.manifest_dir.display());

    Ok(())
}
