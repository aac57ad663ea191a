//! End-to-end tests for the fpd binary

mod common;

use anyhow::Result;
use common::TestEnv;
use ft_core::{FingerprintRecord, Game};

#[test]
fn test_config_example_parses() -> Result<()> {
    let env = TestEnv::new()?;
    let result = fpd!(env.path(), "config", "--example").assert_success()?;

    assert!(result.contains_stdout("[detector]"));
    let parsed = cli_lib::config::parse(&result.stdout)?;
    assert_eq!(parsed, cli_lib::config::Config::default());
    Ok(())
}

#[test]
fn test_config_path_follows_flag() -> Result<()> {
    let env = TestEnv::new()?;
    let config = env.config_arg();
    let result = fpd!(env.path(), "--config", &config, "config", "--path").assert_success()?;
    assert_eq!(result.stdout.trim(), config);
    Ok(())
}

#[test]
fn test_history_on_empty_store() -> Result<()> {
    let env = TestEnv::new()?;
    let config = env.config_arg();
    let result = fpd!(env.path(), "--config", &config, "history", "clash-royale").assert_success()?;
    assert!(result.contains_stdout("No fingerprints recorded for Clash Royale"));
    Ok(())
}

#[test]
fn test_history_and_latest_after_seeding() -> Result<()> {
    let env = TestEnv::new()?;
    env.seed(&[
        FingerprintRecord::new(Game::BrawlStars, "aaaaaaaa1111", "1.0", 1_000, None)?,
        FingerprintRecord::new(Game::BrawlStars, "bbbbbbbb2222", "1.1", 2_000, None)?,
        FingerprintRecord::new(Game::ClashRoyale, "cccccccc3333", "9.9", 3_000, None)?,
    ])?;
    let config = env.config_arg();

    let result = fpd!(env.path(), "--config", &config, "history", "BrawlStars").assert_success()?;
    let first = result.stdout.find("bbbbbbbb").expect("newest entry listed");
    let second = result.stdout.find("aaaaaaaa").expect("oldest entry listed");
    assert!(first < second, "history must be newest first:\n{}", result.stdout);
    assert!(!result.contains_stdout("cccccccc"));

    let result = fpd!(env.path(), "--config", &config, "latest", "brawl-stars").assert_success()?;
    assert!(result.contains_stdout("bbbbbbbb2222"));
    assert!(result.contains_stdout("1.1"));
    Ok(())
}

#[test]
fn test_show_document() -> Result<()> {
    let env = TestEnv::new()?;
    let payload = r#"{"sha":"feedface","version":"3.0","files":[{"file":"csv/units.csv","sha":"0123456789"}]}"#;
    env.seed(&[FingerprintRecord::new(
        Game::HayDayPop,
        "feedface",
        "3.0",
        100,
        Some(payload.to_string()),
    )?])?;
    let config = env.config_arg();

    let result = fpd!(env.path(), "--config", &config, "show", "hay-day-pop", "feedface")
        .assert_success()?;
    assert!(result.contains_stdout("csv/units.csv"));

    let result = fpd!(env.path(), "--config", &config, "show", "hay-day-pop", "missing")
        .assert_failure()?;
    assert!(result.contains_stderr("missing"));
    Ok(())
}

#[test]
fn test_unknown_game_is_rejected() -> Result<()> {
    let env = TestEnv::new()?;
    let config = env.config_arg();
    let result = fpd!(env.path(), "--config", &config, "latest", "boom-beach").assert_failure()?;
    assert!(result.contains_stderr("boom-beach"));
    Ok(())
}

#[test]
fn test_missing_explicit_config_fails() -> Result<()> {
    let env = TestEnv::new()?;
    let result = fpd!(env.path(), "--config", "nope.toml", "status").assert_failure()?;
    assert!(result.contains_stderr("Config file not found"));
    Ok(())
}
