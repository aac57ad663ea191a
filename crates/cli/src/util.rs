//! Shared utilities for CLI commands

use crate::config::Config;
use anyhow::{Context, Result};
use ft_core::{FingerprintRecord, HistoryEntry};
use journal::{FingerprintStore, SledJournal};
use owo_colors::OwoColorize;

/// Open the configured sled journal for a one-shot command
pub fn open_store(config: &Config) -> Result<FingerprintStore<SledJournal>> {
    let path = config.storage.database_path();
    let journal = SledJournal::open(&config.storage).with_context(|| {
        format!(
            "Failed to open fingerprint journal at {} (is `fpd serve` running?)",
            path.display()
        )
    })?;
    FingerprintStore::open(journal).context("Fingerprint store is unusable")
}

/// First 8 characters of a fingerprint
pub fn short_sha(sha: &str) -> &str {
    sha.get(..8).unwrap_or(sha)
}

/// Format timestamp (Unix seconds) as relative time ("2 hours ago")
pub fn format_relative_time(ts_secs: i64) -> String {
    format_relative_between(ts_secs, watcher::unix_now())
}

fn format_relative_between(ts_secs: i64, now: i64) -> String {
    if ts_secs > now {
        return "in the future".to_string();
    }

    let seconds = now - ts_secs;
    if seconds < 60 {
        format!("{} seconds ago", seconds)
    } else if seconds < 3600 {
        format!("{} minutes ago", seconds / 60)
    } else if seconds < 86400 {
        format!("{} hours ago", seconds / 3600)
    } else if seconds < 604800 {
        format!("{} days ago", seconds / 86400)
    } else {
        format!("{} weeks ago", seconds / 604800)
    }
}

/// Format timestamp (Unix seconds) as absolute UTC time ("2024-01-03 14:30:00")
pub fn format_absolute_time(ts_secs: i64) -> String {
    let secs = ts_secs.max(0) as u64;
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    // Civil-from-days, http://howardhinnant.github.io/date_algorithms.html
    let epoch_days = days + 719468;
    let era = epoch_days / 146097;
    let doe = epoch_days - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = if m <= 2 { y + 1 } else { y };

    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        year, m, d, hours, minutes, seconds
    )
}

/// Display a history entry on one line
pub fn display_entry_compact(entry: &HistoryEntry) {
    let payload = if entry.has_payload { "payload" } else { "no payload" };
    println!(
        "{} {} {} {}",
        short_sha(&entry.sha).yellow(),
        format!("v{}", entry.version).cyan(),
        format_relative_time(entry.timestamp).dimmed(),
        format!("({})", payload).dimmed()
    );
}

/// Display a full record
pub fn display_record(record: &FingerprintRecord) {
    println!("  Game:        {}", record.game.display_name().cyan());
    println!("  Fingerprint: {}", record.sha.yellow());
    println!("  Version:     {}", record.version);
    println!(
        "  Recorded:    {} ({})",
        format_relative_time(record.timestamp),
        format_absolute_time(record.timestamp).dimmed()
    );
    println!(
        "  Payload:     {}",
        if record.has_payload() { "stored" } else { "none" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_relative_time() {
        let now = 1_700_000_000;
        assert_eq!(format_relative_between(now, now), "0 seconds ago");
        assert!(format_relative_between(now - 3600, now).contains("hour"));
        assert!(format_relative_between(now - 86400, now).contains("day"));
        assert_eq!(format_relative_between(now + 5, now), "in the future");
    }

    #[test]
    fn test_format_absolute_time() {
        assert_eq!(format_absolute_time(0), "1970-01-01 00:00:00");
        assert_eq!(format_absolute_time(1_704_292_200), "2024-01-03 14:30:00");
    }

    #[test]
    fn test_short_sha() {
        assert_eq!(short_sha("0123456789abcdef"), "01234567");
        assert_eq!(short_sha("abc"), "abc");
    }
}
