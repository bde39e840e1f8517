// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `gigwatch status` command implementation.
//!
//! Probes storage with a lightweight read, then reports the scan watermark
//! and the scraper flag. Falls back gracefully when the database cannot be
//! opened.

use gigwatch_config::GigwatchConfig;
use gigwatch_core::{FlagSource, FlagState, GigwatchError};
use gigwatch_storage::queries::{postings, watermark};
use gigwatch_storage::{Database, SqliteFlags};

fn flag_label(state: FlagState) -> &'static str {
    match state {
        FlagState::Enabled => "enabled",
        FlagState::Disabled => "disabled",
        FlagState::Unreachable => "unreachable",
    }
}

/// Run the `gigwatch status` command.
pub async fn run_status(config: &GigwatchConfig) -> Result<(), GigwatchError> {
    println!();
    println!("  gigwatch status");
    println!("  {}", "-".repeat(35));
    println!("    Database:  {}", config.storage.database_path);

    let db = match Database::open(&config.storage.database_path, config.storage.wal_mode).await {
        Ok(db) => db,
        Err(e) => {
            println!("    Storage:   [FAIL] {e}");
            println!();
            return Ok(());
        }
    };

    match postings::recent(&db, 1).await {
        Ok(rows) if rows.is_empty() => println!("    Storage:   [OK] reachable, no postings yet"),
        Ok(_) => println!("    Storage:   [OK] reachable"),
        Err(e) => println!("    Storage:   [FAIL] {e}"),
    }

    match watermark::last_scan_at(&db).await {
        Ok(Some(at)) => println!("    Last scan: {}", at.to_rfc3339()),
        Ok(None) => println!("    Last scan: never"),
        Err(e) => println!("    Last scan: [FAIL] {e}"),
    }

    let state = SqliteFlags::new(db.clone()).scraper_state().await;
    println!("    Scraper:   {}", flag_label(state));
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_labels_are_distinct() {
        assert_eq!(flag_label(FlagState::Enabled), "enabled");
        assert_eq!(flag_label(FlagState::Disabled), "disabled");
        assert_eq!(flag_label(FlagState::Unreachable), "unreachable");
    }
}
