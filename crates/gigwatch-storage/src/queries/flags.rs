// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote run/stop flag storage and the storage-backed [`FlagSource`].

use async_trait::async_trait;
use gigwatch_core::{FlagSource, FlagState, GigwatchError};
use rusqlite::{OptionalExtension, params};
use tracing::warn;

use crate::database::Database;

/// Flag name controlling whether the scraper activity runs.
pub const SCRAPER_FLAG: &str = "scraper_enabled";

/// Raw value of a named flag, or `None` when unset.
pub async fn flag_value(db: &Database, name: &str) -> Result<Option<String>, GigwatchError> {
    let name = name.to_string();
    db.connection()
        .call(move |conn| {
            let value: Option<String> = conn
                .query_row(
                    "SELECT value FROM flags WHERE name = ?1",
                    params![name],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Set a named flag, creating it if absent.
pub async fn set_flag(db: &Database, name: &str, value: &str) -> Result<(), GigwatchError> {
    let name = name.to_string();
    let value = value.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO flags (name, value) VALUES (?1, ?2)
                 ON CONFLICT(name) DO UPDATE SET value = excluded.value",
                params![name, value],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Convenience setter for the scraper flag.
pub async fn set_scraper_enabled(db: &Database, enabled: bool) -> Result<(), GigwatchError> {
    set_flag(db, SCRAPER_FLAG, if enabled { "true" } else { "false" }).await
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "t" | "yes"
    )
}

/// [`FlagSource`] backed by the flags table.
///
/// Polled by the scheduler before every scrape activity; never caches. A
/// storage failure is reported as `Unreachable`, distinct from an operator
/// `Disabled`.
pub struct SqliteFlags {
    db: Database,
}

impl SqliteFlags {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FlagSource for SqliteFlags {
    async fn scraper_state(&self) -> FlagState {
        match flag_value(&self.db, SCRAPER_FLAG).await {
            Ok(Some(value)) if is_truthy(&value) => FlagState::Enabled,
            Ok(_) => FlagState::Disabled,
            Err(e) => {
                warn!(error = %e, "flag store unreachable");
                FlagState::Unreachable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn test_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn scraper_flag_defaults_to_enabled() {
        let (db, _dir) = test_db().await;
        let flags = SqliteFlags::new(db);
        assert_eq!(flags.scraper_state().await, FlagState::Enabled);
    }

    #[tokio::test]
    async fn stop_then_run_round_trips() {
        let (db, _dir) = test_db().await;
        set_scraper_enabled(&db, false).await.unwrap();
        let flags = SqliteFlags::new(db.clone());
        assert_eq!(flags.scraper_state().await, FlagState::Disabled);

        set_scraper_enabled(&db, true).await.unwrap();
        assert_eq!(flags.scraper_state().await, FlagState::Enabled);
    }

    #[tokio::test]
    async fn truthy_spellings_are_accepted() {
        let (db, _dir) = test_db().await;
        for value in ["1", "true", "T", " YES "] {
            set_flag(&db, SCRAPER_FLAG, value).await.unwrap();
            let flags = SqliteFlags::new(db.clone());
            assert_eq!(flags.scraper_state().await, FlagState::Enabled, "{value:?}");
        }
        set_flag(&db, SCRAPER_FLAG, "0").await.unwrap();
        let flags = SqliteFlags::new(db.clone());
        assert_eq!(flags.scraper_state().await, FlagState::Disabled);
    }

    #[tokio::test]
    async fn missing_flag_reads_as_disabled() {
        let (db, _dir) = test_db().await;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute("DELETE FROM flags", [])?;
                Ok(())
            })
            .await
            .unwrap();
        let flags = SqliteFlags::new(db);
        assert_eq!(flags.scraper_state().await, FlagState::Disabled);
    }
}
