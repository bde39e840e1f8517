// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. The `Database` handle IS the single writer: clones share the same
//! background thread, and query modules accept `&Database` and call through
//! `conn.call()`. Do NOT open additional connections for writes.

use std::time::Duration;

use gigwatch_core::GigwatchError;
use tracing::debug;

use crate::migrations;

/// Convert a tokio-rusqlite error into `GigwatchError::Storage`.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> GigwatchError {
    GigwatchError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the SQLite database behind the single background writer thread.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (creating if necessary) the database at `path`, apply PRAGMAs,
    /// and run all pending migrations.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, GigwatchError> {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| GigwatchError::Storage {
                    source: Box::new(e),
                })?;
            }
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| map_tr_err(e.into()))?;

        let journal = if wal_mode { "WAL" } else { "DELETE" };
        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            // journal_mode returns the resulting mode as a row.
            let _mode: String =
                conn.query_row(&format!("PRAGMA journal_mode = {journal}"), [], |row| {
                    row.get(0)
                })?;
            conn.execute_batch(
                "PRAGMA synchronous = NORMAL;
                 PRAGMA foreign_keys = ON;",
            )?;
            conn.busy_timeout(Duration::from_secs(5))?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        let migrated = conn
            .call(|conn| Ok(migrations::run_migrations(conn)))
            .await
            .map_err(map_tr_err)?;
        migrated?;

        debug!(path, journal, "database opened");
        Ok(Self { conn })
    }

    /// Returns the underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Lightweight liveness check.
    pub async fn health_check(&self) -> Result<(), GigwatchError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    /// Flush pending WAL frames back into the main database file.
    ///
    /// Called on shutdown; the connection itself is released on drop.
    pub async fn close(&self) -> Result<(), GigwatchError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}
