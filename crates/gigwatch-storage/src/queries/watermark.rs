// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification-scan watermark persistence.
//!
//! A single scalar in a single-row table. Read once at scan start, written
//! once at scan end by the same thread of control; no other component
//! touches it.

use chrono::{DateTime, Utc};
use gigwatch_core::GigwatchError;
use rusqlite::{OptionalExtension, params};

use crate::database::Database;
use crate::models::{fmt_ts, parse_ts};

/// Timestamp of the last successfully completed scan, or `None` if no scan
/// has ever completed.
pub async fn last_scan_at(db: &Database) -> Result<Option<DateTime<Utc>>, GigwatchError> {
    db.connection()
        .call(|conn| {
            let text: Option<String> = conn
                .query_row("SELECT last_scan_at FROM scan_state WHERE id = 1", [], |row| {
                    row.get(0)
                })
                .optional()?;
            Ok(text.as_deref().and_then(parse_ts))
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Advance the watermark to `at`, creating the row on first write.
pub async fn mark_scan_complete(db: &Database, at: DateTime<Utc>) -> Result<(), GigwatchError> {
    let text = fmt_ts(at);
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO scan_state (id, last_scan_at) VALUES (1, ?1)
                 ON CONFLICT(id) DO UPDATE SET last_scan_at = excluded.last_scan_at",
                params![text],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
