// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Posting tag operations.

use gigwatch_core::{GigwatchError, RawTag};
use rusqlite::params;

use crate::database::Database;

/// Replace the tag set of `posting_id` with the provided tags: delete-all,
/// then insert. Tags with empty names are skipped; duplicate
/// (name, slug) pairs within one input collapse to a single row.
///
/// Contract: callers must skip this call when the incoming list is empty --
/// an empty input wipes the stored set. The store does not enforce that.
///
/// The delete and inserts run inside one transaction, so readers never see
/// a mix of old and new tags.
pub async fn replace_tags(
    db: &Database,
    posting_id: i64,
    tags: Vec<RawTag>,
) -> Result<(), GigwatchError> {
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "DELETE FROM posting_tags WHERE posting_id = ?1",
                params![posting_id],
            )?;
            for tag in &tags {
                if tag.name.is_empty() {
                    continue;
                }
                tx.execute(
                    "INSERT OR IGNORE INTO posting_tags (posting_id, name, slug, href)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![posting_id, tag.name, tag.slug, tag.href],
                )?;
            }
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Current tag set of a single posting, insertion-ordered.
pub async fn tags_for_posting(db: &Database, posting_id: i64) -> Result<Vec<RawTag>, GigwatchError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT name, slug, href FROM posting_tags
                 WHERE posting_id = ?1 ORDER BY id",
            )?;
            let rows = stmt.query_map(params![posting_id], |row| {
                Ok(RawTag {
                    name: row.get(0)?,
                    slug: row.get(1)?,
                    href: row.get(2)?,
                })
            })?;
            let mut tags = Vec::new();
            for row in rows {
                tags.push(row?);
            }
            Ok(tags)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
