// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Posting store operations: existence check, upsert-by-url, time-windowed
//! retrieval.
//!
//! The `url` column carries no UNIQUE constraint, so upsert is an explicit
//! check-then-act over the most-recently-inserted row per url. That two-step
//! is safe here because the process has exactly one writer (the scrape job
//! on the single tokio-rusqlite thread); it is NOT safe under multi-writer
//! deployment.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use gigwatch_core::{GigwatchError, RawTag};
use rusqlite::{OptionalExtension, params};

use crate::database::Database;
use crate::models::{
    NewPosting, PostingWithTags, SYSTEM_OWNER_ID, StoredPosting, fmt_ts, parse_ts,
};

const POSTING_COLUMNS: &str = "id, user_id, posted_at, title, description, url";

fn posting_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredPosting> {
    let posted_at: Option<String> = row.get(2)?;
    Ok(StoredPosting {
        id: row.get(0)?,
        user_id: row.get(1)?,
        posted_at: posted_at.as_deref().and_then(parse_ts),
        title: row.get(3)?,
        description: row.get(4)?,
        url: row.get(5)?,
    })
}

/// True iff at least one row has that url.
pub async fn exists_by_url(db: &Database, url: &str) -> Result<bool, GigwatchError> {
    let url = url.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare("SELECT 1 FROM postings WHERE url = ?1 LIMIT 1")?;
            let found = stmt.exists(params![url])?;
            Ok(found)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert a posting for `url`, or update the most-recently-inserted row
/// with that url in place.
///
/// On update, only provided fields overwrite: a `None` description or
/// posted_at keeps the stored value. On insert, posted_at defaults to the
/// current time. Returns the affected surrogate id.
pub async fn upsert_by_url(db: &Database, posting: NewPosting) -> Result<i64, GigwatchError> {
    db.connection()
        .call(move |conn| {
            let existing: Option<i64> = conn
                .query_row(
                    "SELECT id FROM postings WHERE url = ?1 ORDER BY id DESC LIMIT 1",
                    params![posting.url],
                    |row| row.get(0),
                )
                .optional()?;

            match existing {
                Some(id) => {
                    conn.execute(
                        "UPDATE postings
                         SET title = ?1,
                             description = COALESCE(?2, description),
                             posted_at = COALESCE(?3, posted_at)
                         WHERE id = ?4",
                        params![
                            posting.title,
                            posting.description,
                            posting.posted_at.map(fmt_ts),
                            id,
                        ],
                    )?;
                    Ok(id)
                }
                None => {
                    let posted_at = posting.posted_at.unwrap_or_else(Utc::now);
                    conn.execute(
                        "INSERT INTO postings (user_id, posted_at, title, description, url)
                         VALUES (?1, ?2, ?3, ?4, ?5)",
                        params![
                            SYSTEM_OWNER_ID,
                            fmt_ts(posted_at),
                            posting.title,
                            posting.description,
                            posting.url,
                        ],
                    )?;
                    Ok(conn.last_insert_rowid())
                }
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// The most-recently-inserted row matching `url`, or `None`.
pub async fn get_by_url(db: &Database, url: &str) -> Result<Option<StoredPosting>, GigwatchError> {
    let url = url.to_string();
    db.connection()
        .call(move |conn| {
            let posting = conn
                .query_row(
                    &format!(
                        "SELECT {POSTING_COLUMNS} FROM postings
                         WHERE url = ?1 ORDER BY id DESC LIMIT 1"
                    ),
                    params![url],
                    posting_from_row,
                )
                .optional()?;
            Ok(posting)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Most recent postings, ordered by posted_at descending (nulls last),
/// ties broken by descending id. Used as a connectivity probe.
pub async fn recent(db: &Database, limit: u32) -> Result<Vec<StoredPosting>, GigwatchError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {POSTING_COLUMNS} FROM postings
                 ORDER BY (posted_at IS NULL), posted_at DESC, id DESC
                 LIMIT ?1"
            ))?;
            let rows = stmt.query_map(params![limit], posting_from_row)?;
            let mut postings = Vec::new();
            for row in rows {
                postings.push(row?);
            }
            Ok(postings)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Postings with `posted_at >= since` (all postings when `since` is `None`),
/// same ordering as [`recent`], each annotated with its current tag set.
///
/// Both phases run inside one call on the single connection, so the tag sets
/// observed are consistent with the posting rows.
pub async fn postings_since(
    db: &Database,
    since: Option<DateTime<Utc>>,
    limit: u32,
) -> Result<Vec<PostingWithTags>, GigwatchError> {
    let since_text = since.map(fmt_ts);
    db.connection()
        .call(move |conn| {
            let mut postings = Vec::new();
            match since_text {
                Some(ts) => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {POSTING_COLUMNS} FROM postings
                         WHERE posted_at >= ?1
                         ORDER BY (posted_at IS NULL), posted_at DESC, id DESC
                         LIMIT ?2"
                    ))?;
                    let rows = stmt.query_map(params![ts, limit], posting_from_row)?;
                    for row in rows {
                        postings.push(row?);
                    }
                }
                None => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {POSTING_COLUMNS} FROM postings
                         ORDER BY (posted_at IS NULL), posted_at DESC, id DESC
                         LIMIT ?1"
                    ))?;
                    let rows = stmt.query_map(params![limit], posting_from_row)?;
                    for row in rows {
                        postings.push(row?);
                    }
                }
            }

            if postings.is_empty() {
                return Ok(Vec::new());
            }

            let ids: Vec<i64> = postings.iter().map(|p| p.id).collect();
            let placeholders = vec!["?"; ids.len()].join(",");
            let mut stmt = conn.prepare(&format!(
                "SELECT posting_id, name, slug, href FROM posting_tags
                 WHERE posting_id IN ({placeholders})"
            ))?;
            let mut tag_map: HashMap<i64, Vec<RawTag>> = HashMap::new();
            let rows = stmt.query_map(rusqlite::params_from_iter(ids.iter()), |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    RawTag {
                        name: row.get(1)?,
                        slug: row.get(2)?,
                        href: row.get(3)?,
                    },
                ))
            })?;
            for row in rows {
                let (posting_id, tag) = row?;
                if !tag.name.is_empty() {
                    tag_map.entry(posting_id).or_default().push(tag);
                }
            }

            Ok(postings
                .into_iter()
                .map(|posting| {
                    let tags = tag_map.remove(&posting.id).unwrap_or_default();
                    PostingWithTags { posting, tags }
                })
                .collect())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
