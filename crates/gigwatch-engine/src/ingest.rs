// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Change detection and persistence of scraped posting batches.
//!
//! Each posting moves through: validate -> existence check -> upsert ->
//! tag replacement. The new-vs-existing decision happens *before* the
//! upsert because the upsert does not report whether it inserted or
//! updated. That check-then-act is not atomic against external writers;
//! it is safe here because the scrape job is the only writer.

use gigwatch_core::{GigwatchError, RawPosting};
use gigwatch_storage::{Database, NewPosting};
use gigwatch_storage::queries::{postings, tags};
use tracing::{debug, warn};

/// What a batch ingest did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Posting rows inserted or updated. A failed tag write does not
    /// remove a posting from this count -- its row persisted.
    pub upserted: usize,
    /// First-sight URLs among the upserted.
    pub fresh: usize,
    /// Records dropped: missing required fields or a storage failure on
    /// the row itself.
    pub skipped: usize,
}

/// Persist a batch of scraped postings.
///
/// Per-item failure isolation: a record that fails validation or storage is
/// logged and skipped; the rest of the batch continues.
pub async fn persist_batch(db: &Database, batch: Vec<RawPosting>) -> IngestReport {
    let mut report = IngestReport::default();
    for raw in batch {
        let url = raw.url.clone();
        match persist_one(db, raw).await {
            Ok(fresh) => {
                report.upserted += 1;
                if fresh {
                    report.fresh += 1;
                }
            }
            Err(GigwatchError::Validation(reason)) => {
                report.skipped += 1;
                debug!(url, reason, "scraped record dropped");
            }
            Err(e) => {
                report.skipped += 1;
                warn!(url, error = %e, "failed to persist posting");
            }
        }
    }
    report
}

/// Persist one posting. Returns true when the URL was seen for the first
/// time.
async fn persist_one(db: &Database, raw: RawPosting) -> Result<bool, GigwatchError> {
    if raw.title.trim().is_empty() {
        return Err(GigwatchError::Validation("missing title".to_string()));
    }
    if raw.url.trim().is_empty() {
        return Err(GigwatchError::Validation("missing url".to_string()));
    }

    let fresh = !postings::exists_by_url(db, &raw.url).await?;

    let posting_id = postings::upsert_by_url(
        db,
        NewPosting {
            title: raw.title,
            url: raw.url.clone(),
            description: raw.description,
            // None preserves the stored timestamp on update and defaults
            // to now on insert.
            posted_at: raw.posted_at,
        },
    )
    .await?;

    if raw.tags.is_empty() {
        // A re-scrape that lost its tags (parsing hiccup, markup change)
        // must not wipe previously recorded ones.
        debug!(posting_id, "no tags in scrape; keeping recorded tags");
    } else if let Err(e) = tags::replace_tags(db, posting_id, raw.tags).await {
        // The posting row already persisted; it stays queryable with its
        // previous (possibly empty) tag set.
        warn!(posting_id, url = %raw.url, error = %e, "tag replacement failed");
    }

    Ok(fresh)
}
