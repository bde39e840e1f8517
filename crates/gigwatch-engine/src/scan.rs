// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The watermark-driven notification scan.
//!
//! One scan: read watermark -> fetch postings in the window -> match each
//! against the user skill map -> dispatch -> advance the watermark. The
//! watermark only moves after the scan completes (success or empty
//! window); any fetch failure aborts the scan and leaves it untouched, so
//! the next tick retries the same window.

use std::collections::BTreeSet;

use chrono::Utc;
use gigwatch_core::{GigwatchError, Transport, normalize_slug};
use gigwatch_storage::Database;
use gigwatch_storage::queries::{postings, skills, watermark};
use tracing::{debug, info};

use crate::matcher::match_posting;
use crate::notify::notify_matches;

/// What a scan did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Postings in the scanned window.
    pub postings: usize,
    /// (user, posting) pairs that matched.
    pub matched: usize,
    /// Notifications delivered.
    pub delivered: usize,
    /// Notifications that failed delivery.
    pub failed: usize,
}

/// Run one notification scan over postings since the watermark.
///
/// The watermark advances to the scan's start time, not to the latest
/// posting's timestamp -- re-processing identically timestamped postings at
/// the window boundary is traded against a clock-skew gap for postings
/// stamped earlier than their insertion.
pub async fn run_scan(
    db: &Database,
    transport: &dyn Transport,
    limit: u32,
) -> Result<ScanReport, GigwatchError> {
    let since = watermark::last_scan_at(db).await?;
    let scan_started = Utc::now();

    let window = postings::postings_since(db, since, limit).await?;
    if window.is_empty() {
        // Still advance: otherwise an empty window is re-scanned forever.
        watermark::mark_scan_complete(db, scan_started).await?;
        debug!("scan window empty; watermark advanced");
        return Ok(ScanReport::default());
    }

    let skill_map = skills::active_user_skill_map(db).await?;
    let mut report = ScanReport {
        postings: window.len(),
        ..ScanReport::default()
    };

    // Fetch-returned order: posted_at descending, id descending.
    for entry in &window {
        let tag_slugs: BTreeSet<String> = entry
            .tags
            .iter()
            .map(|tag| {
                tag.slug
                    .clone()
                    .unwrap_or_else(|| normalize_slug(&tag.name))
            })
            .filter(|slug| !slug.is_empty())
            .collect();

        let matches = match_posting(&tag_slugs, &skill_map);
        report.matched += matches.len();

        let outcome = notify_matches(transport, &entry.posting, &matches).await;
        report.delivered += outcome.delivered;
        report.failed += outcome.failed;
    }

    // Dispatch failures do not block the advance; those pairs are not
    // retried.
    watermark::mark_scan_complete(db, scan_started).await?;
    info!(
        postings = report.postings,
        matched = report.matched,
        delivered = report.delivered,
        failed = report.failed,
        "notification scan complete"
    );
    Ok(report)
}
