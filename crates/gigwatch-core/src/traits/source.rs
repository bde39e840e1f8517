// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Job-board source trait.

use async_trait::async_trait;

use crate::error::GigwatchError;
use crate::types::RawPosting;

/// Yields freshly scraped posting records from a board search URL.
///
/// Implementations own the HTTP and extraction details; the pipeline only
/// sees the raw records. A fetch failure surfaces as one error for the whole
/// batch -- the scheduler skips the tick and retries on the next one.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Fetches the search results at `url` and extracts posting records.
    ///
    /// Defective cards are skipped by the extractor, not reported here.
    async fn fetch_postings(&self, url: &str) -> Result<Vec<RawPosting>, GigwatchError>;
}
