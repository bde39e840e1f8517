// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The gigwatch pipeline core: change detection and persistence of scraped
//! batches, skill-overlap matching, notification dispatch, and the
//! watermark-driven scan scheduler.
//!
//! Everything here talks to collaborators through the traits in
//! `gigwatch-core`; the only concrete dependency is the SQLite store.

pub mod ingest;
pub mod matcher;
pub mod notify;
pub mod scan;
pub mod scheduler;
pub mod shutdown;

#[cfg(test)]
pub mod testing;

pub use ingest::{IngestReport, persist_batch};
pub use matcher::match_posting;
pub use notify::{DispatchOutcome, notify_matches};
pub use scan::{ScanReport, run_scan};
pub use scheduler::{Scheduler, search_url};
