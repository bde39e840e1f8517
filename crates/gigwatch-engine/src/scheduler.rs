// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The single-threaded tick loop driving both periodic activities.
//!
//! Two activities interleave on independent due-times inside one control
//! loop: scrape-and-persist, and the watermark-driven notification scan.
//! The loop polls at a short fixed tick and runs whichever activity is
//! due; activities never run concurrently with each other. Cancellation is
//! cooperative -- the token is checked between activities, never mid-way
//! through one.

use std::sync::Arc;
use std::time::Duration;

use gigwatch_config::model::{BoardConfig, ScheduleConfig};
use gigwatch_core::{FlagSource, FlagState, GigwatchError, JobSource, Transport};
use gigwatch_scraper::{SearchParams, build_search_url};
use gigwatch_storage::Database;
use gigwatch_storage::queries::skills;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::ingest;
use crate::scan;

/// Search URL driven by registered skills, falling back to configured
/// defaults when the registry is empty or unreachable.
pub async fn search_url(db: &Database, board: &BoardConfig) -> Result<String, GigwatchError> {
    let slugs = match skills::active_skill_slugs(db).await {
        Ok(slugs) if !slugs.is_empty() => slugs,
        Ok(_) => board.default_skills.clone(),
        Err(e) => {
            warn!(error = %e, "skill registry unreachable; using default skills");
            board.default_skills.clone()
        }
    };
    build_search_url(
        &board.base_url,
        &SearchParams {
            language: board.language.clone(),
            skills: slugs,
            query: board.query.clone(),
            page: None,
            sort: None,
        },
    )
}

/// Periodic driver for scraping and notification scans.
pub struct Scheduler {
    db: Database,
    source: Arc<dyn JobSource>,
    transport: Arc<dyn Transport>,
    flags: Arc<dyn FlagSource>,
    board: BoardConfig,
    schedule: ScheduleConfig,
}

impl Scheduler {
    pub fn new(
        db: Database,
        source: Arc<dyn JobSource>,
        transport: Arc<dyn Transport>,
        flags: Arc<dyn FlagSource>,
        board: BoardConfig,
        schedule: ScheduleConfig,
    ) -> Self {
        Self {
            db,
            source,
            transport,
            flags,
            board,
            schedule,
        }
    }

    /// Run the tick loop until `cancel` fires.
    ///
    /// Both activities are due immediately on start; afterwards each
    /// reschedules itself on its own interval. Activity failures are
    /// logged and retried on the next due tick -- nothing here is fatal.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(Duration::from_secs(self.schedule.tick_secs));
        let scrape_every = Duration::from_secs(self.schedule.scrape_interval_minutes * 60);
        let scan_every = Duration::from_secs(self.schedule.scan_interval_minutes * 60);

        let mut next_scrape = Instant::now();
        let mut next_scan = Instant::now();

        info!(
            tick_secs = self.schedule.tick_secs,
            scrape_interval_minutes = self.schedule.scrape_interval_minutes,
            scan_interval_minutes = self.schedule.scan_interval_minutes,
            "scheduler started"
        );

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let now = Instant::now();
                    if now >= next_scrape {
                        self.scrape_and_persist().await;
                        next_scrape = now + scrape_every;
                    }
                    if now >= next_scan {
                        self.notification_scan().await;
                        next_scan = now + scan_every;
                    }
                }
                _ = cancel.cancelled() => {
                    info!("scheduler shutting down");
                    break;
                }
            }
        }
    }

    /// One scrape-and-persist activity: flag poll, URL build, fetch, ingest.
    async fn scrape_and_persist(&self) {
        match self.flags.scraper_state().await {
            FlagState::Enabled => {}
            FlagState::Disabled => {
                debug!("scrape skipped: disabled by flag");
                return;
            }
            FlagState::Unreachable => {
                warn!("scrape skipped: flag store unreachable");
                return;
            }
        }

        let url = match self.search_url().await {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "could not build search url");
                return;
            }
        };

        let batch = match self.source.fetch_postings(&url).await {
            Ok(batch) => batch,
            Err(e) => {
                warn!(url, error = %e, "scrape failed; retrying next interval");
                return;
            }
        };

        let report = ingest::persist_batch(&self.db, batch).await;
        info!(
            upserted = report.upserted,
            fresh = report.fresh,
            skipped = report.skipped,
            "scrape-and-persist complete"
        );
    }

    async fn search_url(&self) -> Result<String, GigwatchError> {
        search_url(&self.db, &self.board).await
    }

    /// One notification-scan activity.
    async fn notification_scan(&self) {
        if let Err(e) = scan::run_scan(&self.db, self.transport.as_ref(), self.schedule.scan_limit).await {
            warn!(error = %e, "notification scan aborted; watermark not advanced");
        }
    }
}
