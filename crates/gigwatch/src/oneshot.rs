// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-shot `scrape` and `scan` commands.
//!
//! Operator-invoked equivalents of the two scheduled activities, without
//! the tick loop. The scrape runs regardless of the remote flag -- an
//! explicit command outranks it.

use gigwatch_config::GigwatchConfig;
use gigwatch_core::{GigwatchError, JobSource};
use gigwatch_engine::{persist_batch, run_scan as run_engine_scan, search_url};
use gigwatch_scraper::HttpJobSource;
use gigwatch_storage::Database;
use gigwatch_telegram::TelegramTransport;
use tracing::info;

/// Scrape the board once and persist the batch.
pub async fn run_scrape(config: GigwatchConfig) -> Result<(), GigwatchError> {
    let db = Database::open(&config.storage.database_path, config.storage.wal_mode).await?;
    let source = HttpJobSource::new(&config.board)?;

    let url = search_url(&db, &config.board).await?;
    info!(url, "scraping board");
    let batch = source.fetch_postings(&url).await?;
    let report = persist_batch(&db, batch).await;

    println!(
        "Inserted/updated: {} ({} new, {} skipped)",
        report.upserted, report.fresh, report.skipped
    );

    db.close().await
}

/// Run one notification scan over postings since the watermark.
pub async fn run_scan(config: GigwatchConfig) -> Result<(), GigwatchError> {
    let db = Database::open(&config.storage.database_path, config.storage.wal_mode).await?;
    let transport = TelegramTransport::new(&config.telegram)?;

    let report = run_engine_scan(&db, &transport, config.schedule.scan_limit).await?;

    println!(
        "Scanned {} postings: {} matches, {} delivered, {} failed",
        report.postings, report.matched, report.delivered, report.failed
    );

    db.close().await
}
