// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `gigwatch serve` command implementation.
//!
//! Wires the collaborators together: SQLite storage, the Telegram transport
//! and command dispatcher, the HTTP job source, and the storage-backed
//! scraper flag -- then runs the tick scheduler until a shutdown signal.

use std::sync::Arc;

use gigwatch_config::GigwatchConfig;
use gigwatch_core::{GigwatchError, HealthStatus, Transport};
use gigwatch_engine::Scheduler;
use gigwatch_engine::shutdown;
use gigwatch_scraper::HttpJobSource;
use gigwatch_storage::{Database, SqliteFlags};
use gigwatch_telegram::TelegramTransport;
use gigwatch_telegram::commands::spawn_command_bot;
use tracing::{error, info, warn};

/// Runs the `gigwatch serve` command.
pub async fn run_serve(config: GigwatchConfig) -> Result<(), GigwatchError> {
    info!("starting gigwatch serve");

    let db = Database::open(&config.storage.database_path, config.storage.wal_mode).await?;
    info!(path = %config.storage.database_path, "storage initialized");

    let transport = TelegramTransport::new(&config.telegram).map_err(|e| {
        error!(error = %e, "failed to initialize Telegram transport");
        eprintln!(
            "error: Telegram bot token required. Set telegram.bot_token in gigwatch.toml \
             or the GIGWATCH_TELEGRAM_BOT_TOKEN environment variable."
        );
        e
    })?;

    match transport.health_check().await {
        Ok(HealthStatus::Healthy) => info!("telegram transport healthy"),
        Ok(other) => warn!(status = ?other, "telegram transport degraded at startup"),
        Err(e) => warn!(error = %e, "telegram health check failed at startup"),
    }

    let command_handle = spawn_command_bot(transport.bot().clone(), db.clone());

    let source = HttpJobSource::new(&config.board)?;
    let flags = SqliteFlags::new(db.clone());

    let scheduler = Scheduler::new(
        db.clone(),
        Arc::new(source),
        Arc::new(transport),
        Arc::new(flags),
        config.board.clone(),
        config.schedule.clone(),
    );

    let cancel = shutdown::install_signal_handler();
    scheduler.run(cancel).await;

    // The dispatcher long-polls indefinitely; stop it with the scheduler.
    command_handle.abort();
    db.close().await?;

    info!("gigwatch serve shutdown complete");
    Ok(())
}
