// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gigwatch -- freelance job-board monitor.
//!
//! This is the binary entry point. It loads and validates configuration,
//! initializes tracing, and dispatches to the selected subcommand.

mod oneshot;
mod serve;
mod status;

use clap::{Parser, Subcommand};

/// Gigwatch -- freelance job-board monitor.
#[derive(Parser, Debug)]
#[command(name = "gigwatch", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the monitor: periodic scraping, matching, and notification scans.
    Serve,
    /// Scrape the board once and persist the batch.
    Scrape,
    /// Run one notification scan over postings since the watermark.
    Scan,
    /// Show storage, watermark, and scraper-flag status.
    Status,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match gigwatch_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            for error in &errors {
                eprintln!("config error: {error}");
            }
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    let result = match cli.command {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Scrape => oneshot::run_scrape(config).await,
        Commands::Scan => oneshot::run_scan(config).await,
        Commands::Status => status::run_status(&config).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gigwatch={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn binary_loads_config_defaults() {
        // Verify config loads with defaults (no config file needed).
        let config = gigwatch_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.agent.name, "gigwatch");
    }
}
