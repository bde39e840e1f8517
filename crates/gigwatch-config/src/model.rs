// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the gigwatch job-board monitor.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level gigwatch configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values; only `telegram.bot_token` is required to actually deliver
/// notifications.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GigwatchConfig {
    /// Process identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Telegram bot integration settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Job-board search settings.
    #[serde(default)]
    pub board: BoardConfig,

    /// Tick-loop scheduling settings.
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

/// Process identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the monitor instance.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "gigwatch".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram bot integration configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. `None` disables delivery and the command bot.
    #[serde(default)]
    pub bot_token: Option<String>,
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("gigwatch").join("gigwatch.db"))
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_else(|| "gigwatch.db".to_string())
}

fn default_wal_mode() -> bool {
    true
}

/// Job-board search configuration.
///
/// `default_skills` seeds the search URL when no registered user has any
/// skills yet; once the registry has entries, their union drives the search.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BoardConfig {
    /// Base URL of the board's job search endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Listing language filter.
    #[serde(default = "default_language")]
    pub language: String,

    /// Fallback skill slugs used when the registry is empty.
    #[serde(default = "default_skills")]
    pub default_skills: Vec<String>,

    /// Optional free-text query appended to the search.
    #[serde(default)]
    pub query: Option<String>,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            language: default_language(),
            default_skills: default_skills(),
            query: None,
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.workana.com/jobs".to_string()
}

fn default_language() -> String {
    "es".to_string()
}

fn default_skills() -> Vec<String> {
    [
        "data-entry",
        "data-science",
        "english",
        "microsoft-excel",
        "mysql",
        "php",
        "python",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_http_timeout_secs() -> u64 {
    30
}

/// Tick-loop scheduling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleConfig {
    /// Poll interval of the tick loop, in seconds.
    #[serde(default = "default_tick_secs")]
    pub tick_secs: u64,

    /// Minutes between scrape-and-persist runs.
    #[serde(default = "default_interval_minutes")]
    pub scrape_interval_minutes: u64,

    /// Minutes between notification scans.
    #[serde(default = "default_interval_minutes")]
    pub scan_interval_minutes: u64,

    /// Maximum postings fetched per notification scan.
    #[serde(default = "default_scan_limit")]
    pub scan_limit: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            tick_secs: default_tick_secs(),
            scrape_interval_minutes: default_interval_minutes(),
            scan_interval_minutes: default_interval_minutes(),
            scan_limit: default_scan_limit(),
        }
    }
}

fn default_tick_secs() -> u64 {
    5
}

fn default_interval_minutes() -> u64 {
    5
}

fn default_scan_limit() -> u32 {
    200
}
