// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation.
//!
//! Figment plus `deny_unknown_fields` catches shape errors; this module
//! catches value errors the type system cannot (zero intervals, unknown log
//! levels).

use crate::model::GigwatchConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized config, returning every problem found.
pub fn validate_config(config: &GigwatchConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(format!(
            "agent.log_level: unknown level {:?} (expected one of {})",
            config.agent.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    if config.schedule.tick_secs == 0 {
        errors.push("schedule.tick_secs: must be at least 1".to_string());
    }
    if config.schedule.scrape_interval_minutes == 0 {
        errors.push("schedule.scrape_interval_minutes: must be at least 1".to_string());
    }
    if config.schedule.scan_interval_minutes == 0 {
        errors.push("schedule.scan_interval_minutes: must be at least 1".to_string());
    }
    if config.schedule.scan_limit == 0 {
        errors.push("schedule.scan_limit: must be at least 1".to_string());
    }

    if config.board.base_url.is_empty() {
        errors.push("board.base_url: must not be empty".to_string());
    }
    if config.storage.database_path.is_empty() {
        errors.push("storage.database_path: must not be empty".to_string());
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
