// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./gigwatch.toml` >
//! `~/.config/gigwatch/gigwatch.toml` > `/etc/gigwatch/gigwatch.toml`
//! with environment variable overrides via the `GIGWATCH_` prefix.

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::GigwatchConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/gigwatch/gigwatch.toml` (system-wide)
/// 3. `~/.config/gigwatch/gigwatch.toml` (user XDG config)
/// 4. `./gigwatch.toml` (local directory)
/// 5. `GIGWATCH_*` environment variables
pub fn load_config() -> Result<GigwatchConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GigwatchConfig::default()))
        .merge(Toml::file("/etc/gigwatch/gigwatch.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("gigwatch/gigwatch.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("gigwatch.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<GigwatchConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GigwatchConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<GigwatchConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GigwatchConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `GIGWATCH_TELEGRAM_BOT_TOKEN` must map
/// to `telegram.bot_token`, not `telegram.bot.token`.
fn env_provider() -> Env {
    Env::prefixed("GIGWATCH_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("telegram_", "telegram.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("board_", "board.", 1)
            .replacen("schedule_", "schedule.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_string_overrides_defaults() {
        let config = load_config_from_str(
            r#"
            [agent]
            log_level = "debug"

            [schedule]
            scrape_interval_minutes = 15
            "#,
        )
        .unwrap();
        assert_eq!(config.agent.log_level, "debug");
        assert_eq!(config.schedule.scrape_interval_minutes, 15);
        // Untouched sections keep defaults.
        assert_eq!(config.schedule.scan_interval_minutes, 5);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = load_config_from_str(
            r#"
            [agent]
            log_levle = "debug"
            "#,
        );
        assert!(result.is_err(), "typoed key should be rejected");
    }

    #[test]
    fn empty_string_yields_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.agent.name, "gigwatch");
    }
}
