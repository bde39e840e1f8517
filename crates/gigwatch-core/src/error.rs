// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the gigwatch job-board monitor.

use thiserror::Error;

/// The primary error type used across all gigwatch collaborator traits and
/// core operations.
///
/// Nothing here is fatal to the process: the tick loop catches, logs, and
/// retries on the next scheduled tick. Variants map to the failure classes
/// the pipeline distinguishes -- unreachable collaborators, invalid scraped
/// items, per-recipient delivery failures.
#[derive(Debug, Error)]
pub enum GigwatchError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Chat transport errors (delivery failure, invalid recipient, rate limiting).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Job-board fetch or extraction errors (HTTP failure, unexpected markup).
    #[error("scrape error: {message}")]
    Scrape {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A scraped record is missing a required field and was dropped.
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
