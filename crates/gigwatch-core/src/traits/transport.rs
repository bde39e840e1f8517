// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat transport trait for notification delivery (Telegram, etc.).

use async_trait::async_trait;

use crate::error::GigwatchError;
use crate::types::{ChatId, HealthStatus};

/// Delivers notification text to a chat recipient.
///
/// Any error is treated by the dispatcher as a recoverable per-recipient
/// failure: it is logged with the (recipient, posting) pair and never aborts
/// the remaining notifications of a scan.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Returns the human-readable name of this transport.
    fn name(&self) -> &str;

    /// Sends `text` to the given recipient.
    async fn deliver(&self, recipient: ChatId, text: &str) -> Result<(), GigwatchError>;

    /// Performs a health check and returns the transport's current status.
    async fn health_check(&self) -> Result<HealthStatus, GigwatchError>;
}
