// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram integration for the gigwatch monitor.
//!
//! Two halves: the [`Transport`] implementation used by notification
//! dispatch, and the long-polling command surface ([`commands`]) through
//! which users register and manage their skill profiles.

pub mod commands;

use async_trait::async_trait;
use gigwatch_config::model::TelegramConfig;
use gigwatch_core::{ChatId, GigwatchError, HealthStatus, Transport};
use teloxide::prelude::*;
use teloxide::types::Recipient;
use tracing::debug;

/// Telegram-backed [`Transport`].
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    /// Creates the transport. Requires `config.bot_token` to be set.
    pub fn new(config: &TelegramConfig) -> Result<Self, GigwatchError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            GigwatchError::Config("telegram.bot_token is required for the Telegram transport".into())
        })?;
        if token.is_empty() {
            return Err(GigwatchError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }
        Ok(Self {
            bot: Bot::new(token),
        })
    }

    /// Returns the underlying teloxide Bot, for the command dispatcher.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn deliver(&self, recipient: ChatId, text: &str) -> Result<(), GigwatchError> {
        self.bot
            .send_message(Recipient::Id(teloxide::types::ChatId(recipient)), text)
            .await
            .map_err(|e| GigwatchError::Channel {
                message: format!("failed to send message: {e}"),
                source: Some(Box::new(e)),
            })?;
        debug!(recipient, "telegram message sent");
        Ok(())
    }

    async fn health_check(&self) -> Result<HealthStatus, GigwatchError> {
        match self.bot.get_me().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Telegram bot unreachable: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_token_is_a_config_error() {
        let result = TelegramTransport::new(&TelegramConfig { bot_token: None });
        assert!(matches!(result, Err(GigwatchError::Config(_))));
    }

    #[test]
    fn empty_token_is_a_config_error() {
        let result = TelegramTransport::new(&TelegramConfig {
            bot_token: Some(String::new()),
        });
        assert!(matches!(result, Err(GigwatchError::Config(_))));
    }

    #[test]
    fn valid_token_builds_the_transport() {
        let transport = TelegramTransport::new(&TelegramConfig {
            bot_token: Some("123456:TEST-TOKEN".to_string()),
        })
        .unwrap();
        assert_eq!(transport.name(), "telegram");
    }
}
