// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory collaborator doubles for engine tests.

use std::collections::BTreeSet;

use async_trait::async_trait;
use gigwatch_core::{
    ChatId, FlagSource, FlagState, GigwatchError, HealthStatus, JobSource, RawPosting, Transport,
};
use tokio::sync::Mutex;

/// Transport that records deliveries and can fail for chosen recipients.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<(ChatId, String)>>,
    fail_for: BTreeSet<ChatId>,
}

impl RecordingTransport {
    pub fn failing_for(ids: &[ChatId]) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_for: ids.iter().copied().collect(),
        }
    }

    pub async fn sent(&self) -> Vec<(ChatId, String)> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    fn name(&self) -> &str {
        "recording"
    }

    async fn deliver(&self, recipient: ChatId, text: &str) -> Result<(), GigwatchError> {
        if self.fail_for.contains(&recipient) {
            return Err(GigwatchError::Channel {
                message: format!("injected failure for {recipient}"),
                source: None,
            });
        }
        self.sent.lock().await.push((recipient, text.to_string()));
        Ok(())
    }

    async fn health_check(&self) -> Result<HealthStatus, GigwatchError> {
        Ok(HealthStatus::Healthy)
    }
}

/// Job source that serves a fixed batch and counts fetches.
pub struct StaticJobSource {
    batch: Vec<RawPosting>,
    fetches: Mutex<usize>,
}

impl StaticJobSource {
    pub fn new(batch: Vec<RawPosting>) -> Self {
        Self {
            batch,
            fetches: Mutex::new(0),
        }
    }

    pub async fn fetch_count(&self) -> usize {
        *self.fetches.lock().await
    }
}

#[async_trait]
impl JobSource for StaticJobSource {
    async fn fetch_postings(&self, _url: &str) -> Result<Vec<RawPosting>, GigwatchError> {
        *self.fetches.lock().await += 1;
        Ok(self.batch.clone())
    }
}

/// Flag source pinned to one state.
pub struct FixedFlags(pub FlagState);

#[async_trait]
impl FlagSource for FixedFlags {
    async fn scraper_state(&self) -> FlagState {
        self.0
    }
}
