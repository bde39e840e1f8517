// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote run/stop flag trait.

use async_trait::async_trait;

use crate::types::FlagState;

/// Answers "should the scraper run right now?".
///
/// Injected into the scheduler at construction and polled before every
/// scrape activity -- never cached at process start. The answer is tri-state:
/// an unreachable flag store is reported as [`FlagState::Unreachable`], not
/// silently collapsed into `Disabled`.
#[async_trait]
pub trait FlagSource: Send + Sync {
    /// Current state of the scraper flag.
    async fn scraper_state(&self) -> FlagState;
}
