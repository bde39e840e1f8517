// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across collaborator traits and the gigwatch pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// External chat identity of a registered user.
///
/// This is the recipient address the transport delivers to, not the
/// storage surrogate id.
pub type ChatId = i64;

/// Health status reported by collaborator health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Collaborator is fully operational.
    Healthy,
    /// Collaborator is operational but experiencing issues.
    Degraded(String),
    /// Collaborator is not operational.
    Unhealthy(String),
}

/// Role assigned to a registered user.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Normal,
    Admin,
}

/// A skill anchor attached to a scraped posting card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTag {
    /// Display name as it appears on the board.
    pub name: String,
    /// Board-side slug, when the anchor exposes one.
    pub slug: Option<String>,
    /// Source link of the skill anchor.
    pub href: Option<String>,
}

/// One freshly scraped posting, before change detection and persistence.
///
/// The persister rejects records with an empty `title` or `url`; everything
/// else is optional.
#[derive(Debug, Clone)]
pub struct RawPosting {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    /// Board-side publication time when the card exposes one.
    pub posted_at: Option<DateTime<Utc>>,
    pub tags: Vec<RawTag>,
}

/// Tri-state answer from a [`FlagSource`](crate::traits::FlagSource).
///
/// `Unreachable` is distinct from `Disabled` so callers can tell "the
/// operator turned scraping off" apart from "the flag store is down".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagState {
    Enabled,
    Disabled,
    Unreachable,
}
