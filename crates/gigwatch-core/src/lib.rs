// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the gigwatch job-board monitor.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the gigwatch workspace. Collaborator
//! implementations (storage, transport, scraper) live in their own crates
//! and implement the traits defined here.

pub mod error;
pub mod slug;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::GigwatchError;
pub use slug::{canonical_slug, normalize_slug};
pub use types::{ChatId, FlagState, HealthStatus, RawPosting, RawTag, Role};

// Re-export collaborator traits at crate root.
pub use traits::{FlagSource, JobSource, Transport};
