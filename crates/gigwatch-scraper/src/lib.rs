// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Job-board collaborator for the gigwatch monitor.
//!
//! Three layers: search URL construction ([`url`]), pure HTML extraction
//! ([`extract`]), and the reqwest-backed [`JobSource`] implementation
//! ([`fetch`]). The pipeline core only sees [`RawPosting`] records.
//!
//! [`JobSource`]: gigwatch_core::JobSource
//! [`RawPosting`]: gigwatch_core::RawPosting

pub mod extract;
pub mod fetch;
pub mod url;

pub use extract::extract_postings;
pub use fetch::HttpJobSource;
pub use url::{SearchParams, build_search_url};
