// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board search URL construction.
//!
//! The search is driven by skill slugs: the union of registered users'
//! skills when the registry has entries, configured defaults otherwise.
//! Callers pass whichever list applies; blank entries are normalized away.

use gigwatch_core::{GigwatchError, normalize_slug};
use url::Url;

/// Parameters of one board search.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    /// Listing language filter.
    pub language: String,
    /// Skill slugs to filter by; normalized before encoding.
    pub skills: Vec<String>,
    /// Optional free-text query.
    pub query: Option<String>,
    /// Optional result page.
    pub page: Option<u32>,
    /// Optional sort key.
    pub sort: Option<String>,
}

/// Build the search URL for `base` with the given parameters.
///
/// Skills are normalized, blank entries dropped, and joined with commas
/// into a single `skills` parameter; empty optional parameters are omitted
/// entirely.
pub fn build_search_url(base: &str, params: &SearchParams) -> Result<String, GigwatchError> {
    let mut url = Url::parse(base).map_err(|e| GigwatchError::Scrape {
        message: format!("invalid board base url {base:?}"),
        source: Some(Box::new(e)),
    })?;

    let slugs: Vec<String> = params
        .skills
        .iter()
        .map(|s| normalize_slug(s))
        .filter(|s| !s.is_empty())
        .collect();

    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("language", &params.language);
        if !slugs.is_empty() {
            pairs.append_pair("skills", &slugs.join(","));
        }
        if let Some(query) = params.query.as_deref().filter(|q| !q.is_empty()) {
            pairs.append_pair("query", query);
        }
        if let Some(page) = params.page {
            pairs.append_pair("page", &page.to_string());
        }
        if let Some(sort) = params.sort.as_deref().filter(|s| !s.is_empty()) {
            pairs.append_pair("sort", sort);
        }
    }

    Ok(url.to_string())
}
