// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Listing extraction from board search-result HTML.
//!
//! Pure functions over HTML text: no HTTP here, so extraction is testable
//! against fixtures. Defective cards (missing title or link) are skipped
//! silently; a card is never worth failing the batch over.

use gigwatch_core::{RawPosting, RawTag};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

const CARD_SELECTOR: &str = ".project-item.js-project";
const TITLE_SELECTOR: &str = ".project-title";
const DESCRIPTION_SELECTOR: &str = ".html-desc.project-details";
const LINK_SELECTOR: &str = "a[href^='/job/']";
const SKILL_SELECTOR: &str = "div.skills a.skill";
const SKILL_NAME_SELECTOR: &str = "h3";

fn selector(s: &str) -> Option<Selector> {
    Selector::parse(s).ok()
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Extract posting records from a search-results page.
///
/// Relative links are resolved against `base`. Returns one record per card
/// that has both a non-empty title and a job link.
pub fn extract_postings(html: &str, base: &Url) -> Vec<RawPosting> {
    let (Some(card_sel), Some(title_sel), Some(desc_sel), Some(link_sel)) = (
        selector(CARD_SELECTOR),
        selector(TITLE_SELECTOR),
        selector(DESCRIPTION_SELECTOR),
        selector(LINK_SELECTOR),
    ) else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut results = Vec::new();

    for card in document.select(&card_sel) {
        let Some(title) = card.select(&title_sel).next().map(element_text) else {
            continue;
        };
        if title.is_empty() {
            continue;
        }

        let Some(href) = card
            .select(&link_sel)
            .next()
            .and_then(|el| el.value().attr("href"))
        else {
            // Some cards omit a valid job link; skip them rather than
            // persist a posting without its natural key.
            debug!(title, "skipping card without job link");
            continue;
        };
        let Ok(link) = base.join(href) else {
            continue;
        };

        let description = card
            .select(&desc_sel)
            .next()
            .map(element_text)
            .filter(|d| !d.is_empty());

        results.push(RawPosting {
            title,
            description,
            url: link.to_string(),
            posted_at: None,
            tags: extract_tags(card, base),
        });
    }

    results
}

/// Extract the skill anchors of one card.
///
/// The board encodes each skill's slug in the anchor's `?skills=` query
/// parameter; the anchor's `<h3>` carries the display name.
fn extract_tags(card: ElementRef<'_>, base: &Url) -> Vec<RawTag> {
    let (Some(skill_sel), Some(name_sel)) =
        (selector(SKILL_SELECTOR), selector(SKILL_NAME_SELECTOR))
    else {
        return Vec::new();
    };

    card.select(&skill_sel)
        .filter_map(|node| {
            let name = node.select(&name_sel).next().map(element_text)?;
            if name.is_empty() {
                return None;
            }
            let href = node
                .value()
                .attr("href")
                .and_then(|h| base.join(h).ok());
            let slug = href
                .as_ref()
                .and_then(|u| {
                    u.query_pairs()
                        .find(|(key, _)| key == "skills")
                        .map(|(_, value)| value.into_owned())
                })
                .filter(|s| !s.is_empty());
            Some(RawTag {
                name,
                slug,
                href: href.map(|u| u.to_string()),
            })
        })
        .collect()
}
