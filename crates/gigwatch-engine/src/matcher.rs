// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Skill-overlap matching between posting tags and user skill profiles.
//!
//! Pure and deterministic: no I/O, sorted containers throughout. Slug
//! comparison goes through [`canonical_slug`] on both sides because board
//! slugs and user-entered skills are not always normalized by the same
//! code -- `data-science` and `data science` name one skill.

use std::collections::{BTreeMap, BTreeSet};

use gigwatch_core::{ChatId, canonical_slug};

/// Compute which users overlap a posting's tag set.
///
/// Returns one entry per user whose skills intersect `posting_tags`, with
/// the overlapping slugs in canonical form, sorted. A posting with no tags
/// matches nobody.
pub fn match_posting(
    posting_tags: &BTreeSet<String>,
    user_skills: &BTreeMap<ChatId, BTreeSet<String>>,
) -> BTreeMap<ChatId, Vec<String>> {
    let canonical_tags: BTreeSet<String> = posting_tags
        .iter()
        .map(|tag| canonical_slug(tag))
        .filter(|tag| !tag.is_empty())
        .collect();
    if canonical_tags.is_empty() {
        return BTreeMap::new();
    }

    let mut matches = BTreeMap::new();
    for (&chat_id, skills) in user_skills {
        let overlap: BTreeSet<String> = skills
            .iter()
            .map(|skill| canonical_slug(skill))
            .filter(|skill| canonical_tags.contains(skill))
            .collect();
        if !overlap.is_empty() {
            matches.insert(chat_id, overlap.into_iter().collect());
        }
    }
    matches
}
