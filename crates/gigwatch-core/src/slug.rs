// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Skill slug normalization.
//!
//! Normalization happens at exactly one boundary: every write path into the
//! skill registry calls [`normalize_slug`]. Read paths trust stored slugs.
//! The matcher additionally canonicalizes through [`canonical_slug`] because
//! board-side slugs and user-entered skills are not always normalized by the
//! same code.

/// Normalize a skill name to its slug form: trim, lowercase, collapse
/// internal whitespace runs into single hyphens.
///
/// Returns an empty string for blank input; callers treat that as "no skill".
pub fn normalize_slug(skill: &str) -> String {
    skill
        .split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Canonical form for slug comparison: the hyphenated variant.
///
/// `"data-science"` and `"data science"` are the same skill token; spaces
/// are folded into hyphens so both compare equal.
pub fn canonical_slug(slug: &str) -> String {
    normalize_slug(&slug.replace('-', " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_hyphenates() {
        assert_eq!(normalize_slug("Adobe Photoshop"), "adobe-photoshop");
        assert_eq!(normalize_slug("  Microsoft   Word  "), "microsoft-word");
        assert_eq!(normalize_slug("python"), "python");
    }

    #[test]
    fn normalize_blank_is_empty() {
        assert_eq!(normalize_slug(""), "");
        assert_eq!(normalize_slug("   "), "");
    }

    #[test]
    fn canonical_folds_hyphens_and_spaces() {
        assert_eq!(canonical_slug("data-science"), "data-science");
        assert_eq!(canonical_slug("data science"), "data-science");
        assert_eq!(canonical_slug("Data Science"), "data-science");
        assert_eq!(canonical_slug("DATA-SCIENCE"), "data-science");
    }

    #[test]
    fn canonical_is_idempotent() {
        let once = canonical_slug("micro soft-access");
        assert_eq!(canonical_slug(&once), once);
    }
}
