// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities and timestamp helpers.
//!
//! Timestamps are persisted as fixed-width UTC text
//! (`2026-03-01T12:00:00.000Z`) so that lexicographic comparison in SQL
//! matches chronological order.

use chrono::{DateTime, SecondsFormat, Utc};
use gigwatch_core::{ChatId, RawTag, Role};

/// Surrogate id of the placeholder user that owns scraped postings.
///
/// Seeded by the initial migration; satisfies the postings foreign key.
pub const SYSTEM_OWNER_ID: i64 = 1;

/// A posting row as stored, without its tag set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPosting {
    pub id: i64,
    pub user_id: i64,
    pub posted_at: Option<DateTime<Utc>>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

/// A posting row annotated with its current tag set.
///
/// Tag absence yields an empty vec, never an error.
#[derive(Debug, Clone)]
pub struct PostingWithTags {
    pub posting: StoredPosting,
    pub tags: Vec<RawTag>,
}

/// Fields accepted by the posting upsert.
///
/// `title` and `url` are required; a `None` description or posted_at leaves
/// the stored value untouched on update (and posted_at defaults to now on
/// insert).
#[derive(Debug, Clone)]
pub struct NewPosting {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub posted_at: Option<DateTime<Utc>>,
}

/// A registered user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    pub id: i64,
    pub chat_id: ChatId,
    pub username: Option<String>,
    pub active: bool,
    pub role: Role,
}

/// Format a timestamp in the fixed-width UTC form used throughout the schema.
pub fn fmt_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored timestamp back into `DateTime<Utc>`.
///
/// Unparseable text maps to `None`, same as an absent value.
pub fn parse_ts(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamps_round_trip() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 45).unwrap();
        let text = fmt_ts(ts);
        assert_eq!(text, "2026-03-01T12:30:45.000Z");
        assert_eq!(parse_ts(&text), Some(ts));
    }

    #[test]
    fn formatted_timestamps_sort_lexicographically() {
        let earlier = fmt_ts(Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap());
        let later = fmt_ts(Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap());
        assert!(earlier < later);
    }

    #[test]
    fn garbage_timestamp_parses_to_none() {
        assert_eq!(parse_ts("yesterday-ish"), None);
        assert_eq!(parse_ts(""), None);
    }
}
