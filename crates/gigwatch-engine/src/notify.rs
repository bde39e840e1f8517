// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification dispatch for matched postings.
//!
//! At most one delivery attempt per (user, posting) pair per scan -- there
//! is no retry loop here. Cross-scan duplicate suppression is structural:
//! the watermark keeps already-scanned postings out of later windows.

use std::collections::BTreeMap;

use gigwatch_core::{ChatId, Transport};
use gigwatch_storage::StoredPosting;
use tracing::{debug, warn};

/// Per-posting dispatch tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub delivered: usize,
    pub failed: usize,
}

/// Format the notification text for one (posting, user) pair.
pub fn format_notification(posting: &StoredPosting, overlap: &[String]) -> String {
    let title = posting.title.as_deref().unwrap_or("(untitled)");
    let url = posting.url.as_deref().unwrap_or("");
    format!(
        "New posting matches your skills: {title}\n{url}\nMatched: {}",
        overlap.join(", ")
    )
}

/// Deliver one notification per matched user.
///
/// Each delivery is independently guarded: a transport failure for one
/// recipient is logged with the (user, posting) pair and does not abort the
/// remaining recipients.
pub async fn notify_matches(
    transport: &dyn Transport,
    posting: &StoredPosting,
    matches: &BTreeMap<ChatId, Vec<String>>,
) -> DispatchOutcome {
    let mut outcome = DispatchOutcome::default();
    for (&chat_id, overlap) in matches {
        let text = format_notification(posting, overlap);
        match transport.deliver(chat_id, &text).await {
            Ok(()) => {
                outcome.delivered += 1;
                debug!(chat_id, posting_id = posting.id, "notification delivered");
            }
            Err(e) => {
                outcome.failed += 1;
                warn!(
                    chat_id,
                    posting_id = posting.id,
                    url = posting.url.as_deref().unwrap_or(""),
                    error = %e,
                    "notification delivery failed"
                );
            }
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTransport;

    fn posting(id: i64, title: &str, url: &str) -> StoredPosting {
        StoredPosting {
            id,
            user_id: 1,
            posted_at: None,
            title: Some(title.to_string()),
            description: None,
            url: Some(url.to_string()),
        }
    }

    fn matches(entries: &[(ChatId, &[&str])]) -> BTreeMap<ChatId, Vec<String>> {
        entries
            .iter()
            .map(|(id, overlap)| (*id, overlap.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    #[test]
    fn message_contains_title_url_and_overlap() {
        let text = format_notification(
            &posting(1, "ETL pipeline", "https://b.example/job/etl"),
            &["mysql".to_string(), "python".to_string()],
        );
        assert!(text.contains("ETL pipeline"));
        assert!(text.contains("https://b.example/job/etl"));
        assert!(text.contains("mysql, python"));
    }

    #[tokio::test]
    async fn delivers_one_message_per_matched_user() {
        let transport = RecordingTransport::default();
        let outcome = notify_matches(
            &transport,
            &posting(1, "Job", "https://b.example/job/1"),
            &matches(&[(10, &["python"]), (20, &["mysql"])]),
        )
        .await;

        assert_eq!(outcome, DispatchOutcome { delivered: 2, failed: 0 });
        let sent = transport.sent().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].0, 10);
        assert_eq!(sent[1].0, 20);
    }

    #[tokio::test]
    async fn one_failing_recipient_does_not_abort_the_rest() {
        let transport = RecordingTransport::failing_for(&[10]);
        let outcome = notify_matches(
            &transport,
            &posting(1, "Job", "https://b.example/job/1"),
            &matches(&[(10, &["python"]), (20, &["mysql"]), (30, &["php"])]),
        )
        .await;

        assert_eq!(outcome, DispatchOutcome { delivered: 2, failed: 1 });
        let sent = transport.sent().await;
        let recipients: Vec<_> = sent.iter().map(|(id, _)| *id).collect();
        assert_eq!(recipients, vec![20, 30]);
    }

    #[tokio::test]
    async fn no_matches_means_no_deliveries() {
        let transport = RecordingTransport::default();
        let outcome = notify_matches(
            &transport,
            &posting(1, "Job", "https://b.example/job/1"),
            &BTreeMap::new(),
        )
        .await;
        assert_eq!(outcome, DispatchOutcome::default());
        assert!(transport.sent().await.is_empty());
    }
}
