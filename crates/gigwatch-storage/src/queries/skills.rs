// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User skill registry operations.
//!
//! This module is the single normalization boundary: every write path calls
//! [`normalize_slug`] before touching the table. Read paths return stored
//! slugs as-is.

use std::collections::{BTreeMap, BTreeSet};

use gigwatch_core::{ChatId, GigwatchError, normalize_slug};
use rusqlite::{OptionalExtension, params};

use crate::database::Database;

fn user_rowid(conn: &rusqlite::Connection, chat_id: ChatId) -> rusqlite::Result<Option<i64>> {
    conn.query_row(
        "SELECT id FROM users WHERE chat_id = ?1",
        params![chat_id],
        |row| row.get(0),
    )
    .optional()
}

/// True iff the user has the (normalized) skill recorded.
pub async fn has_skill(db: &Database, chat_id: ChatId, skill: &str) -> Result<bool, GigwatchError> {
    let slug = normalize_slug(skill);
    if slug.is_empty() {
        return Ok(false);
    }
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT 1 FROM user_skills us
                 JOIN users u ON u.id = us.user_id
                 WHERE u.chat_id = ?1 AND us.slug = ?2 LIMIT 1",
            )?;
            let found = stmt.exists(params![chat_id, slug])?;
            Ok(found)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Record a skill for the user. Idempotent: re-adding an existing skill
/// succeeds without duplication.
///
/// Returns false for a blank skill or an unregistered user.
pub async fn add_skill(db: &Database, chat_id: ChatId, skill: &str) -> Result<bool, GigwatchError> {
    let slug = normalize_slug(skill);
    if slug.is_empty() {
        return Ok(false);
    }
    db.connection()
        .call(move |conn| {
            let Some(user_id) = user_rowid(conn, chat_id)? else {
                return Ok(false);
            };
            conn.execute(
                "INSERT OR IGNORE INTO user_skills (user_id, slug) VALUES (?1, ?2)",
                params![user_id, slug],
            )?;
            Ok(true)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Remove a skill from the user. Removing a missing skill is a no-op.
///
/// Returns true iff a row was actually deleted.
pub async fn remove_skill(
    db: &Database,
    chat_id: ChatId,
    skill: &str,
) -> Result<bool, GigwatchError> {
    let slug = normalize_slug(skill);
    if slug.is_empty() {
        return Ok(false);
    }
    db.connection()
        .call(move |conn| {
            let affected = conn.execute(
                "DELETE FROM user_skills
                 WHERE slug = ?2
                   AND user_id IN (SELECT id FROM users WHERE chat_id = ?1)",
                params![chat_id, slug],
            )?;
            Ok(affected > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Remove every skill of the user. Returns the number of rows cleared.
pub async fn clear_skills(db: &Database, chat_id: ChatId) -> Result<usize, GigwatchError> {
    db.connection()
        .call(move |conn| {
            let affected = conn.execute(
                "DELETE FROM user_skills
                 WHERE user_id IN (SELECT id FROM users WHERE chat_id = ?1)",
                params![chat_id],
            )?;
            Ok(affected)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All skills of one user, sorted.
pub async fn skills_for(db: &Database, chat_id: ChatId) -> Result<Vec<String>, GigwatchError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT us.slug FROM user_skills us
                 JOIN users u ON u.id = us.user_id
                 WHERE u.chat_id = ?1 ORDER BY us.slug",
            )?;
            let rows = stmt.query_map(params![chat_id], |row| row.get::<_, String>(0))?;
            let mut slugs = Vec::new();
            for row in rows {
                slugs.push(row?);
            }
            Ok(slugs)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Skill sets of every active user that has at least one recorded skill,
/// keyed by chat identity. Users with zero skills are omitted.
pub async fn active_user_skill_map(
    db: &Database,
) -> Result<BTreeMap<ChatId, BTreeSet<String>>, GigwatchError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT u.chat_id, us.slug FROM user_skills us
                 JOIN users u ON u.id = us.user_id
                 WHERE u.active = 1",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
            })?;
            let mut map: BTreeMap<ChatId, BTreeSet<String>> = BTreeMap::new();
            for row in rows {
                let (chat_id, slug) = row?;
                if slug.is_empty() {
                    continue;
                }
                map.entry(chat_id).or_default().insert(slug);
            }
            Ok(map)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Distinct skill slugs across all active users, sorted.
///
/// Drives the board search URL once the registry has entries.
pub async fn active_skill_slugs(db: &Database) -> Result<Vec<String>, GigwatchError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT DISTINCT us.slug FROM user_skills us
                 JOIN users u ON u.id = us.user_id
                 WHERE u.active = 1 ORDER BY us.slug",
            )?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
            let mut slugs = Vec::new();
            for row in rows {
                slugs.push(row?);
            }
            Ok(slugs)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::users::{deactivate, register};
    use tempfile::tempdir;

    async fn test_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn add_normalizes_on_write() {
        let (db, _dir) = test_db().await;
        register(&db, 1, "a").await.unwrap();

        assert!(add_skill(&db, 1, "  Adobe   Photoshop ").await.unwrap());
        assert_eq!(skills_for(&db, 1).await.unwrap(), vec!["adobe-photoshop"]);
        assert!(has_skill(&db, 1, "adobe photoshop").await.unwrap());
    }

    #[tokio::test]
    async fn add_is_idempotent() {
        let (db, _dir) = test_db().await;
        register(&db, 1, "a").await.unwrap();

        assert!(add_skill(&db, 1, "python").await.unwrap());
        assert!(add_skill(&db, 1, "Python").await.unwrap());
        assert_eq!(skills_for(&db, 1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn add_blank_or_unregistered_is_rejected() {
        let (db, _dir) = test_db().await;
        assert!(!add_skill(&db, 1, "   ").await.unwrap());
        assert!(!add_skill(&db, 99, "python").await.unwrap());
    }

    #[tokio::test]
    async fn remove_missing_skill_is_noop() {
        let (db, _dir) = test_db().await;
        register(&db, 1, "a").await.unwrap();
        add_skill(&db, 1, "python").await.unwrap();

        assert!(!remove_skill(&db, 1, "mysql").await.unwrap());
        assert!(remove_skill(&db, 1, "python").await.unwrap());
        assert!(skills_for(&db, 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clear_reports_count() {
        let (db, _dir) = test_db().await;
        register(&db, 1, "a").await.unwrap();
        add_skill(&db, 1, "python").await.unwrap();
        add_skill(&db, 1, "mysql").await.unwrap();

        assert_eq!(clear_skills(&db, 1).await.unwrap(), 2);
        assert_eq!(clear_skills(&db, 1).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn skill_map_covers_only_active_users_with_skills() {
        let (db, _dir) = test_db().await;
        register(&db, 1, "with-skills").await.unwrap();
        register(&db, 2, "no-skills").await.unwrap();
        register(&db, 3, "inactive").await.unwrap();
        add_skill(&db, 1, "python").await.unwrap();
        add_skill(&db, 1, "mysql").await.unwrap();
        add_skill(&db, 3, "php").await.unwrap();
        deactivate(&db, 3).await.unwrap();

        let map = active_user_skill_map(&db).await.unwrap();
        assert_eq!(map.len(), 1);
        let skills = map.get(&1).unwrap();
        assert!(skills.contains("python") && skills.contains("mysql"));
    }

    #[tokio::test]
    async fn active_slugs_are_distinct_and_sorted() {
        let (db, _dir) = test_db().await;
        register(&db, 1, "a").await.unwrap();
        register(&db, 2, "b").await.unwrap();
        add_skill(&db, 1, "python").await.unwrap();
        add_skill(&db, 2, "python").await.unwrap();
        add_skill(&db, 2, "data science").await.unwrap();

        let slugs = active_skill_slugs(&db).await.unwrap();
        assert_eq!(slugs, vec!["data-science", "python"]);
    }
}
