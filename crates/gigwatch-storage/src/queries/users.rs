// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registered user operations.
//!
//! Users are keyed externally by chat identity; the surrogate id only exists
//! for foreign keys. Deactivation is the soft-delete path -- the row stays so
//! re-registration can reactivate it.

use gigwatch_core::{ChatId, GigwatchError, Role};
use rusqlite::{OptionalExtension, params};

use crate::database::Database;
use crate::models::StoredUser;

/// What a registration attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// First sight of this chat identity; row created.
    Created,
    /// Row existed but was inactive; reactivated with the new username.
    Reactivated,
    /// Already registered and active; nothing changed.
    AlreadyActive,
}

fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredUser> {
    let role: String = row.get(4)?;
    Ok(StoredUser {
        id: row.get(0)?,
        chat_id: row.get(1)?,
        username: row.get(2)?,
        active: row.get(3)?,
        role: role.parse().unwrap_or_default(),
    })
}

/// Register a chat identity, reactivating a soft-deleted row if present.
pub async fn register(
    db: &Database,
    chat_id: ChatId,
    username: &str,
) -> Result<RegisterOutcome, GigwatchError> {
    let username = username.to_string();
    db.connection()
        .call(move |conn| {
            let existing: Option<(i64, bool)> = conn
                .query_row(
                    "SELECT id, active FROM users WHERE chat_id = ?1",
                    params![chat_id],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?;

            match existing {
                Some((_, true)) => Ok(RegisterOutcome::AlreadyActive),
                Some((id, false)) => {
                    conn.execute(
                        "UPDATE users SET username = ?1, active = 1 WHERE id = ?2",
                        params![username, id],
                    )?;
                    Ok(RegisterOutcome::Reactivated)
                }
                None => {
                    conn.execute(
                        "INSERT INTO users (chat_id, username, active, role)
                         VALUES (?1, ?2, 1, ?3)",
                        params![chat_id, username, Role::Normal.to_string()],
                    )?;
                    Ok(RegisterOutcome::Created)
                }
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// The user row for a chat identity, active or not.
pub async fn get_by_chat_id(
    db: &Database,
    chat_id: ChatId,
) -> Result<Option<StoredUser>, GigwatchError> {
    db.connection()
        .call(move |conn| {
            let user = conn
                .query_row(
                    "SELECT id, chat_id, username, active, role FROM users WHERE chat_id = ?1",
                    params![chat_id],
                    user_from_row,
                )
                .optional()?;
            Ok(user)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Soft-delete: clear the active flag, keep the row and its skills.
///
/// Returns false when no such user is registered.
pub async fn deactivate(db: &Database, chat_id: ChatId) -> Result<bool, GigwatchError> {
    db.connection()
        .call(move |conn| {
            let affected = conn.execute(
                "UPDATE users SET active = 0 WHERE chat_id = ?1",
                params![chat_id],
            )?;
            Ok(affected > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Hard-delete the row; skills cascade away.
///
/// Returns false when no such user is registered.
pub async fn delete(db: &Database, chat_id: ChatId) -> Result<bool, GigwatchError> {
    db.connection()
        .call(move |conn| {
            let affected = conn.execute("DELETE FROM users WHERE chat_id = ?1", params![chat_id])?;
            Ok(affected > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All active users, ordered by chat identity.
pub async fn all_active(db: &Database) -> Result<Vec<StoredUser>, GigwatchError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, chat_id, username, active, role FROM users
                 WHERE active = 1 ORDER BY chat_id",
            )?;
            let rows = stmt.query_map([], user_from_row)?;
            let mut users = Vec::new();
            for row in rows {
                users.push(row?);
            }
            Ok(users)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn test_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn register_twice_is_a_no_op_second_time() {
        let (db, _dir) = test_db().await;

        let first = register(&db, 42, "alex").await.unwrap();
        assert_eq!(first, RegisterOutcome::Created);

        let second = register(&db, 42, "alex").await.unwrap();
        assert_eq!(second, RegisterOutcome::AlreadyActive);

        // No duplicate identity was created.
        let user = get_by_chat_id(&db, 42).await.unwrap().unwrap();
        assert_eq!(user.chat_id, 42);
        assert!(user.active);
    }

    #[tokio::test]
    async fn reregistration_reactivates_soft_deleted_user() {
        let (db, _dir) = test_db().await;

        register(&db, 7, "sam").await.unwrap();
        assert!(deactivate(&db, 7).await.unwrap());
        let user = get_by_chat_id(&db, 7).await.unwrap().unwrap();
        assert!(!user.active);

        let outcome = register(&db, 7, "sam_new").await.unwrap();
        assert_eq!(outcome, RegisterOutcome::Reactivated);
        let user = get_by_chat_id(&db, 7).await.unwrap().unwrap();
        assert!(user.active);
        assert_eq!(user.username.as_deref(), Some("sam_new"));
    }

    #[tokio::test]
    async fn deactivate_unknown_user_is_false() {
        let (db, _dir) = test_db().await;
        assert!(!deactivate(&db, 999).await.unwrap());
    }

    #[tokio::test]
    async fn hard_delete_cascades_skills() {
        let (db, _dir) = test_db().await;
        register(&db, 11, "casey").await.unwrap();
        crate::queries::skills::add_skill(&db, 11, "python").await.unwrap();

        assert!(delete(&db, 11).await.unwrap());
        assert!(get_by_chat_id(&db, 11).await.unwrap().is_none());

        let map = crate::queries::skills::active_user_skill_map(&db).await.unwrap();
        assert!(!map.contains_key(&11));
    }

    #[tokio::test]
    async fn all_active_excludes_deactivated() {
        let (db, _dir) = test_db().await;
        register(&db, 1001, "a").await.unwrap();
        register(&db, 1002, "b").await.unwrap();
        deactivate(&db, 1002).await.unwrap();

        let active = all_active(&db).await.unwrap();
        let chat_ids: Vec<_> = active.iter().map(|u| u.chat_id).collect();
        assert!(chat_ids.contains(&1001));
        assert!(!chat_ids.contains(&1002));
    }

    #[tokio::test]
    async fn new_users_default_to_normal_role() {
        let (db, _dir) = test_db().await;
        register(&db, 5, "riley").await.unwrap();
        let user = get_by_chat_id(&db, 5).await.unwrap().unwrap();
        assert_eq!(user.role, Role::Normal);
    }
}
