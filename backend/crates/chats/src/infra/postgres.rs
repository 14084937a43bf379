//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::error::conversions::IntegrityViolation;
use kernel::id::{ChatId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::chat::Chat;
use crate::domain::repository::ChatRepository;
use crate::domain::value_object::chat_title::ChatTitle;
use crate::error::{ChatError, ChatResult};

/// Foreign key from `chats.user_id` to `users.id`
const OWNER_FOREIGN_KEY: &str = "chats_user_id_fkey";

/// PostgreSQL-backed chat store
#[derive(Clone)]
pub struct PgChatRepository {
    pool: PgPool,
}

impl PgChatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn write_error(err: sqlx::Error, action: &'static str) -> ChatError {
    match IntegrityViolation::classify(&err) {
        Some(violation) if violation.is_foreign_key(OWNER_FOREIGN_KEY) => ChatError::OwnerNotFound,
        Some(violation) => {
            tracing::debug!(?violation, action, "Chat write rejected by constraint");
            ChatError::Conflict(action)
        }
        None => ChatError::Database(err),
    }
}

// ============================================================================
// Chat Repository Implementation
// ============================================================================

impl ChatRepository for PgChatRepository {
    async fn create(&self, chat: &Chat) -> ChatResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO chats (
                id,
                title,
                description,
                user_id,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(chat.chat_id.as_uuid())
        .bind(chat.title.as_str())
        .bind(chat.description.as_deref())
        .bind(chat.owner_id.as_uuid())
        .bind(chat.created_at)
        .bind(chat.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| write_error(e, "creating"))?;

        tx.commit().await.map_err(|e| write_error(e, "creating"))?;

        Ok(())
    }

    async fn find_by_id(&self, chat_id: &ChatId) -> ChatResult<Option<Chat>> {
        let row = sqlx::query_as::<_, ChatRow>(
            r#"
            SELECT
                id,
                title,
                description,
                user_id,
                created_at,
                updated_at
            FROM chats
            WHERE id = $1
            "#,
        )
        .bind(chat_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ChatRow::into_chat))
    }

    async fn find_by_owner(
        &self,
        owner_id: &UserId,
        skip: i64,
        limit: i64,
    ) -> ChatResult<Vec<Chat>> {
        let rows = sqlx::query_as::<_, ChatRow>(
            r#"
            SELECT
                id,
                title,
                description,
                user_id,
                created_at,
                updated_at
            FROM chats
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            OFFSET $2
            LIMIT $3
            "#,
        )
        .bind(owner_id.as_uuid())
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ChatRow::into_chat).collect())
    }

    async fn update(&self, chat: &Chat) -> ChatResult<()> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE chats
            SET
                title = $2,
                description = $3,
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(chat.chat_id.as_uuid())
        .bind(chat.title.as_str())
        .bind(chat.description.as_deref())
        .bind(chat.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| write_error(e, "updating"))?
        .rows_affected();

        if updated == 0 {
            return Err(ChatError::NotFound);
        }

        tx.commit().await.map_err(|e| write_error(e, "updating"))?;

        Ok(())
    }

    async fn delete(&self, chat_id: &ChatId) -> ChatResult<()> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM chats WHERE id = $1")
            .bind(chat_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| write_error(e, "deleting"))?
            .rows_affected();

        if deleted == 0 {
            return Err(ChatError::NotFound);
        }

        tx.commit().await.map_err(|e| write_error(e, "deleting"))?;

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ChatRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ChatRow {
    fn into_chat(self) -> Chat {
        Chat {
            chat_id: ChatId::from_uuid(self.id),
            owner_id: UserId::from_uuid(self.user_id),
            title: ChatTitle::from_db(self.title),
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::testing::StubDatabaseError;

    #[test]
    fn test_owner_foreign_key_is_owner_not_found() {
        let err = StubDatabaseError::sqlx("23503", Some(OWNER_FOREIGN_KEY));
        let mapped = write_error(err, "creating");

        assert!(matches!(mapped, ChatError::OwnerNotFound));
        assert_eq!(mapped.to_string(), "User not found");
    }

    #[test]
    fn test_other_foreign_keys_are_conflicts() {
        let other = StubDatabaseError::sqlx("23503", Some("chats_folder_id_fkey"));
        assert!(matches!(
            write_error(other, "creating"),
            ChatError::Conflict("creating")
        ));

        let unnamed = StubDatabaseError::sqlx("23503", None);
        assert!(matches!(
            write_error(unnamed, "updating"),
            ChatError::Conflict("updating")
        ));
    }

    #[test]
    fn test_other_integrity_violations_are_conflicts() {
        let unique = StubDatabaseError::sqlx("23505", Some(OWNER_FOREIGN_KEY));
        assert!(matches!(
            write_error(unique, "updating"),
            ChatError::Conflict("updating")
        ));

        let not_null = StubDatabaseError::sqlx("23502", None);
        let mapped = write_error(not_null, "creating");
        assert_eq!(mapped.to_string(), "Error creating chat");
    }

    #[test]
    fn test_other_failures_stay_database_errors() {
        let deadlock = StubDatabaseError::sqlx("40P01", None);
        assert!(matches!(
            write_error(deadlock, "updating"),
            ChatError::Database(_)
        ));
        assert!(matches!(
            write_error(sqlx::Error::RowNotFound, "creating"),
            ChatError::Database(_)
        ));
    }
}
