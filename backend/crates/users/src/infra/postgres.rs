//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::error::conversions::IntegrityViolation;
use kernel::id::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    full_name::FullName, user_password::UserPassword, username::Username,
};
use crate::error::{UserError, UserResult};

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a failed write to `Conflict(action)` when it broke a constraint
fn write_error(err: sqlx::Error, action: &'static str) -> UserError {
    match IntegrityViolation::classify(&err) {
        Some(violation) => {
            tracing::debug!(?violation, action, "User write rejected by constraint");
            UserError::Conflict(action)
        }
        None => UserError::Database(err),
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> UserResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO users (
                id,
                username,
                password_hash,
                full_name,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.username.as_str())
        .bind(user.password.as_phc_string())
        .bind(user.full_name.as_ref().map(FullName::as_str))
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| write_error(e, "creating"))?;

        tx.commit().await.map_err(|e| write_error(e, "creating"))?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> UserResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                username,
                password_hash,
                full_name,
                created_at,
                updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_username(&self, username: &Username) -> UserResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                username,
                password_hash,
                full_name,
                created_at,
                updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn update(&self, user: &User) -> UserResult<()> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE users
            SET
                username = $2,
                password_hash = $3,
                full_name = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.username.as_str())
        .bind(user.password.as_phc_string())
        .bind(user.full_name.as_ref().map(FullName::as_str))
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| write_error(e, "updating"))?
        .rows_affected();

        if updated == 0 {
            return Err(UserError::NotFound);
        }

        tx.commit().await.map_err(|e| write_error(e, "updating"))?;

        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> UserResult<()> {
        let mut tx = self.pool.begin().await?;

        // chats.user_id is ON DELETE CASCADE
        let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id.as_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(UserError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password_hash: String,
    full_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> UserResult<User> {
        Ok(User {
            user_id: UserId::from_uuid(self.id),
            username: Username::from_db(self.username),
            password: UserPassword::from_db(self.password_hash)?,
            full_name: self.full_name.map(FullName::from_db),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::testing::StubDatabaseError;

    #[test]
    fn test_unique_username_violation_is_conflict() {
        let err = StubDatabaseError::sqlx("23505", Some("users_username_key"));
        assert!(matches!(
            write_error(err, "creating"),
            UserError::Conflict("creating")
        ));
    }

    #[test]
    fn test_any_integrity_violation_is_conflict() {
        for (code, constraint) in [
            ("23502", Some("users_password_hash_not_null")),
            ("23514", None),
            ("23P01", None),
        ] {
            let err = StubDatabaseError::sqlx(code, constraint);
            assert!(
                matches!(write_error(err, "updating"), UserError::Conflict("updating")),
                "{code}"
            );
        }
    }

    #[test]
    fn test_other_failures_stay_database_errors() {
        let serialization = StubDatabaseError::sqlx("40001", None);
        assert!(matches!(
            write_error(serialization, "updating"),
            UserError::Database(_)
        ));
        assert!(matches!(
            write_error(sqlx::Error::PoolTimedOut, "creating"),
            UserError::Database(_)
        ));
    }
}
