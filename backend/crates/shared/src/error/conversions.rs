//! Error conversions
//!
//! - [`IntegrityViolation`]: classifies a failed write by SQLSTATE and
//!   constraint name so each repository can translate it once, at commit.
//! - `From<sqlx::Error> for AppError` for everything that is not an
//!   integrity violation.
//! - `IntoResponse for AppError` rendering RFC 7807 problem documents.

#[cfg(any(feature = "sqlx", feature = "axum"))]
use super::app_error::AppError;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// Integrity constraint that rejected a write.
///
/// PostgreSQL reports these under SQLSTATE class 23.
/// <https://www.postgresql.org/docs/current/errcodes-appendix.html>
#[cfg(feature = "sqlx")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityViolation {
    /// 23505 unique_violation
    Unique { constraint: Option<String> },
    /// 23503 foreign_key_violation
    ForeignKey { constraint: Option<String> },
    /// 23502 not_null_violation
    NotNull { constraint: Option<String> },
    /// 23514 check_violation
    Check { constraint: Option<String> },
    /// Any other class 23 code
    Other { code: String },
}

#[cfg(feature = "sqlx")]
impl IntegrityViolation {
    /// Returns `None` when `err` is not an integrity violation.
    pub fn classify(err: &sqlx::Error) -> Option<Self> {
        let sqlx::Error::Database(db_err) = err else {
            return None;
        };
        let code = db_err.code()?;
        let constraint = db_err.constraint().map(str::to_owned);

        match code.as_ref() {
            "23505" => Some(Self::Unique { constraint }),
            "23503" => Some(Self::ForeignKey { constraint }),
            "23502" => Some(Self::NotNull { constraint }),
            "23514" => Some(Self::Check { constraint }),
            other if other.starts_with("23") => Some(Self::Other {
                code: other.to_owned(),
            }),
            _ => None,
        }
    }

    /// Name of the violated constraint, when the server reported one.
    pub fn constraint(&self) -> Option<&str> {
        match self {
            Self::Unique { constraint }
            | Self::ForeignKey { constraint }
            | Self::NotNull { constraint }
            | Self::Check { constraint } => constraint.as_deref(),
            Self::Other { .. } => None,
        }
    }

    /// True when this is a foreign-key violation on `name`.
    pub fn is_foreign_key(&self, name: &str) -> bool {
        matches!(self, Self::ForeignKey { .. }) && self.constraint() == Some(name)
    }

    /// True when this is a unique violation on `name`.
    pub fn is_unique(&self, name: &str) -> bool {
        matches!(self, Self::Unique { .. }) && self.constraint() == Some(name)
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if IntegrityViolation::classify(&err).is_some() {
            return AppError::conflict("Integrity constraint violation").with_source(err);
        }
        match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found").with_source(err),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                AppError::unavailable("Database connection pool exhausted").with_source(err)
            }
            sqlx::Error::Io(_) => {
                AppError::unavailable("Database connection error").with_source(err)
            }
            sqlx::Error::Database(db_err) => {
                let unavailable = db_err
                    .code()
                    .is_some_and(|code| code.starts_with("53") || code.starts_with("57"));
                if unavailable {
                    AppError::unavailable("Database unavailable").with_source(err)
                } else {
                    AppError::internal("Database error").with_source(err)
                }
            }
            _ => AppError::internal("Database error").with_source(err),
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let mut body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
        });
        if let Some(field) = self.field() {
            body["field"] = serde_json::Value::from(field);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(all(test, feature = "sqlx"))]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;
    use crate::testing::StubDatabaseError;

    #[test]
    fn test_classify_database_errors() {
        let unique = StubDatabaseError::sqlx("23505", Some("users_username_key"));
        assert_eq!(
            IntegrityViolation::classify(&unique),
            Some(IntegrityViolation::Unique {
                constraint: Some("users_username_key".into())
            })
        );

        let fk = StubDatabaseError::sqlx("23503", Some("chats_user_id_fkey"));
        let violation = IntegrityViolation::classify(&fk).unwrap();
        assert!(violation.is_foreign_key("chats_user_id_fkey"));

        let not_null = StubDatabaseError::sqlx("23502", None);
        assert_eq!(
            IntegrityViolation::classify(&not_null),
            Some(IntegrityViolation::NotNull { constraint: None })
        );

        let exclusion = StubDatabaseError::sqlx("23P01", Some("no_overlap"));
        assert_eq!(
            IntegrityViolation::classify(&exclusion),
            Some(IntegrityViolation::Other {
                code: "23P01".into()
            })
        );

        let deadlock = StubDatabaseError::sqlx("40P01", None);
        assert!(IntegrityViolation::classify(&deadlock).is_none());
    }

    #[test]
    fn test_database_errors_to_app_error() {
        let unique = StubDatabaseError::sqlx("23505", Some("users_username_key"));
        assert_eq!(AppError::from(unique).kind(), ErrorKind::Conflict);

        let shutting_down = StubDatabaseError::sqlx("57P01", None);
        assert_eq!(AppError::from(shutting_down).kind(), ErrorKind::Unavailable);

        let syntax = StubDatabaseError::sqlx("42601", None);
        assert_eq!(AppError::from(syntax).kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_non_database_errors_are_not_integrity_violations() {
        assert!(IntegrityViolation::classify(&sqlx::Error::RowNotFound).is_none());
        assert!(IntegrityViolation::classify(&sqlx::Error::PoolTimedOut).is_none());
    }

    #[test]
    fn test_constraint_matchers() {
        let fk = IntegrityViolation::ForeignKey {
            constraint: Some("chats_user_id_fkey".into()),
        };
        assert!(fk.is_foreign_key("chats_user_id_fkey"));
        assert!(!fk.is_unique("chats_user_id_fkey"));

        let unique = IntegrityViolation::Unique { constraint: None };
        assert!(!unique.is_unique("users_username_key"));
        assert_eq!(unique.constraint(), None);
    }

    #[test]
    fn test_sqlx_error_kinds() {
        assert_eq!(
            AppError::from(sqlx::Error::PoolTimedOut).kind(),
            ErrorKind::Unavailable
        );
        assert_eq!(
            AppError::from(sqlx::Error::RowNotFound).kind(),
            ErrorKind::NotFound
        );
    }
}
