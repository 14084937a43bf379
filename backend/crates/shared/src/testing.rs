//! Test doubles for crates that depend on the kernel.
//!
//! Enabled with the `testing` feature; resource crates pull it in as a
//! dev-dependency only.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use sqlx::error::{DatabaseError, ErrorKind};

/// Server-side database error with a chosen SQLSTATE and constraint name,
/// standing in for what PostgreSQL reports on a rejected write.
#[derive(Debug)]
pub struct StubDatabaseError {
    code: String,
    constraint: Option<String>,
}

impl StubDatabaseError {
    pub fn new(code: &str, constraint: Option<&str>) -> Self {
        Self {
            code: code.to_owned(),
            constraint: constraint.map(str::to_owned),
        }
    }

    /// `sqlx::Error::Database` carrying a stub with `code` and `constraint`
    pub fn sqlx(code: &str, constraint: Option<&str>) -> sqlx::Error {
        sqlx::Error::Database(Box::new(Self::new(code, constraint)))
    }
}

impl fmt::Display for StubDatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SQLSTATE {}", self.code)
    }
}

impl StdError for StubDatabaseError {}

impl DatabaseError for StubDatabaseError {
    fn message(&self) -> &str {
        "stub database error"
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(&self.code))
    }

    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
        self
    }

    fn constraint(&self) -> Option<&str> {
        self.constraint.as_deref()
    }

    fn kind(&self) -> ErrorKind {
        match self.code.as_str() {
            "23505" => ErrorKind::UniqueViolation,
            "23503" => ErrorKind::ForeignKeyViolation,
            "23502" => ErrorKind::NotNullViolation,
            "23514" => ErrorKind::CheckViolation,
            _ => ErrorKind::Other,
        }
    }
}
