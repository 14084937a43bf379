//! User Error Types
//!
//! User-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::validation::FieldError;
use platform::cookie::CookieError;
use platform::password::PasswordHashError;
use platform::token::TokenError;
use thiserror::Error;

/// User-specific result type alias
pub type UserResult<T> = Result<T, UserError>;

/// User-specific error variants
#[derive(Debug, Error)]
pub enum UserError {
    /// A field failed its format rule (raised before any store access)
    #[error(transparent)]
    InvalidField(#[from] FieldError),

    /// User id does not resolve
    #[error("User not found")]
    NotFound,

    /// Integrity violation while writing; carries the action ("creating", "updating")
    #[error("Error {0} user")]
    Conflict(&'static str),

    /// Sign-in or deletion confirmation did not match
    #[error("Incorrect username or password")]
    InvalidCredentials,

    /// Access or refresh token rejected
    #[error("Could not validate credentials")]
    Token(#[from] TokenError),

    /// Token verified but its subject no longer exists
    #[error("Could not validate credentials")]
    StaleToken,

    /// Argon2 failure
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordHashError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Refresh cookie could not be built
    #[error("Cookie error: {0}")]
    Cookie(#[from] CookieError),
}

impl UserError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::InvalidField(_) => ErrorKind::Validation,
            UserError::NotFound => ErrorKind::NotFound,
            UserError::Conflict(_) => ErrorKind::Conflict,
            UserError::InvalidCredentials | UserError::StaleToken => ErrorKind::Unauthenticated,
            UserError::Token(e) if e.is_unauthenticated() => ErrorKind::Unauthenticated,
            UserError::Token(_) | UserError::PasswordHash(_) | UserError::Cookie(_) => {
                ErrorKind::Internal
            }
            UserError::Database(_) => ErrorKind::Internal,
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            UserError::InvalidField(field) => field.into(),
            UserError::Database(e) => AppError::from(e),
            UserError::Token(e) if !e.is_unauthenticated() => {
                AppError::internal("Token creation failed").with_source(e)
            }
            UserError::PasswordHash(e) => AppError::internal("Password hashing failed").with_source(e),
            UserError::Cookie(e) => AppError::internal("Cookie creation failed").with_source(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            UserError::Database(e) => {
                tracing::error!(error = %e, "User database error");
            }
            UserError::PasswordHash(e) => {
                tracing::error!(error = %e, "Password hashing error");
            }
            UserError::Cookie(e) => {
                tracing::error!(error = %e, "Refresh cookie error");
            }
            UserError::Token(e) if !e.is_unauthenticated() => {
                tracing::error!(error = %e, "Token creation error");
            }
            UserError::Token(e) => {
                // absent vs. invalid only shows up here
                tracing::debug!(reason = %e, "Token rejected");
            }
            UserError::InvalidCredentials => {
                tracing::warn!("Invalid credentials presented");
            }
            _ => {
                tracing::debug!(error = %self, "User error");
            }
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        self.log();
        let unauthenticated = self.kind() == ErrorKind::Unauthenticated;
        let mut response = self.into_app_error().into_response();
        if unauthenticated {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
