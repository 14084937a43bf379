//! Chat Error Types

use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::validation::FieldError;
use platform::token::TokenError;
use thiserror::Error;

/// Chat-specific result type alias
pub type ChatResult<T> = Result<T, ChatError>;

/// Chat-specific error variants
#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    InvalidField(#[from] FieldError),

    /// Chat id does not resolve, or the caller does not own it
    #[error("Chat not found")]
    NotFound,

    /// Owner reference rejected by the store (`chats_user_id_fkey`)
    #[error("User not found")]
    OwnerNotFound,

    /// Other integrity violation; carries the action ("creating", "updating", "deleting")
    #[error("Error {0} chat")]
    Conflict(&'static str),

    #[error("Could not validate credentials")]
    Token(#[from] TokenError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ChatError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChatError::InvalidField(_) => ErrorKind::Validation,
            ChatError::NotFound | ChatError::OwnerNotFound => ErrorKind::NotFound,
            ChatError::Conflict(_) => ErrorKind::Conflict,
            ChatError::Token(e) if e.is_unauthenticated() => ErrorKind::Unauthenticated,
            ChatError::Token(_) | ChatError::Database(_) => ErrorKind::Internal,
        }
    }

    pub fn into_app_error(self) -> AppError {
        match self {
            ChatError::InvalidField(field) => field.into(),
            ChatError::Database(e) => AppError::from(e),
            ChatError::Token(e) if !e.is_unauthenticated() => {
                AppError::internal("Token verification failed").with_source(e)
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    fn log(&self) {
        match self {
            ChatError::Database(e) => {
                tracing::error!(error = %e, "Chat database error");
            }
            ChatError::Token(e) => {
                tracing::debug!(reason = %e, "Token rejected");
            }
            ChatError::OwnerNotFound => {
                tracing::warn!("Chat owner does not exist");
            }
            _ => {
                tracing::debug!(error = %self, "Chat error");
            }
        }
    }
}

impl IntoResponse for ChatError {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_and_kinds() {
        assert_eq!(ChatError::NotFound.to_string(), "Chat not found");
        assert_eq!(ChatError::OwnerNotFound.to_string(), "User not found");
        assert_eq!(ChatError::OwnerNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(ChatError::Conflict("updating").to_string(), "Error updating chat");
        assert_eq!(ChatError::Conflict("updating").kind(), ErrorKind::Conflict);
    }
}
