//! Bearer Authentication
//!
//! Extractor resolving the caller from the `Authorization: Bearer` header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use kernel::id::UserId;
use platform::token::bearer_token;

use crate::domain::repository::UserRepository;
use crate::error::UserError;
use crate::presentation::handlers::UsersAppState;

/// Authenticated caller (subject of a valid access token)
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub UserId);

impl<R> FromRequestParts<UsersAppState<R>> for CurrentUser
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    type Rejection = UserError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &UsersAppState<R>,
    ) -> Result<Self, Self::Rejection> {
        let user_id = state
            .tokens
            .verify_access_token(bearer_token(&parts.headers))?;

        Ok(Self(UserId::from_uuid(user_id)))
    }
}
