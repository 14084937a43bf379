//! Bearer Authentication

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use kernel::id::UserId;
use platform::token::bearer_token;

use crate::domain::repository::ChatRepository;
use crate::error::ChatError;
use crate::presentation::handlers::ChatsAppState;

/// Authenticated caller (subject of a valid access token)
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub UserId);

impl<R> FromRequestParts<ChatsAppState<R>> for CurrentUser
where
    R: ChatRepository + Clone + Send + Sync + 'static,
{
    type Rejection = ChatError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ChatsAppState<R>,
    ) -> Result<Self, Self::Rejection> {
        let user_id = state
            .tokens
            .verify_access_token(bearer_token(&parts.headers))?;

        Ok(Self(UserId::from_uuid(user_id)))
    }
}
