//! Refresh Token Use Case
//!
//! Verifies the refresh token and rotates both tokens.

use std::sync::Arc;

use kernel::id::UserId;
use platform::token::TokenService;

use crate::application::tokens::{TokenPair, issue_token_pair};
use crate::domain::repository::UserRepository;
use crate::error::{UserError, UserResult};

pub struct RefreshTokenUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R> RefreshTokenUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    /// `refresh_token` is `None` when the cookie was not sent.
    pub async fn execute(&self, refresh_token: Option<&str>) -> UserResult<TokenPair> {
        let user_id = UserId::from_uuid(self.tokens.verify_refresh_token(refresh_token)?);

        // A deleted account must not keep minting tokens
        if self.repo.find_by_id(&user_id).await?.is_none() {
            return Err(UserError::StaleToken);
        }

        let tokens = issue_token_pair(&self.tokens, &user_id)?;

        tracing::debug!(user_id = %user_id, "Tokens rotated");

        Ok(tokens)
    }
}
