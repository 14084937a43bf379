//! Sign In Use Case
//!
//! Exchanges a username and password for a token pair.

use std::sync::Arc;

use platform::token::TokenService;

use crate::application::tokens::{TokenPair, issue_token_pair};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_password::RawPassword, username::Username};
use crate::error::{UserError, UserResult};

/// Sign in input
pub struct SignInInput {
    pub username: String,
    pub password: String,
}

/// Sign in use case
///
/// Malformed credentials, an unknown username and a wrong password all
/// produce the same `InvalidCredentials` error.
pub struct SignInUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R> SignInUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    pub async fn execute(&self, input: SignInInput) -> UserResult<TokenPair> {
        let username = Username::new(input.username).map_err(|_| UserError::InvalidCredentials)?;
        let raw_password =
            RawPassword::new(input.password).map_err(|_| UserError::InvalidCredentials)?;

        let user = self
            .repo
            .find_by_username(&username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !user.password.verify(&raw_password) {
            tracing::info!(user_id = %user.user_id, "Sign in rejected: wrong password");
            return Err(UserError::InvalidCredentials);
        }

        let tokens = issue_token_pair(&self.tokens, &user.user_id)?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(tokens)
    }
}
