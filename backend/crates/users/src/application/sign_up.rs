//! Sign Up Use Case
//!
//! Creates a new user account and issues its first token pair.

use std::sync::Arc;

use platform::token::TokenService;

use crate::application::tokens::{TokenPair, issue_token_pair};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    user_password::{RawPassword, UserPassword},
    username::Username,
};
use crate::error::UserResult;

/// Sign up input
pub struct SignUpInput {
    pub username: String,
    pub password: String,
}

/// Sign up output
pub struct SignUpOutput {
    pub user: User,
    pub tokens: TokenPair,
}

/// Sign up use case
pub struct SignUpUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R> SignUpUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    pub async fn execute(&self, input: SignUpInput) -> UserResult<SignUpOutput> {
        let username = Username::new(input.username)?;
        let raw_password = RawPassword::new(input.password)?;
        let password = UserPassword::from_raw(&raw_password)?;

        let user = User::new(username, password, None);

        // Duplicate username surfaces here as Conflict
        self.repo.create(&user).await?;

        let tokens = issue_token_pair(&self.tokens, &user.user_id)?;

        tracing::info!(
            user_id = %user.user_id,
            username = %user.username,
            "User signed up"
        );

        Ok(SignUpOutput { user, tokens })
    }
}
