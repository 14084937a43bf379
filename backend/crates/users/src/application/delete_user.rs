//! Delete User Use Case
//!
//! Deletion must be confirmed with the account's current credentials.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_password::RawPassword, username::Username};
use crate::error::{UserError, UserResult};

/// Confirmation credentials
pub struct DeleteUserInput {
    pub username: String,
    pub password: String,
}

pub struct DeleteUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: &UserId, input: DeleteUserInput) -> UserResult<()> {
        let username = Username::new(input.username)?;
        let raw_password = RawPassword::new(input.password)?;

        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound)?;

        if user.username != username || !user.password.verify(&raw_password) {
            tracing::warn!(user_id = %user_id, "Account deletion not confirmed");
            return Err(UserError::InvalidCredentials);
        }

        self.repo.delete(user_id).await?;

        tracing::info!(user_id = %user_id, "User deleted");

        Ok(())
    }
}
