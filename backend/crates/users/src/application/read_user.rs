//! Read User Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{UserError, UserResult};

pub struct ReadUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> ReadUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> UserResult<User> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound)
    }
}
