//! Update User Use Case
//!
//! Full replacement (PUT) or partial update (PATCH) of the caller's account.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::{User, UserChanges};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    full_name::FullName,
    user_password::{RawPassword, UserPassword},
    username::Username,
};
use crate::error::{UserError, UserResult};

/// Update input
pub enum UpdateUserInput {
    /// Every field is replaced
    Full {
        username: String,
        password: String,
        full_name: String,
    },
    /// Only supplied fields change; `full_name: Some(None)` clears the name
    Partial {
        username: Option<String>,
        password: Option<String>,
        full_name: Option<Option<String>>,
    },
}

/// Validated form of [`UpdateUserInput`]; the password is not hashed yet.
struct ValidatedUpdate {
    username: Option<Username>,
    password: Option<RawPassword>,
    full_name: Option<Option<FullName>>,
}

impl UpdateUserInput {
    fn validate(self) -> UserResult<ValidatedUpdate> {
        let (username, password, full_name) = match self {
            UpdateUserInput::Full {
                username,
                password,
                full_name,
            } => (Some(username), Some(password), Some(Some(full_name))),
            UpdateUserInput::Partial {
                username,
                password,
                full_name,
            } => (username, password, full_name),
        };

        Ok(ValidatedUpdate {
            username: username.map(Username::new).transpose()?,
            password: password.map(RawPassword::new).transpose()?,
            full_name: full_name
                .map(|name| name.map(FullName::new).transpose())
                .transpose()?,
        })
    }
}

pub struct UpdateUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: &UserId, input: UpdateUserInput) -> UserResult<User> {
        // Format checks run before the store is touched
        let update = input.validate()?;

        let mut user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound)?;

        let changes = UserChanges {
            username: update.username,
            password: update
                .password
                .as_ref()
                .map(UserPassword::from_raw)
                .transpose()?,
            full_name: update.full_name,
        };

        if changes.is_empty() {
            return Ok(user);
        }

        user.apply(changes);
        self.repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "User updated");

        Ok(user)
    }
}
