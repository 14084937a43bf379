//! Repository Traits
//!
//! Interface to the credential store. Implementation is in the
//! infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::value_object::username::Username;
use crate::error::UserResult;

/// User repository trait
///
/// Writes report a duplicate username as `UserError::Conflict`.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user
    async fn create(&self, user: &User) -> UserResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> UserResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &Username) -> UserResult<Option<User>>;

    /// Overwrite all mutable fields of an existing user
    async fn update(&self, user: &User) -> UserResult<()>;

    /// Delete user; owned chats go with it
    async fn delete(&self, user_id: &UserId) -> UserResult<()>;
}
