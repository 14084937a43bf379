//! User Entity
//!
//! Account record holding credentials and the optional profile name.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    full_name::FullName, user_password::UserPassword, username::Username,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique login handle
    pub username: Username,
    /// Argon2id hash; never leaves the crate through a response
    pub password: UserPassword,
    pub full_name: Option<FullName>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field changes for an update
///
/// `None` leaves a field untouched. For `full_name`, `Some(None)` clears it.
#[derive(Debug, Default)]
pub struct UserChanges {
    pub username: Option<Username>,
    pub password: Option<UserPassword>,
    pub full_name: Option<Option<FullName>>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none() && self.full_name.is_none()
    }
}

impl User {
    /// Create a new user
    pub fn new(username: Username, password: UserPassword, full_name: Option<FullName>) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            username,
            password,
            full_name,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply changes; `updated_at` moves only when something was supplied.
    pub fn apply(&mut self, changes: UserChanges) {
        if changes.is_empty() {
            return;
        }

        if let Some(username) = changes.username {
            self.username = username;
        }
        if let Some(password) = changes.password {
            self.password = password;
        }
        if let Some(full_name) = changes.full_name {
            self.full_name = full_name;
        }

        self.updated_at = Utc::now();
    }
}
