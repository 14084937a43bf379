//! Username Value Object
//!
//! The username is the login handle and is unique across users.
//!
//! ## Invariants
//! - Length: 1 to 50 characters
//! - Allowed characters: ASCII letters, digits and `-`
//! - At least one uppercase letter, one lowercase letter and one digit

use kernel::validation::{self, FieldError};
use std::fmt;

/// Minimum length for username (in characters)
pub const USERNAME_MIN_LENGTH: usize = 1;

/// Maximum length for username (in characters)
pub const USERNAME_MAX_LENGTH: usize = 50;

/// Validation failure for usernames
pub const USERNAME_INVALID: FieldError = FieldError::new("username", "Username");

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

/// Validated username
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(raw: impl Into<String>) -> Result<Self, FieldError> {
        let raw = raw.into();

        if !validation::length_within(&raw, USERNAME_MIN_LENGTH, USERNAME_MAX_LENGTH)
            || !validation::only(&raw, is_allowed)
            || !validation::has_mixed_case_and_digit(&raw)
        {
            return Err(USERNAME_INVALID);
        }

        Ok(Self(raw))
    }

    /// Restore from the store without re-validating
    pub(crate) fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
