//! User Password Value Object
//!
//! Delegates hashing to `platform::password`; this module owns the format
//! policy applied to user input.
//!
//! ## Format
//! - Length: 8 to 25 characters
//! - Allowed characters: ASCII letters, digits, `-` and `_`
//! - At least one uppercase letter, one lowercase letter, one digit and
//!   one of `-` / `_`

use kernel::validation::{self, FieldError};
use platform::password::{ClearTextPassword, HashedPassword, PasswordHashError};
use std::fmt;

pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 25;

pub const PASSWORD_INVALID: FieldError = FieldError::new("password", "Password");

fn is_symbol(c: char) -> bool {
    c == '-' || c == '_'
}

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: String) -> Result<Self, FieldError> {
        let valid = validation::length_within(&raw, PASSWORD_MIN_LENGTH, PASSWORD_MAX_LENGTH)
            && validation::only(&raw, |c| c.is_ascii_alphanumeric() || is_symbol(c))
            && validation::has_mixed_case_and_digit(&raw)
            && validation::contains(&raw, is_symbol);

        // `raw` is moved into the zeroizing wrapper either way
        let clear_text = ClearTextPassword::new(raw);
        if !valid {
            return Err(PASSWORD_INVALID);
        }

        Ok(Self(clear_text))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Argon2id hash of a user password (PHC string)
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a validated raw password
    pub fn from_raw(raw: &RawPassword) -> Result<Self, PasswordHashError> {
        Ok(Self(raw.inner().hash()?))
    }

    /// Restore from the stored PHC string
    pub fn from_db(phc: String) -> Result<Self, PasswordHashError> {
        Ok(Self(HashedPassword::from_phc_string(phc)?))
    }

    pub fn verify(&self, raw: &RawPassword) -> bool {
        self.0.verify(raw.inner())
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserPassword").field(&"[HASH]").finish()
    }
}
