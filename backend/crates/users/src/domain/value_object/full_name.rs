//! Full Name Value Object
//!
//! Optional display name: 1 to 100 ASCII letters, spaces or hyphens.

use kernel::validation::{self, FieldError};
use std::fmt;

pub const FULL_NAME_MAX_LENGTH: usize = 100;

pub const FULL_NAME_INVALID: FieldError = FieldError::new("full_name", "Full name");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    pub fn new(raw: impl Into<String>) -> Result<Self, FieldError> {
        let raw = raw.into();

        if !validation::length_within(&raw, 1, FULL_NAME_MAX_LENGTH)
            || !validation::only(&raw, |c| c.is_ascii_alphabetic() || c == '-' || c == ' ')
        {
            return Err(FULL_NAME_INVALID);
        }

        Ok(Self(raw))
    }

    pub(crate) fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        assert!(FullName::new("Ada Lovelace").is_ok());
        assert!(FullName::new("Jean-Luc Picard").is_ok());
        assert_eq!(FullName::new(""), Err(FULL_NAME_INVALID));
        assert_eq!(FullName::new("R2 D2"), Err(FULL_NAME_INVALID));
        assert!(FullName::new("a".repeat(FULL_NAME_MAX_LENGTH)).is_ok());
        assert!(FullName::new("a".repeat(FULL_NAME_MAX_LENGTH + 1)).is_err());
    }
}
