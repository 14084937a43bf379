//! Chat Title Value Object

use kernel::validation::{self, FieldError};
use std::fmt;

/// Maximum title length (in characters)
pub const CHAT_TITLE_MAX_LENGTH: usize = 250;

pub const CHAT_TITLE_INVALID: FieldError = FieldError::new("title", "Title");

/// Chat title, at most 250 characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTitle(String);

impl ChatTitle {
    pub fn new(raw: impl Into<String>) -> Result<Self, FieldError> {
        let raw = raw.into();
        if !validation::length_within(&raw, 0, CHAT_TITLE_MAX_LENGTH) {
            return Err(CHAT_TITLE_INVALID);
        }
        Ok(Self(raw))
    }

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

impl fmt::Display for ChatTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
