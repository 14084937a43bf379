//! List Chats Use Case
//!
//! Offset pagination over the caller's chats, newest first.

use std::sync::Arc;

use kernel::id::UserId;
use kernel::validation::FieldError;

use crate::domain::entity::chat::Chat;
use crate::domain::repository::ChatRepository;
use crate::error::ChatResult;

pub const DEFAULT_SKIP: i64 = 0;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

pub const SKIP_INVALID: FieldError = FieldError::new("skip", "Skip");
pub const LIMIT_INVALID: FieldError = FieldError::new("limit", "Limit");

pub struct ListChatsInput {
    pub skip: i64,
    pub limit: i64,
}

impl Default for ListChatsInput {
    fn default() -> Self {
        Self {
            skip: DEFAULT_SKIP,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ListChatsInput {
    /// `skip >= 0`, `1 <= limit <= 100`
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.skip < 0 {
            return Err(SKIP_INVALID);
        }
        if !(1..=MAX_LIMIT).contains(&self.limit) {
            return Err(LIMIT_INVALID);
        }
        Ok(())
    }
}

pub struct ListChatsUseCase<R>
where
    R: ChatRepository,
{
    repo: Arc<R>,
}

impl<R> ListChatsUseCase<R>
where
    R: ChatRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, owner_id: &UserId, input: ListChatsInput) -> ChatResult<Vec<Chat>> {
        input.validate()?;
        self.repo
            .find_by_owner(owner_id, input.skip, input.limit)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(ListChatsInput::default().validate().is_ok());
        assert!(ListChatsInput { skip: 0, limit: 100 }.validate().is_ok());
        assert_eq!(
            ListChatsInput { skip: -1, limit: 10 }.validate(),
            Err(SKIP_INVALID)
        );
        assert_eq!(
            ListChatsInput { skip: 0, limit: 0 }.validate(),
            Err(LIMIT_INVALID)
        );
        assert_eq!(
            ListChatsInput { skip: 0, limit: 101 }.validate(),
            Err(LIMIT_INVALID)
        );
    }
}
