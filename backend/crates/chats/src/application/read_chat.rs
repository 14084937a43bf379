//! Read Chat Use Case

use std::sync::Arc;

use kernel::id::ChatId;

use crate::domain::entity::chat::Chat;
use crate::domain::repository::ChatRepository;
use crate::error::{ChatError, ChatResult};

pub struct ReadChatUseCase<R>
where
    R: ChatRepository,
{
    repo: Arc<R>,
}

impl<R> ReadChatUseCase<R>
where
    R: ChatRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, chat_id: &ChatId) -> ChatResult<Chat> {
        self.repo
            .find_by_id(chat_id)
            .await?
            .ok_or(ChatError::NotFound)
    }
}
