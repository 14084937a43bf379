//! Delete Chat Use Case

use std::sync::Arc;

use kernel::id::ChatId;

use crate::domain::repository::ChatRepository;
use crate::error::{ChatError, ChatResult};

pub struct DeleteChatUseCase<R>
where
    R: ChatRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteChatUseCase<R>
where
    R: ChatRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, chat_id: &ChatId) -> ChatResult<()> {
        if self.repo.find_by_id(chat_id).await?.is_none() {
            return Err(ChatError::NotFound);
        }

        self.repo.delete(chat_id).await?;

        tracing::info!(chat_id = %chat_id, "Chat deleted");

        Ok(())
    }
}
