//! Create Chat Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::chat::Chat;
use crate::domain::repository::ChatRepository;
use crate::domain::value_object::chat_title::ChatTitle;
use crate::error::ChatResult;

pub struct CreateChatInput {
    pub title: String,
    pub description: Option<String>,
}

pub struct CreateChatUseCase<R>
where
    R: ChatRepository,
{
    repo: Arc<R>,
}

impl<R> CreateChatUseCase<R>
where
    R: ChatRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, owner_id: &UserId, input: CreateChatInput) -> ChatResult<Chat> {
        let title = ChatTitle::new(input.title)?;
        let chat = Chat::new(*owner_id, title, input.description);

        self.repo.create(&chat).await?;

        tracing::info!(chat_id = %chat.chat_id, owner_id = %owner_id, "Chat created");

        Ok(chat)
    }
}
