//! Update Chat Use Case
//!
//! Full replacement (PUT) or partial update (PATCH).

use std::sync::Arc;

use kernel::id::ChatId;

use crate::domain::entity::chat::{Chat, ChatChanges};
use crate::domain::repository::ChatRepository;
use crate::domain::value_object::chat_title::ChatTitle;
use crate::error::{ChatError, ChatResult};

pub enum UpdateChatInput {
    /// Title and description are both replaced
    Full { title: String, description: String },
    /// Only supplied fields change; `description: Some(None)` clears it
    Partial {
        title: Option<String>,
        description: Option<Option<String>>,
    },
}

impl UpdateChatInput {
    fn into_changes(self) -> ChatResult<ChatChanges> {
        let (title, description) = match self {
            UpdateChatInput::Full { title, description } => (Some(title), Some(Some(description))),
            UpdateChatInput::Partial { title, description } => (title, description),
        };

        Ok(ChatChanges {
            title: title.map(ChatTitle::new).transpose()?,
            description,
        })
    }
}

pub struct UpdateChatUseCase<R>
where
    R: ChatRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateChatUseCase<R>
where
    R: ChatRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, chat_id: &ChatId, input: UpdateChatInput) -> ChatResult<Chat> {
        let changes = input.into_changes()?;

        let mut chat = self
            .repo
            .find_by_id(chat_id)
            .await?
            .ok_or(ChatError::NotFound)?;

        if changes.is_empty() {
            return Ok(chat);
        }

        chat.apply(changes);
        self.repo.update(&chat).await?;

        tracing::info!(chat_id = %chat.chat_id, "Chat updated");

        Ok(chat)
    }
}
