//! Repository Traits

use kernel::id::{ChatId, UserId};

use crate::domain::entity::chat::Chat;
use crate::error::ChatResult;

/// Chat repository trait
#[trait_variant::make(ChatRepository: Send)]
pub trait LocalChatRepository {
    /// Insert a chat. An owner that does not exist yields `ChatError::OwnerNotFound`
    /// and leaves the store unchanged.
    async fn create(&self, chat: &Chat) -> ChatResult<()>;

    async fn find_by_id(&self, chat_id: &ChatId) -> ChatResult<Option<Chat>>;

    /// Page of the owner's chats, newest first (`created_at DESC, id DESC`)
    async fn find_by_owner(&self, owner_id: &UserId, skip: i64, limit: i64)
    -> ChatResult<Vec<Chat>>;

    async fn update(&self, chat: &Chat) -> ChatResult<()>;

    async fn delete(&self, chat_id: &ChatId) -> ChatResult<()>;
}
