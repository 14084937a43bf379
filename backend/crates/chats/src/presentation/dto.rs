//! Data Transfer Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::list_chats::{DEFAULT_LIMIT, DEFAULT_SKIP, ListChatsInput};
use crate::domain::entity::chat::Chat;

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
}

impl From<Chat> for ChatResponse {
    fn from(chat: Chat) -> Self {
        Self {
            id: chat.chat_id.into_uuid(),
            title: chat.title.into_inner(),
            description: chat.description,
        }
    }
}

/// POST /chats
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateChatRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// PUT /chats/{chat_id}
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateChatFullRequest {
    pub title: String,
    pub description: String,
}

/// PATCH /chats/{chat_id}
///
/// A `null` title is ignored; a `null` description clears it.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateChatPartialRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "kernel::patch::nullable")]
    pub description: Option<Option<String>>,
}

/// GET /chats?skip=&limit=
#[derive(Debug, Deserialize)]
pub struct ListChatsQuery {
    #[serde(default = "default_skip")]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_skip() -> i64 {
    DEFAULT_SKIP
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl From<ListChatsQuery> for ListChatsInput {
    fn from(query: ListChatsQuery) -> Self {
        Self {
            skip: query.skip,
            limit: query.limit,
        }
    }
}
