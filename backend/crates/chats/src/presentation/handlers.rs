//! HTTP Handlers
//!
//! Single-chat routes resolve the chat through [`owned_chat`] first, so a
//! chat owned by someone else answers exactly like a missing one.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::extract::{JsonBody, PathParam, QueryParams};
use kernel::id::{ChatId, UserId};
use platform::token::TokenService;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{
    CreateChatInput, CreateChatUseCase, DeleteChatUseCase, ListChatsUseCase, ReadChatUseCase,
    UpdateChatInput, UpdateChatUseCase,
};
use crate::domain::entity::chat::Chat;
use crate::domain::repository::ChatRepository;
use crate::error::{ChatError, ChatResult};
use crate::presentation::dto::{
    ChatResponse, CreateChatRequest, ListChatsQuery, UpdateChatFullRequest,
    UpdateChatPartialRequest,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for chat handlers
#[derive(Clone)]
pub struct ChatsAppState<R>
where
    R: ChatRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub tokens: Arc<TokenService>,
}

/// Fetch a chat the caller owns
async fn owned_chat<R>(
    state: &ChatsAppState<R>,
    chat_id: &ChatId,
    user_id: &UserId,
) -> ChatResult<Chat>
where
    R: ChatRepository + Clone + Send + Sync + 'static,
{
    let chat = ReadChatUseCase::new(state.repo.clone())
        .execute(chat_id)
        .await?;

    if !chat.is_owned_by(user_id) {
        tracing::debug!(chat_id = %chat_id, user_id = %user_id, "Chat access by non-owner");
        return Err(ChatError::NotFound);
    }

    Ok(chat)
}

/// POST /api/chats
pub async fn create_chat<R>(
    State(state): State<ChatsAppState<R>>,
    CurrentUser(user_id): CurrentUser,
    JsonBody(req): JsonBody<CreateChatRequest>,
) -> ChatResult<impl IntoResponse>
where
    R: ChatRepository + Clone + Send + Sync + 'static,
{
    let chat = CreateChatUseCase::new(state.repo.clone())
        .execute(
            &user_id,
            CreateChatInput {
                title: req.title,
                description: req.description,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ChatResponse::from(chat))))
}

/// GET /api/chats
pub async fn list_chats<R>(
    State(state): State<ChatsAppState<R>>,
    CurrentUser(user_id): CurrentUser,
    QueryParams(query): QueryParams<ListChatsQuery>,
) -> ChatResult<Json<Vec<ChatResponse>>>
where
    R: ChatRepository + Clone + Send + Sync + 'static,
{
    let chats = ListChatsUseCase::new(state.repo.clone())
        .execute(&user_id, query.into())
        .await?;

    Ok(Json(chats.into_iter().map(ChatResponse::from).collect()))
}

/// GET /api/chats/{chat_id}
pub async fn get_chat<R>(
    State(state): State<ChatsAppState<R>>,
    CurrentUser(user_id): CurrentUser,
    PathParam(chat_id): PathParam<Uuid>,
) -> ChatResult<Json<ChatResponse>>
where
    R: ChatRepository + Clone + Send + Sync + 'static,
{
    let chat = owned_chat(&state, &ChatId::from_uuid(chat_id), &user_id).await?;

    Ok(Json(chat.into()))
}

/// PUT /api/chats/{chat_id}
pub async fn full_update_chat<R>(
    State(state): State<ChatsAppState<R>>,
    CurrentUser(user_id): CurrentUser,
    PathParam(chat_id): PathParam<Uuid>,
    JsonBody(req): JsonBody<UpdateChatFullRequest>,
) -> ChatResult<Json<ChatResponse>>
where
    R: ChatRepository + Clone + Send + Sync + 'static,
{
    let chat_id = ChatId::from_uuid(chat_id);
    owned_chat(&state, &chat_id, &user_id).await?;

    let input = UpdateChatInput::Full {
        title: req.title,
        description: req.description,
    };
    let chat = UpdateChatUseCase::new(state.repo.clone())
        .execute(&chat_id, input)
        .await?;

    Ok(Json(chat.into()))
}

/// PATCH /api/chats/{chat_id}
pub async fn partial_update_chat<R>(
    State(state): State<ChatsAppState<R>>,
    CurrentUser(user_id): CurrentUser,
    PathParam(chat_id): PathParam<Uuid>,
    JsonBody(req): JsonBody<UpdateChatPartialRequest>,
) -> ChatResult<Json<ChatResponse>>
where
    R: ChatRepository + Clone + Send + Sync + 'static,
{
    let chat_id = ChatId::from_uuid(chat_id);
    owned_chat(&state, &chat_id, &user_id).await?;

    let input = UpdateChatInput::Partial {
        title: req.title,
        description: req.description,
    };
    let chat = UpdateChatUseCase::new(state.repo.clone())
        .execute(&chat_id, input)
        .await?;

    Ok(Json(chat.into()))
}

/// DELETE /api/chats/{chat_id}
pub async fn delete_chat<R>(
    State(state): State<ChatsAppState<R>>,
    CurrentUser(user_id): CurrentUser,
    PathParam(chat_id): PathParam<Uuid>,
) -> ChatResult<StatusCode>
where
    R: ChatRepository + Clone + Send + Sync + 'static,
{
    let chat_id = ChatId::from_uuid(chat_id);
    owned_chat(&state, &chat_id, &user_id).await?;

    DeleteChatUseCase::new(state.repo.clone())
        .execute(&chat_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
