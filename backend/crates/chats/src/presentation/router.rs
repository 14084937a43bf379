//! Chats Router

use axum::{Router, routing::get};
use platform::token::TokenService;
use std::sync::Arc;

use crate::domain::repository::ChatRepository;
use crate::infra::postgres::PgChatRepository;
use crate::presentation::handlers::{self, ChatsAppState};

/// Create the Chats router with PostgreSQL repository
pub fn chats_router(repo: PgChatRepository, tokens: Arc<TokenService>) -> Router {
    chats_router_generic(repo, tokens)
}

/// Create a generic Chats router for any repository implementation
pub fn chats_router_generic<R>(repo: R, tokens: Arc<TokenService>) -> Router
where
    R: ChatRepository + Clone + Send + Sync + 'static,
{
    let state = ChatsAppState {
        repo: Arc::new(repo),
        tokens,
    };

    Router::new()
        .route(
            "/chats",
            get(handlers::list_chats::<R>).post(handlers::create_chat::<R>),
        )
        .route(
            "/chats/{chat_id}",
            get(handlers::get_chat::<R>)
                .put(handlers::full_update_chat::<R>)
                .patch(handlers::partial_update_chat::<R>)
                .delete(handlers::delete_chat::<R>),
        )
        .with_state(state)
}
