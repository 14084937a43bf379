//! Users Router

use axum::{
    Router,
    routing::{get, post, put},
};
use platform::token::TokenService;
use std::sync::Arc;

use crate::application::config::UsersConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, UsersAppState};

/// Create the Users router with PostgreSQL repository
pub fn users_router(
    repo: PgUserRepository,
    tokens: Arc<TokenService>,
    config: UsersConfig,
) -> Router {
    users_router_generic(repo, tokens, config)
}

/// Create a generic Users router for any repository implementation
pub fn users_router_generic<R>(repo: R, tokens: Arc<TokenService>, config: UsersConfig) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = UsersAppState {
        repo: Arc::new(repo),
        tokens,
        config: Arc::new(config),
    };

    Router::new()
        .route("/users/signup", post(handlers::sign_up::<R>))
        .route("/users/signin", post(handlers::sign_in::<R>))
        .route("/users/refresh", post(handlers::refresh::<R>))
        .route("/users/signout", post(handlers::sign_out::<R>))
        .route("/users/me", get(handlers::read_me::<R>))
        .route(
            "/users",
            put(handlers::full_update::<R>)
                .patch(handlers::partial_update::<R>)
                .delete(handlers::delete_user::<R>),
        )
        .with_state(state)
}
