//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header};
use axum::response::IntoResponse;
use kernel::extract::{FormBody, JsonBody};
use platform::cookie::{delete_cookie_header, extract_cookie, set_cookie_header};
use platform::token::TokenService;
use std::sync::Arc;

use crate::application::config::UsersConfig;
use crate::application::{
    DeleteUserInput, DeleteUserUseCase, ReadUserUseCase, RefreshTokenUseCase, SignInInput,
    SignInUseCase, SignUpInput, SignUpUseCase, TokenPair, UpdateUserInput, UpdateUserUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::UserResult;
use crate::presentation::dto::{
    CredentialsForm, DeleteUserRequest, TokenResponse, UpdateUserFullRequest,
    UpdateUserPartialRequest, UserResponse,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for user handlers
#[derive(Clone)]
pub struct UsersAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<UsersConfig>,
}

impl<R> UsersAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    fn refresh_cookie(&self, refresh_token: &str) -> UserResult<HeaderValue> {
        let cookie = self.config.refresh_cookie(self.tokens.refresh_ttl());
        Ok(set_cookie_header(&cookie, refresh_token)?)
    }

    fn clear_refresh_cookie(&self) -> UserResult<HeaderValue> {
        let cookie = self.config.refresh_cookie(self.tokens.refresh_ttl());
        Ok(delete_cookie_header(&cookie)?)
    }

    /// Access token in the body, refresh token in the cookie
    fn token_response(
        &self,
        status: StatusCode,
        pair: TokenPair,
    ) -> UserResult<(StatusCode, [(HeaderName, HeaderValue); 1], Json<TokenResponse>)> {
        Ok((
            status,
            [(header::SET_COOKIE, self.refresh_cookie(&pair.refresh_token)?)],
            Json(TokenResponse::bearer(pair.access_token)),
        ))
    }
}

// ============================================================================
// Tokens
// ============================================================================

/// POST /api/users/signup
pub async fn sign_up<R>(
    State(state): State<UsersAppState<R>>,
    FormBody(form): FormBody<CredentialsForm>,
) -> UserResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.tokens.clone());

    let output = use_case
        .execute(SignUpInput {
            username: form.username,
            password: form.password,
        })
        .await?;

    state.token_response(StatusCode::CREATED, output.tokens)
}

/// POST /api/users/signin
pub async fn sign_in<R>(
    State(state): State<UsersAppState<R>>,
    FormBody(form): FormBody<CredentialsForm>,
) -> UserResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.tokens.clone());

    let tokens = use_case
        .execute(SignInInput {
            username: form.username,
            password: form.password,
        })
        .await?;

    state.token_response(StatusCode::OK, tokens)
}

/// POST /api/users/refresh
pub async fn refresh<R>(
    State(state): State<UsersAppState<R>>,
    headers: HeaderMap,
) -> UserResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let token = extract_cookie(&headers, &state.config.refresh_cookie_name);

    let use_case = RefreshTokenUseCase::new(state.repo.clone(), state.tokens.clone());
    let tokens = use_case.execute(token.as_deref()).await?;

    state.token_response(StatusCode::OK, tokens)
}

/// POST /api/users/signout
pub async fn sign_out<R>(State(state): State<UsersAppState<R>>) -> UserResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    Ok((
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, state.clear_refresh_cookie()?)],
    ))
}

// ============================================================================
// Profile
// ============================================================================

/// GET /api/users/me
pub async fn read_me<R>(
    State(state): State<UsersAppState<R>>,
    CurrentUser(user_id): CurrentUser,
) -> UserResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = ReadUserUseCase::new(state.repo.clone())
        .execute(&user_id)
        .await?;

    Ok(Json(user.into()))
}

/// PUT /api/users
pub async fn full_update<R>(
    State(state): State<UsersAppState<R>>,
    CurrentUser(user_id): CurrentUser,
    JsonBody(req): JsonBody<UpdateUserFullRequest>,
) -> UserResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let input = UpdateUserInput::Full {
        username: req.username,
        password: req.password,
        full_name: req.full_name,
    };

    let user = UpdateUserUseCase::new(state.repo.clone())
        .execute(&user_id, input)
        .await?;

    Ok(Json(user.into()))
}

/// PATCH /api/users
pub async fn partial_update<R>(
    State(state): State<UsersAppState<R>>,
    CurrentUser(user_id): CurrentUser,
    JsonBody(req): JsonBody<UpdateUserPartialRequest>,
) -> UserResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let input = UpdateUserInput::Partial {
        username: req.username,
        password: req.password,
        full_name: req.full_name,
    };

    let user = UpdateUserUseCase::new(state.repo.clone())
        .execute(&user_id, input)
        .await?;

    Ok(Json(user.into()))
}

/// DELETE /api/users
pub async fn delete_user<R>(
    State(state): State<UsersAppState<R>>,
    CurrentUser(user_id): CurrentUser,
    JsonBody(req): JsonBody<DeleteUserRequest>,
) -> UserResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    DeleteUserUseCase::new(state.repo.clone())
        .execute(
            &user_id,
            DeleteUserInput {
                username: req.username,
                password: req.password,
            },
        )
        .await?;

    Ok((
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, state.clear_refresh_cookie()?)],
    ))
}
