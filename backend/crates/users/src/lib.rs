//! Users Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - User entity, value objects, repository trait
//! - `application/` - Use cases (sign up / in, token refresh, profile CRUD)
//! - `infra/` - PostgreSQL implementation of the credential store
//! - `presentation/` - HTTP handlers, DTOs, bearer extractor, router
//!
//! ## Authentication Model
//! - Passwords hashed with Argon2id
//! - Short-lived access token sent as `Authorization: Bearer`
//! - Long-lived refresh token in an HTTP-only `refresh_token` cookie;
//!   every refresh rotates both tokens

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::UsersConfig;
pub use error::{UserError, UserResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::router::{users_router, users_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
