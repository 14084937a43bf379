//! Chats Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Chat entity, title value object, repository trait
//! - `application/` - Use cases (create, read, list, update, delete)
//! - `infra/` - PostgreSQL implementation of the chat store
//! - `presentation/` - HTTP handlers, DTOs, bearer extractor, router
//!
//! Every chat belongs to exactly one user. Only the owner may read,
//! modify or delete a chat; to anyone else it does not exist.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{ChatError, ChatResult};
pub use infra::postgres::PgChatRepository;
pub use presentation::router::{chats_router, chats_router_generic};

#[cfg(test)]
mod tests;
