//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the vocabulary shared by the `users` and `chats` crates:
//! - The error taxonomy ([`error::kind::ErrorKind`]) and [`error::app_error::AppError`]
//! - Integrity-violation classification for the PostgreSQL store
//! - Typed UUID identifiers for users and chats
//! - Field validation primitives used by value objects
//! - Partial-update (PATCH) deserialization helpers
//! - Request extractors rejecting with problem documents
//!
//! **Design Principle**: Only include things that have the same meaning in
//! every resource crate.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
#[cfg(feature = "axum")]
pub mod extract;
pub mod id;
pub mod patch;
#[cfg(all(feature = "sqlx", any(test, feature = "testing")))]
pub mod testing;
pub mod validation;
