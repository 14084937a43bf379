//! Domain Layer

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::chat::{Chat, ChatChanges};
pub use repository::ChatRepository;
