//! Application Layer
//!
//! Chat use cases. Ownership is checked by the presentation layer.

pub mod create_chat;
pub mod delete_chat;
pub mod list_chats;
pub mod read_chat;
pub mod update_chat;

// Re-exports
pub use create_chat::{CreateChatInput, CreateChatUseCase};
pub use delete_chat::DeleteChatUseCase;
pub use list_chats::{ListChatsInput, ListChatsUseCase};
pub use read_chat::ReadChatUseCase;
pub use update_chat::{UpdateChatInput, UpdateChatUseCase};
