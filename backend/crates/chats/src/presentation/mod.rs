//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::ChatsAppState;
pub use middleware::CurrentUser;
pub use router::{chats_router, chats_router_generic};
