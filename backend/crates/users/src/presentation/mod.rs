//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the bearer-token extractor.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::UsersAppState;
pub use middleware::CurrentUser;
pub use router::{users_router, users_router_generic};
