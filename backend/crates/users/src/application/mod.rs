//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod delete_user;
pub mod read_user;
pub mod refresh;
pub mod sign_in;
pub mod sign_up;
pub mod tokens;
pub mod update_user;

// Re-exports
pub use config::UsersConfig;
pub use delete_user::{DeleteUserInput, DeleteUserUseCase};
pub use read_user::ReadUserUseCase;
pub use refresh::RefreshTokenUseCase;
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use tokens::TokenPair;
pub use update_user::{UpdateUserInput, UpdateUserUseCase};
