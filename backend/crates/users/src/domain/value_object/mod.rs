//! Value Object Module

pub mod full_name;
pub mod user_password;
pub mod username;
