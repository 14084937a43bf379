//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Access / refresh token service (JWT, HMAC)
//! - Password hashing (Argon2id)
//! - Cookie management for the refresh token

pub mod cookie;
pub mod password;
pub mod token;
