//! Application Configuration
//!
//! Configuration for the Users application layer.

use chrono::Duration;
use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Users application configuration
#[derive(Debug, Clone)]
pub struct UsersConfig {
    /// Refresh token cookie name
    pub refresh_cookie_name: String,
    /// Whether to mark the cookie Secure
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            refresh_cookie_name: "refresh_token".to_string(),
            cookie_secure: false,
            cookie_same_site: SameSite::Lax,
        }
    }
}

impl UsersConfig {
    /// Cookie settings for a refresh token living `ttl`
    pub fn refresh_cookie(&self, ttl: Duration) -> CookieConfig {
        CookieConfig {
            name: self.refresh_cookie_name.clone(),
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
            max_age: Some(ttl),
            ..CookieConfig::default()
        }
    }
}
