//! Server settings, read once from the environment at startup.
//!
//! Required: `DATABASE_URL`, `AT_MINUTES`, `RT_DAYS`, `SECRET_KEY`, `ALGORITHM`.
//! Everything else has a default.

use anyhow::{Context, bail};
use platform::token::TokenConfig;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use users::UsersConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
/// 50 pooled + 50 overflow in the previous deployment
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 100;
const DEFAULT_DB_ACQUIRE_TIMEOUT_SECS: u64 = 3;
const DEFAULT_DB_MAX_LIFETIME_SECS: u64 = 1800;

#[derive(Clone)]
pub struct Settings {
    pub database_url: String,
    pub at_minutes: i64,
    pub rt_days: i64,
    pub secret_key: String,
    pub algorithm: String,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub db_max_lifetime: Duration,
    pub cookie_secure: bool,
    /// CORS allow-list; empty means no cross-origin access
    pub frontend_origins: Vec<String>,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |key: &str| -> anyhow::Result<String> {
            match lookup(key) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => bail!("{key} must be set"),
            }
        };
        let optional = |key: &str, default: &str| -> String {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            at_minutes: parse("AT_MINUTES", &required("AT_MINUTES")?)?,
            rt_days: parse("RT_DAYS", &required("RT_DAYS")?)?,
            secret_key: required("SECRET_KEY")?,
            algorithm: required("ALGORITHM")?,
            bind_addr: parse("BIND_ADDR", &optional("BIND_ADDR", DEFAULT_BIND_ADDR))?,
            db_max_connections: parse(
                "DB_MAX_CONNECTIONS",
                &optional("DB_MAX_CONNECTIONS", &DEFAULT_DB_MAX_CONNECTIONS.to_string()),
            )?,
            db_acquire_timeout: Duration::from_secs(parse(
                "DB_ACQUIRE_TIMEOUT_SECS",
                &optional(
                    "DB_ACQUIRE_TIMEOUT_SECS",
                    &DEFAULT_DB_ACQUIRE_TIMEOUT_SECS.to_string(),
                ),
            )?),
            db_max_lifetime: Duration::from_secs(parse(
                "DB_MAX_LIFETIME_SECS",
                &optional(
                    "DB_MAX_LIFETIME_SECS",
                    &DEFAULT_DB_MAX_LIFETIME_SECS.to_string(),
                ),
            )?),
            cookie_secure: parse("COOKIE_SECURE", &optional("COOKIE_SECURE", "false"))?,
            frontend_origins: optional("FRONTEND_ORIGINS", "")
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }

    pub fn token_config(&self) -> TokenConfig {
        TokenConfig::new(
            self.at_minutes,
            self.rt_days,
            self.secret_key.clone(),
            self.algorithm.clone(),
        )
    }

    pub fn users_config(&self) -> UsersConfig {
        UsersConfig {
            cookie_secure: self.cookie_secure,
            ..UsersConfig::default()
        }
    }
}

fn parse<T>(key: &str, value: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("{key} has an invalid value: {value:?}"))
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("database_url", &"[REDACTED]")
            .field("at_minutes", &self.at_minutes)
            .field("rt_days", &self.rt_days)
            .field("secret_key", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field("bind_addr", &self.bind_addr)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_acquire_timeout", &self.db_acquire_timeout)
            .field("db_max_lifetime", &self.db_max_lifetime)
            .field("cookie_secure", &self.cookie_secure)
            .field("frontend_origins", &self.frontend_origins)
            .finish()
    }
}
