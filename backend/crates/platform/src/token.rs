//! Access / Refresh Token Service
//!
//! Mints and verifies the two classes of signed, expiring bearer
//! credentials used by the API:
//!
//! - **access** tokens, minutes-scale, sent as `Authorization: Bearer <jwt>`
//! - **refresh** tokens, days-scale, sent only in the `refresh_token` cookie
//!
//! Both are JWTs signed with one application-wide HMAC secret. Nothing is
//! persisted; validity is decided by signature, algorithm, expiry and the
//! `typ` claim at verification time.
//!
//! Every verification failure (absent, malformed, forged, expired, wrong
//! class) is reported as a [`TokenError`] for which
//! [`TokenError::is_unauthenticated`] is true. Callers map all of them to the
//! same response; the variants exist for logging only.

use std::fmt;
use std::str::FromStr;

use axum::http::{HeaderMap, header};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// Claims
// ============================================================================

/// Token class carried in the `typ` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenClass {
    Access,
    Refresh,
}

impl TokenClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenClass::Access => "access",
            TokenClass::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    exp: i64,
    iat: i64,
    typ: TokenClass,
}

// ============================================================================
// Errors
// ============================================================================

/// Token creation / verification failure
#[derive(Debug, Error)]
pub enum TokenError {
    /// No token was presented (no header, no cookie)
    #[error("Token not provided")]
    Missing,

    /// Malformed, bad signature, wrong algorithm or expired
    #[error("Invalid token: {0}")]
    Invalid(jsonwebtoken::errors::Error),

    /// Well-formed and signed by us, but of the other class
    #[error("Expected {expected} token, got {actual} token")]
    WrongClass {
        expected: TokenClass,
        actual: TokenClass,
    },

    /// Signing failed
    #[error("Token encoding failed: {0}")]
    Encoding(jsonwebtoken::errors::Error),

    /// `issued_at + lifetime` is not representable
    #[error("Token expiry out of range")]
    ExpiryOutOfRange,
}

impl TokenError {
    /// True for every verification failure; false only for issuing errors.
    pub fn is_unauthenticated(&self) -> bool {
        !matches!(self, TokenError::Encoding(_) | TokenError::ExpiryOutOfRange)
    }
}

/// Startup-time configuration error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenConfigError {
    #[error("Unsupported signing algorithm: {0} (expected HS256, HS384 or HS512)")]
    UnsupportedAlgorithm(String),

    #[error("Signing secret must not be empty")]
    EmptySecret,

    #[error("{0} lifetime must be positive")]
    NonPositiveLifetime(TokenClass),

    #[error("{0} lifetime must not exceed 36500 days")]
    LifetimeOutOfRange(TokenClass),
}

// ============================================================================
// Configuration
// ============================================================================

/// Upper bound for either lifetime
pub const MAX_LIFETIME_DAYS: i64 = 36_500;

/// Immutable token configuration, built once from settings at startup.
///
/// Lifetimes stay as raw settings values; [`TokenService::new`] range-checks them.
#[derive(Clone)]
pub struct TokenConfig {
    /// Access token lifetime in minutes
    pub at_minutes: i64,
    /// Refresh token lifetime in days
    pub rt_days: i64,
    /// HMAC signing secret
    pub secret_key: String,
    /// JWT algorithm identifier, e.g. `HS256`
    pub algorithm: String,
}

impl TokenConfig {
    pub fn new(
        at_minutes: i64,
        rt_days: i64,
        secret_key: impl Into<String>,
        algorithm: impl Into<String>,
    ) -> Self {
        Self {
            at_minutes,
            rt_days,
            secret_key: secret_key.into(),
            algorithm: algorithm.into(),
        }
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("at_minutes", &self.at_minutes)
            .field("rt_days", &self.rt_days)
            .field("secret_key", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

// ============================================================================
// Service
// ============================================================================

/// Stateless JWT issuer/verifier. Share as `Arc<TokenService>`.
pub struct TokenService {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &TokenConfig) -> Result<Self, TokenConfigError> {
        let algorithm = Algorithm::from_str(config.algorithm.trim())
            .ok()
            .filter(|alg| matches!(alg, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512))
            .ok_or_else(|| TokenConfigError::UnsupportedAlgorithm(config.algorithm.clone()))?;

        if config.secret_key.is_empty() {
            return Err(TokenConfigError::EmptySecret);
        }
        let access_ttl = lifetime(TokenClass::Access, Duration::try_minutes(config.at_minutes))?;
        let refresh_ttl = lifetime(TokenClass::Refresh, Duration::try_days(config.rt_days))?;

        let secret = config.secret_key.as_bytes();
        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            access_ttl,
            refresh_ttl,
        })
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    pub fn create_access_token(&self, user_id: Uuid) -> Result<String, TokenError> {
        self.create_access_token_at(user_id, Utc::now())
    }

    pub fn create_access_token_at(
        &self,
        user_id: Uuid,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        self.issue(user_id, TokenClass::Access, issued_at)
    }

    pub fn create_refresh_token(&self, user_id: Uuid) -> Result<String, TokenError> {
        self.create_refresh_token_at(user_id, Utc::now())
    }

    pub fn create_refresh_token_at(
        &self,
        user_id: Uuid,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        self.issue(user_id, TokenClass::Refresh, issued_at)
    }

    pub fn verify_access_token(&self, token: Option<&str>) -> Result<Uuid, TokenError> {
        self.verify(token, TokenClass::Access)
    }

    pub fn verify_refresh_token(&self, token: Option<&str>) -> Result<Uuid, TokenError> {
        self.verify(token, TokenClass::Refresh)
    }

    fn issue(
        &self,
        user_id: Uuid,
        class: TokenClass,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let ttl = match class {
            TokenClass::Access => self.access_ttl,
            TokenClass::Refresh => self.refresh_ttl,
        };

        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(TokenError::ExpiryOutOfRange)?;

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
            typ: class,
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(TokenError::Encoding)
    }

    fn verify(&self, token: Option<&str>, expected: TokenClass) -> Result<Uuid, TokenError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(TokenError::Missing)?;

        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(TokenError::Invalid)?;

        if data.claims.typ != expected {
            return Err(TokenError::WrongClass {
                expected,
                actual: data.claims.typ,
            });
        }

        Ok(data.claims.sub)
    }
}

/// Positive and at most [`MAX_LIFETIME_DAYS`]; `None` means the settings value overflowed.
fn lifetime(class: TokenClass, ttl: Option<Duration>) -> Result<Duration, TokenConfigError> {
    let ttl = ttl.ok_or(TokenConfigError::LifetimeOutOfRange(class))?;

    if ttl <= Duration::zero() {
        return Err(TokenConfigError::NonPositiveLifetime(class));
    }
    if ttl > Duration::days(MAX_LIFETIME_DAYS) {
        return Err(TokenConfigError::LifetimeOutOfRange(class));
    }
    Ok(ttl)
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.algorithm)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Header helpers
// ============================================================================

/// Token from `Authorization: Bearer <token>`; the scheme is case-insensitive.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if scheme.eq_ignore_ascii_case("bearer") {
        Some(token.trim())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn service(secret: &str) -> TokenService {
        TokenService::new(&TokenConfig::new(15, 7, secret, "HS256")).unwrap()
    }

    #[test]
    fn test_access_token_roundtrip() {
        let tokens = service("test-secret");
        let user_id = Uuid::new_v4();

        let token = tokens.create_access_token(user_id).unwrap();
        assert_eq!(tokens.verify_access_token(Some(&token)).unwrap(), user_id);
    }

    #[test]
    fn test_refresh_token_roundtrip() {
        let tokens = service("test-secret");
        let user_id = Uuid::new_v4();

        let token = tokens.create_refresh_token(user_id).unwrap();
        assert_eq!(tokens.verify_refresh_token(Some(&token)).unwrap(), user_id);
    }

    #[test]
    fn test_access_token_expires_after_lifetime() {
        let tokens = service("test-secret");
        let user_id = Uuid::new_v4();

        let still_valid = Utc::now() - Duration::minutes(14);
        let token = tokens.create_access_token_at(user_id, still_valid).unwrap();
        assert!(tokens.verify_access_token(Some(&token)).is_ok());

        let elapsed = Utc::now() - Duration::minutes(16);
        let token = tokens.create_access_token_at(user_id, elapsed).unwrap();
        let err = tokens.verify_access_token(Some(&token)).unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)));
        assert!(err.is_unauthenticated());
    }

    #[test]
    fn test_refresh_token_expires_after_lifetime() {
        let tokens = service("test-secret");
        let elapsed = Utc::now() - Duration::days(7) - Duration::minutes(1);
        let token = tokens
            .create_refresh_token_at(Uuid::new_v4(), elapsed)
            .unwrap();

        assert!(tokens.verify_refresh_token(Some(&token)).is_err());
    }

    #[test]
    fn test_foreign_secret_is_rejected() {
        let ours = service("our-secret");
        let theirs = service("their-secret");
        let user_id = Uuid::new_v4();

        let access = theirs.create_access_token(user_id).unwrap();
        let refresh = theirs.create_refresh_token(user_id).unwrap();

        assert!(ours.verify_access_token(Some(&access)).is_err());
        assert!(ours.verify_refresh_token(Some(&refresh)).is_err());
    }

    #[test]
    fn test_token_classes_are_not_interchangeable() {
        let tokens = service("test-secret");
        let user_id = Uuid::new_v4();

        let refresh = tokens.create_refresh_token(user_id).unwrap();
        let err = tokens.verify_access_token(Some(&refresh)).unwrap_err();
        assert!(matches!(
            err,
            TokenError::WrongClass {
                expected: TokenClass::Access,
                actual: TokenClass::Refresh
            }
        ));

        let access = tokens.create_access_token(user_id).unwrap();
        assert!(tokens.verify_refresh_token(Some(&access)).is_err());
    }

    #[test]
    fn test_missing_and_malformed_tokens() {
        let tokens = service("test-secret");

        assert!(matches!(
            tokens.verify_refresh_token(None),
            Err(TokenError::Missing)
        ));
        assert!(matches!(
            tokens.verify_access_token(Some("   ")),
            Err(TokenError::Missing)
        ));
        assert!(matches!(
            tokens.verify_access_token(Some("not.a.jwt")),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_algorithm_must_be_hmac() {
        let rs = TokenService::new(&TokenConfig::new(15, 7, "secret", "RS256"));
        assert!(matches!(rs, Err(TokenConfigError::UnsupportedAlgorithm(_))));

        let bogus = TokenService::new(&TokenConfig::new(15, 7, "secret", "nope"));
        assert!(matches!(
            bogus,
            Err(TokenConfigError::UnsupportedAlgorithm(_))
        ));

        assert!(TokenService::new(&TokenConfig::new(15, 7, "secret", "HS512")).is_ok());
    }

    #[test]
    fn test_config_rejects_empty_secret_and_zero_lifetimes() {
        assert_eq!(
            TokenService::new(&TokenConfig::new(15, 7, "", "HS256")).unwrap_err(),
            TokenConfigError::EmptySecret
        );
        assert_eq!(
            TokenService::new(&TokenConfig::new(0, 7, "s", "HS256")).unwrap_err(),
            TokenConfigError::NonPositiveLifetime(TokenClass::Access)
        );
        assert_eq!(
            TokenService::new(&TokenConfig::new(15, 0, "s", "HS256")).unwrap_err(),
            TokenConfigError::NonPositiveLifetime(TokenClass::Refresh)
        );
    }

    #[test]
    fn test_config_rejects_oversized_lifetimes() {
        assert_eq!(
            TokenService::new(&TokenConfig::new(i64::MAX, 7, "s", "HS256")).unwrap_err(),
            TokenConfigError::LifetimeOutOfRange(TokenClass::Access)
        );
        assert_eq!(
            TokenService::new(&TokenConfig::new(15, 100_000_000, "s", "HS256")).unwrap_err(),
            TokenConfigError::LifetimeOutOfRange(TokenClass::Refresh)
        );
        assert_eq!(
            TokenService::new(&TokenConfig::new(15, i64::MIN, "s", "HS256")).unwrap_err(),
            TokenConfigError::LifetimeOutOfRange(TokenClass::Refresh)
        );

        let longest = TokenService::new(&TokenConfig::new(15, MAX_LIFETIME_DAYS, "s", "HS256"))
            .unwrap();
        assert_eq!(longest.refresh_ttl(), Duration::days(MAX_LIFETIME_DAYS));
        assert!(longest.create_refresh_token(Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_expiry_overflow_is_an_issuing_error() {
        let tokens = service("test-secret");
        let err = tokens
            .create_refresh_token_at(Uuid::new_v4(), DateTime::<Utc>::MAX_UTC)
            .unwrap_err();

        assert!(matches!(err, TokenError::ExpiryOutOfRange));
        assert!(!err.is_unauthenticated());
    }

    #[test]
    fn test_config_debug_redacts_secret() {
        let config = TokenConfig::new(15, 7, "super-secret", "HS256");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("bearer xyz"));
        assert_eq!(bearer_token(&headers), Some("xyz"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(bearer_token(&headers), None);
    }
}
