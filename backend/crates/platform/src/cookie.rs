//! Cookie Management Infrastructure
//!
//! Builds and reads the `Set-Cookie` / `Cookie` headers used to carry the
//! refresh token.

use axum::http::header::InvalidHeaderValue;
use axum::http::{HeaderMap, HeaderValue, header};
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

/// IMF-fixdate, as required for the `Expires` attribute (RFC 9110 §5.6.7)
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Set-Cookie construction failure
#[derive(Debug, Error)]
pub enum CookieError {
    /// `now + max_age` is not representable
    #[error("Cookie expiry out of range")]
    ExpiryOutOfRange,

    #[error("Cookie is not a valid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),
}

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Cookie configuration
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
    /// Lifetime; emitted as both `Max-Age` and `Expires`
    pub max_age: Option<Duration>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "refresh_token".to_string(),
            secure: false,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            max_age: None,
        }
    }
}

impl CookieConfig {
    /// Build Set-Cookie header value
    pub fn build_set_cookie(&self, value: &str) -> Result<String, CookieError> {
        self.build_set_cookie_at(value, Utc::now())
    }

    /// Same as [`Self::build_set_cookie`] with an explicit clock for `Expires`
    pub fn build_set_cookie_at(
        &self,
        value: &str,
        now: DateTime<Utc>,
    ) -> Result<String, CookieError> {
        let mut cookie = format!("{}={}", self.name, value);

        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str(&format!("; Path={}", self.path));

        if let Some(max_age) = self.max_age {
            let expires = now
                .checked_add_signed(max_age)
                .ok_or(CookieError::ExpiryOutOfRange)?;
            cookie.push_str(&format!("; Max-Age={}", max_age.num_seconds()));
            cookie.push_str(&format!("; Expires={}", expires.format(HTTP_DATE_FORMAT)));
        }

        Ok(cookie)
    }

    /// Build Set-Cookie header for deletion (expired)
    pub fn build_delete_cookie(&self) -> String {
        let mut cookie = format!(
            "{}=; HttpOnly; Path={}; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
            self.name, self.path
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie
    }
}

/// Extract a cookie value from headers
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;

            if key == name && !value.is_empty() {
                Some(value.to_string())
            } else {
                None
            }
        })
}

/// Set-Cookie header value carrying `value`
pub fn set_cookie_header(config: &CookieConfig, value: &str) -> Result<HeaderValue, CookieError> {
    Ok(HeaderValue::from_str(&config.build_set_cookie(value)?)?)
}

/// Set-Cookie header value that removes the cookie
pub fn delete_cookie_header(config: &CookieConfig) -> Result<HeaderValue, CookieError> {
    Ok(HeaderValue::from_str(&config.build_delete_cookie())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn refresh_cookie() -> CookieConfig {
        CookieConfig {
            max_age: Some(Duration::days(7)),
            ..CookieConfig::default()
        }
    }

    #[test]
    fn test_cookie_config_build() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let cookie = refresh_cookie()
            .build_set_cookie_at("value123", now)
            .unwrap();

        assert!(cookie.starts_with("refresh_token=value123"));
        assert!(cookie.contains("HttpOnly"));
        assert!(!cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=604800"));
        assert!(cookie.contains("Expires=Mon, 26 Oct 2026 12:00:00 GMT"));
    }

    #[test]
    fn test_secure_flag() {
        let config = CookieConfig {
            secure: true,
            ..refresh_cookie()
        };
        assert!(config.build_set_cookie("v").unwrap().contains("; Secure"));
        assert!(config.build_delete_cookie().contains("; Secure"));
    }

    #[test]
    fn test_delete_cookie() {
        let cookie = refresh_cookie().build_delete_cookie();
        assert!(cookie.starts_with("refresh_token=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
    }

    #[test]
    fn test_header_values() {
        let config = refresh_cookie();

        let set = set_cookie_header(&config, "abc.def.ghi").unwrap();
        assert!(set.to_str().unwrap().starts_with("refresh_token=abc.def.ghi;"));

        let delete = delete_cookie_header(&config).unwrap();
        assert!(delete.to_str().unwrap().contains("Max-Age=0"));
    }

    #[test]
    fn test_unencodable_cookie_is_an_error() {
        let config = refresh_cookie();
        assert!(matches!(
            set_cookie_header(&config, "bad\nvalue"),
            Err(CookieError::InvalidHeader(_))
        ));

        let bad_name = CookieConfig {
            name: "refresh\r\ntoken".to_string(),
            ..refresh_cookie()
        };
        assert!(matches!(
            delete_cookie_header(&bad_name),
            Err(CookieError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_expiry_overflow_is_an_error() {
        let result = refresh_cookie().build_set_cookie_at("v", DateTime::<Utc>::MAX_UTC);
        assert!(matches!(result, Err(CookieError::ExpiryOutOfRange)));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; refresh_token=abc.def.ghi; other=xyz"),
        );

        assert_eq!(
            extract_cookie(&headers, "refresh_token"),
            Some("abc.def.ghi".to_string())
        );
        assert_eq!(extract_cookie(&headers, "foo"), Some("bar".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_extract_cookie_ignores_empty_value() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("refresh_token="));
        assert_eq!(extract_cookie(&headers, "refresh_token"), None);
    }
}
