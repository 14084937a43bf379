//! Partial-update helpers
//!
//! A PATCH body has to tell "field absent" (leave untouched) apart from
//! "field explicitly null" (clear it). With `Option<Option<T>>` and
//! [`nullable`], absent deserializes to `None` and `null` to `Some(None)`.
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Patch {
//!     #[serde(default, deserialize_with = "kernel::patch::nullable")]
//!     description: Option<Option<String>>,
//! }
//!
//! let absent: Patch = serde_json::from_str("{}").unwrap();
//! assert_eq!(absent.description, None);
//!
//! let cleared: Patch = serde_json::from_str(r#"{"description":null}"#).unwrap();
//! assert_eq!(cleared.description, Some(None));
//! ```

use serde::{Deserialize, Deserializer};

/// Wraps whatever is present (including `null`) in `Some`.
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "super::nullable")]
        full_name: Option<Option<String>>,
    }

    #[test]
    fn test_absent_null_and_value() {
        let p: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(p.full_name, None);

        let p: Patch = serde_json::from_str(r#"{"full_name":null}"#).unwrap();
        assert_eq!(p.full_name, Some(None));

        let p: Patch = serde_json::from_str(r#"{"full_name":"Ada"}"#).unwrap();
        assert_eq!(p.full_name, Some(Some("Ada".to_string())));
    }
}
