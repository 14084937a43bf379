//! Field validation primitives
//!
//! Value objects in the resource crates express their format rules with
//! these character-class helpers. A failed rule is reported as a
//! [`FieldError`] naming the field.

/// A request field failed its format or length rule.
///
/// Rendered as `"<Label> invalid"`, e.g. `"Username invalid"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{label} invalid")]
pub struct FieldError {
    field: &'static str,
    label: &'static str,
}

impl FieldError {
    /// `field` is the wire name (`full_name`), `label` the human one (`Full name`).
    pub const fn new(field: &'static str, label: &'static str) -> Self {
        Self { field, label }
    }

    pub const fn field(&self) -> &'static str {
        self.field
    }

    pub const fn label(&self) -> &'static str {
        self.label
    }
}

/// Length in characters is within `min..=max`.
pub fn length_within(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    len >= min && len <= max
}

/// Every character satisfies `allowed`.
pub fn only(value: &str, allowed: impl Fn(char) -> bool) -> bool {
    value.chars().all(allowed)
}

/// At least one character satisfies `pred`.
pub fn contains(value: &str, pred: impl Fn(char) -> bool) -> bool {
    value.chars().any(pred)
}

/// Upper, lower and digit each present at least once (ASCII).
pub fn has_mixed_case_and_digit(value: &str) -> bool {
    contains(value, |c| c.is_ascii_uppercase())
        && contains(value, |c| c.is_ascii_lowercase())
        && contains(value, |c| c.is_ascii_digit())
}
