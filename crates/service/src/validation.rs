//! Structural request validation.
//!
//! Every endpoint owns a small schema (see the `domain` modules) built from
//! the rules here. A schema checks all fields, collects every failure and
//! either yields a typed value or a [`ValidationErrors`] list.

use std::fmt;

use serde::Serialize;

/// One failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        Self(vec![FieldError { field: field.to_string(), message: message.into() }])
    }

    pub fn fields(&self) -> &[FieldError] { &self.0 }

    pub fn has(&self, field: &str) -> bool { self.0.iter().any(|e| e.field == field) }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|e| format!("{}: {}", e.field, e.message)).collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// A request schema: consumes the raw request, returns the validated value.
pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, ValidationErrors>;
}

/// Character-length bounds, inclusive.
#[derive(Debug, Clone, Copy)]
pub struct Length {
    pub min: usize,
    pub max: usize,
}

impl Length {
    pub const fn between(min: usize, max: usize) -> Self { Self { min, max } }
    pub const fn max(max: usize) -> Self { Self { min: 0, max } }
}

/// Accumulates field errors while a schema runs.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self { Self::default() }

    pub fn error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError { field: field.to_string(), message: message.into() });
    }

    fn check_length(&mut self, field: &str, value: &str, len: Length) {
        let n = value.chars().count();
        if n < len.min {
            self.error(field, format!("must contain at least {} character(s)", len.min));
        } else if n > len.max {
            self.error(field, format!("must contain at most {} character(s)", len.max));
        }
    }

    /// Required string. Returns an empty string on failure; the error is recorded.
    pub fn required(&mut self, field: &str, value: Option<String>, len: Length) -> String {
        match value {
            Some(v) => {
                self.check_length(field, &v, len);
                v
            }
            None => {
                self.error(field, "is required");
                String::new()
            }
        }
    }

    pub fn optional(&mut self, field: &str, value: Option<String>, len: Length) -> Option<String> {
        if let Some(v) = &value {
            self.check_length(field, v, len);
        }
        value
    }

    pub fn optional_email(&mut self, field: &str, value: Option<String>, len: Length) -> Option<String> {
        if let Some(v) = &value {
            if !is_email(v) {
                self.error(field, "must be a valid email");
            } else {
                self.check_length(field, v, len);
            }
        }
        value
    }

    pub fn positive(&mut self, field: &str, value: i64) {
        if value <= 0 {
            self.error(field, "must be a positive number");
        }
    }

    pub fn at_most(&mut self, field: &str, value: u64, max: u64) {
        if value > max {
            self.error(field, format!("must be less than or equal to {}", max));
        }
    }

    pub fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() { Ok(value) } else { Err(ValidationErrors(self.errors)) }
    }
}

/// Pragmatic address check: `local@domain.tld`, no whitespace.
pub fn is_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) { return false; }
    let Some((local, domain)) = s.split_once('@') else { return false };
    if local.is_empty() || domain.contains('@') { return false; }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty() && !host.ends_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_every_failure() {
        let mut v = Validator::new();
        v.required("username", None, Length::between(1, 100));
        v.required("name", Some(String::new()), Length::between(1, 100));
        v.optional("phone", Some("1".repeat(21)), Length::max(20));
        v.positive("id", 0);
        let err = v.finish(()).unwrap_err();
        assert_eq!(err.fields().len(), 4);
        assert!(err.has("username") && err.has("name") && err.has("phone") && err.has("id"));
        assert_eq!(err.fields()[0].message, "is required");
        assert_eq!(err.fields()[2].message, "must contain at most 20 character(s)");
    }

    #[test]
    fn passes_valid_input_through() {
        let mut v = Validator::new();
        let name = v.required("name", Some("Eko".into()), Length::between(1, 100));
        let email = v.optional_email("email", Some("eko@example.com".into()), Length::max(100));
        assert_eq!(v.finish((name, email)).unwrap(), ("Eko".to_string(), Some("eko@example.com".to_string())));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let mut v = Validator::new();
        v.required("name", Some("é".repeat(100)), Length::between(1, 100));
        assert!(v.finish(()).is_ok());
    }

    #[test]
    fn email_shapes() {
        assert!(is_email("a@b.co"));
        assert!(is_email("first.last@sub.example.com"));
        assert!(!is_email("no-at-sign"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("a@nodot"));
        assert!(!is_email("a b@example.com"));
        assert!(!is_email("a@@example.com"));
        assert!(!is_email("a@example."));
    }

    #[test]
    fn display_joins_fields() {
        let e = ValidationErrors::single("page", "must be a positive number");
        assert_eq!(e.to_string(), "page: must be a positive number");
    }
}
