//! Structural validation for resource content.
//!
//! # Invariants
//! - Validation never touches storage; it only inspects field values.
//! - Every violation names the field it applies to.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex")
});

/// One field-level constraint violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

/// Caller-supplied content failed one or more structural constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Returns whether `field` has at least one violation.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .violations
            .iter()
            .map(|v| v.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl Error for ValidationError {}

/// Accumulates violations across fields, then converts into a result.
#[derive(Debug, Default)]
pub struct Validator {
    violations: Vec<FieldViolation>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn not_blank(mut self, field: &'static str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.push(field, format!("{field} must not be blank"));
        }
        self
    }

    pub fn max_chars(mut self, field: &'static str, value: &str, max: usize) -> Self {
        if value.chars().count() > max {
            self.push(field, format!("{field} must be at most {max} characters"));
        }
        self
    }

    pub fn email(mut self, field: &'static str, value: &str) -> Self {
        if !EMAIL_RE.is_match(value) {
            self.push(field, format!("{field} must be a valid email address"));
        }
        self
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                violations: self.violations,
            })
        }
    }

    fn push(&mut self, field: &'static str, message: String) {
        self.violations.push(FieldViolation { field, message });
    }
}
