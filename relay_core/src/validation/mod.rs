//! Submission validation: field rules plus the configured contact policy

pub mod rules;

use serde::Serialize;
use validator::{Validate, ValidationErrors};

use crate::config::ContactPolicy;

/// One failed check, reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Converts derive-level errors, renaming struct fields to their wire names
    /// through `wire_name`.
    pub fn from_validation_errors(errors: ValidationErrors, wire_name: fn(&str) -> &'static str) -> Self {
        let mut result = Self::success();

        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("Validation failed for field '{}'", field),
                };
                result.add_error(wire_name(&field), &message);
            }
        }

        result
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }

    /// Orders errors by the position of their field in `order`; unknown
    /// fields go last. Stable, so messages for one field keep their order.
    pub fn sort_by_field_order(&mut self, order: &[&str]) {
        self.errors.sort_by_key(|error| {
            order
                .iter()
                .position(|field| *field == error.field)
                .unwrap_or(order.len())
        });
    }
}

pub trait Validatable {
    fn validate_comprehensive(&self) -> ValidationResult;
}

/// Per-request inputs that change how a value is validated.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationContext {
    pub contact_policy: ContactPolicy,
}

pub trait ContextValidatable {
    fn validate_with_context(&self, context: &ValidationContext) -> ValidationResult;
}

/// Runs the derive validations; callers supply the wire-name mapping.
pub(crate) fn validate_derived<T: Validate>(value: &T, wire_name: fn(&str) -> &'static str) -> ValidationResult {
    match value.validate() {
        Ok(()) => ValidationResult::success(),
        Err(errors) => ValidationResult::from_validation_errors(errors, wire_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_merge() {
        let mut result = ValidationResult::success();
        assert!(result.is_valid());

        result.add_error("message", "Message is required");
        assert!(!result.is_valid());

        let mut other = ValidationResult::success();
        other.add_error("firstName", "First name is required");
        result.merge(other);

        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_sort_by_field_order() {
        let mut result = ValidationResult::success();
        result.add_error("message", "Message is required");
        result.add_error("unknown", "Something else");
        result.add_error("firstName", "First name is required");
        result.add_error("contact", "Contact is required");

        result.sort_by_field_order(&["firstName", "lastName", "contact", "address", "message"]);

        let fields: Vec<&str> = result.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["firstName", "contact", "message", "unknown"]);
    }
}
