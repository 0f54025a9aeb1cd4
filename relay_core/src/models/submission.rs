//! Contact form submission models

use serde::Deserialize;
use validator::Validate;

use crate::{
    config::ContactPolicy,
    validation::{
        rules::{validate_email, validate_email_or_phone, validate_required, MAX_FIELD_CHARS},
        validate_derived, ContextValidatable, Validatable, ValidationContext, ValidationResult,
    },
};

/// Wire names of the form fields, in form order.
pub const FIELD_ORDER: [&str; 5] = ["firstName", "lastName", "contact", "address", "message"];

/// The request body as the browser sends it. Every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
    pub message: Option<String>,
}

/// A trimmed submission. Absent fields become empty strings; an empty
/// `contact` is only valid under [`ContactPolicy::OptionalEmail`].
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct Submission {
    #[validate(custom(function = "validate_required", message = "First name is required"))]
    #[validate(length(max = MAX_FIELD_CHARS, message = "First name must be at most 1024 characters"))]
    pub first_name: String,

    #[validate(custom(function = "validate_required", message = "Last name is required"))]
    #[validate(length(max = MAX_FIELD_CHARS, message = "Last name must be at most 1024 characters"))]
    pub last_name: String,

    #[validate(length(max = MAX_FIELD_CHARS, message = "Contact must be at most 1024 characters"))]
    pub contact: String,

    #[validate(custom(function = "validate_required", message = "Address is required"))]
    #[validate(length(max = MAX_FIELD_CHARS, message = "Address must be at most 1024 characters"))]
    pub address: String,

    #[validate(custom(function = "validate_required", message = "Message is required"))]
    #[validate(length(max = MAX_FIELD_CHARS, message = "Message must be at most 1024 characters"))]
    pub message: String,
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

fn wire_name(field: &str) -> &'static str {
    match field {
        "first_name" => "firstName",
        "last_name" => "lastName",
        "contact" => "contact",
        "address" => "address",
        "message" => "message",
        _ => "unknown",
    }
}

impl From<ContactForm> for Submission {
    fn from(form: ContactForm) -> Self {
        Self {
            first_name: trimmed(form.first_name),
            last_name: trimmed(form.last_name),
            contact: trimmed(form.contact),
            address: trimmed(form.address),
            message: trimmed(form.message),
        }
    }
}

impl Submission {
    pub fn has_contact(&self) -> bool {
        !self.contact.is_empty()
    }

    fn validate_contact(&self, policy: ContactPolicy) -> ValidationResult {
        let mut result = ValidationResult::success();

        match policy {
            ContactPolicy::FreeText => {
                if validate_required(&self.contact).is_err() {
                    result.add_error("contact", "Contact is required");
                }
            }
            ContactPolicy::EmailOrPhone => {
                if validate_required(&self.contact).is_err() {
                    result.add_error("contact", "Contact is required");
                } else if validate_email_or_phone(&self.contact).is_err() {
                    result.add_error("contact", "Contact must be a valid email address or phone number");
                }
            }
            ContactPolicy::OptionalEmail => {
                if self.has_contact() && validate_email(&self.contact).is_err() {
                    result.add_error("contact", "Contact must be a valid email address");
                }
            }
        }

        result
    }
}

impl Validatable for Submission {
    fn validate_comprehensive(&self) -> ValidationResult {
        validate_derived(self, wire_name)
    }
}

impl ContextValidatable for Submission {
    fn validate_with_context(&self, context: &ValidationContext) -> ValidationResult {
        let mut result = self.validate_comprehensive();
        result.merge(self.validate_contact(context.contact_policy));
        result.sort_by_field_order(&FIELD_ORDER);
        result
    }
}
