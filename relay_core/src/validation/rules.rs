//! Validation rules and custom validators

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

/// Longest value the webhook accepts for a single embed field.
pub const MAX_FIELD_CHARS: u64 = 1024;

lazy_static! {
    pub static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$"
    ).unwrap();

    static ref PHONE_REGEX: Regex = Regex::new(
        r"^\+?[0-9]{7,15}$"
    ).unwrap();

    static ref PHONE_SEPARATORS: Regex = Regex::new(
        r"[\s\-.()]"
    ).unwrap();

    pub static ref URL_REGEX: Regex = Regex::new(
        r"^https?://[^\s/$.?#].[^\s]*$"
    ).unwrap();
}

pub fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::new("required"));
    }

    if email.len() > 254 {
        return Err(ValidationError::new("email_too_long"));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::new("email"));
    }

    Ok(())
}

/// Accepts common separators such as `+1 (555) 123-4567`.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.is_empty() {
        return Err(ValidationError::new("required"));
    }

    let digits = PHONE_SEPARATORS.replace_all(phone, "");
    if !PHONE_REGEX.is_match(&digits) {
        return Err(ValidationError::new("phone"));
    }

    Ok(())
}

pub fn validate_email_or_phone(contact: &str) -> Result<(), ValidationError> {
    if validate_email(contact).is_ok() || validate_phone(contact).is_ok() {
        return Ok(());
    }
    Err(ValidationError::new("email_or_phone"))
}
