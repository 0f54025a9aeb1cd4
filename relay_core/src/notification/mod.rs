//! Webhook message built from a contact submission.
//!
//! The shape follows the Discord incoming-webhook API: optional top-level
//! `content` and a single embed carrying one field per form input.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{config::NotificationConfig, models::Submission};

/// Rendered in place of a contact the caller was allowed to omit.
pub const MISSING_VALUE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline: Option<bool>,
}

impl EmbedField {
    fn new(name: &str, value: &str, inline: bool) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            inline: Some(inline),
        }
    }
}

impl NotificationMessage {
    pub fn from_submission(
        submission: &Submission,
        config: &NotificationConfig,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let contact = if submission.has_contact() {
            submission.contact.as_str()
        } else {
            MISSING_VALUE
        };

        let fields = vec![
            EmbedField::new("First Name", &submission.first_name, true),
            EmbedField::new("Last Name", &submission.last_name, true),
            EmbedField::new("Email / Phone", contact, false),
            EmbedField::new("Address", &submission.address, false),
            EmbedField::new("Message", &submission.message, false),
        ];

        Self {
            content: config.content.clone(),
            embeds: vec![Embed {
                title: config.title.clone(),
                color: config.color,
                fields,
                timestamp: iso_timestamp(generated_at),
            }],
        }
    }

    /// Value of the first field labelled `name` across all embeds.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.embeds
            .iter()
            .flat_map(|embed| embed.fields.iter())
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }
}

/// Millisecond precision with a `Z` suffix, e.g. `2024-05-01T12:30:00.000Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
