//! Contact form submissions
//!
//! A submission is validated for presence only, then written to the
//! content store as a `contact` document. Nothing is retried here; the
//! form lets the visitor try again.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::cms::{CmsError, ContentStore};
use crate::content::DocumentKind;

/// Message returned for missing fields
pub const REQUIRED_FIELDS_MESSAGE: &str = "Name, email, and message are required";

/// Why a submission was not stored
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("{0}")]
    Validation(String),

    #[error("failed to save contact message: {0}")]
    Persistence(#[from] CmsError),
}

impl ContactError {
    /// Taxonomy tag reported in logs
    pub fn kind(&self) -> &'static str {
        match self {
            ContactError::Validation(_) => "validation-error",
            ContactError::Persistence(_) => "persistence-error",
        }
    }
}

/// A validated submission
#[derive(Debug, Clone, PartialEq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub received_at: Option<DateTime<Utc>>,
}

impl ContactSubmission {
    /// Parse and validate a raw request body
    pub fn from_json(body: &[u8]) -> Result<Self, ContactError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ContactError::Validation(format!("Invalid JSON body: {}", e)))?;
        Self::from_value(&value)
    }

    /// Validate a JSON object; every required field must be a non-blank string
    pub fn from_value(value: &Value) -> Result<Self, ContactError> {
        let Some(fields) = value.as_object() else {
            return Err(ContactError::Validation(
                "Request body must be a JSON object".to_string(),
            ));
        };

        let required = |key: &str| {
            fields
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
        };

        let (Some(name), Some(email), Some(message)) =
            (required("name"), required("email"), required("message"))
        else {
            return Err(ContactError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
        };

        let received_at = match fields.get("receivedAt") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(Value::String(s)) => Some(parse_timestamp(s.trim()).ok_or_else(|| {
                ContactError::Validation("receivedAt must be an ISO-8601 timestamp".to_string())
            })?),
            Some(_) => {
                return Err(ContactError::Validation(
                    "receivedAt must be an ISO-8601 timestamp".to_string(),
                ))
            }
        };

        Ok(Self {
            name,
            email,
            message,
            received_at,
        })
    }

    /// Build the store document, stamping `now` when no time was supplied
    pub fn into_document(self, now: DateTime<Utc>) -> Value {
        let received_at = self.received_at.unwrap_or(now);
        json!({
            "_type": DocumentKind::Contact.as_str(),
            "name": self.name,
            "email": self.email,
            "message": self.message,
            "receivedAt": received_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

/// Parse an ISO-8601 timestamp; values without an offset are taken as UTC
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(s) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Successful submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactReceipt {
    pub id: String,
}

/// Validate and persist a submission
pub async fn submit(store: &dyn ContentStore, body: &[u8]) -> Result<ContactReceipt, ContactError> {
    let submission = ContactSubmission::from_json(body)?;
    let document = submission.into_document(Utc::now());

    let id = store.create(document).await?;
    if id.trim().is_empty() {
        return Err(ContactError::Persistence(CmsError::Decode(
            "store returned an empty document id".to_string(),
        )));
    }

    tracing::info!("Stored contact message {}", id);
    Ok(ContactReceipt { id })
}
