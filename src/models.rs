use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Consultation request exactly as it arrives on the wire.
///
/// Every field is defaulted so a missing key becomes an empty value and is
/// reported as a field-level validation error instead of a serde rejection.
/// `crate::consultation::validate` turns this into a typed
/// `ConsultationRequest` or a full list of field errors.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawConsultation {
    /// Full name of the requester.
    #[serde(default)]
    pub name: String,

    /// Age, transmitted as numeric text.
    #[serde(default)]
    pub age: String,

    /// "email" or "phone".
    #[serde(default)]
    pub contact_method: String,

    /// Required iff contact_method is "email".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Required iff contact_method is "phone"; exactly 10 digits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Service codes drawn from the fixed catalog.
    #[serde(default)]
    pub services: Vec<String>,

    /// Preferred appointment date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,

    /// Preferred half-hour slot label, e.g. "09:00 AM".
    #[serde(default)]
    pub time: String,
}

/// A single failed constraint, identifying the field and a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Success response for a dispatched consultation request.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ConsultationResponse {
    pub message: String,
    /// Opaque message identifier reported by the mail transport.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Body of a 400 response: every failing field, aggregated.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub error: String,
    pub details: Vec<FieldError>,
}

/// Body of a 500 response. Never carries transport-internal detail.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
