//! Request bodies for user mutations.
//!
//! Browsers and scripts send ages as numbers and everything else as text, so
//! each field accepts either form and is handed to the store as text. Keys
//! other than the five user fields are ignored.

use serde::Deserialize;
use serde_json::Number;
use user_store::UserFields;
use utoipa::ToSchema;

/// A JSON field value that may arrive as a string or a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text value, passed through unchanged.
    Text(String),
    /// Numeric value, rendered as its JSON text.
    Number(Number),
}

impl FieldValue {
    /// Text handed to the store for validation.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

/// Body of `POST /api/users` and `PUT /api/users/{id}`.
///
/// Absent and `null` fields are treated alike: missing on create and left
/// unchanged on update.
///
/// Example JSON:
/// `{"name":"Ann Lee","email":"ann@x.com","mobile":"555-123-4567","age":40,"address":"10 Oak Street"}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct UserPayload {
    /// Display name, at least 2 characters.
    #[schema(value_type = Option<String>, example = "Ann Lee")]
    pub name: Option<FieldValue>,
    /// Email address, unique regardless of case.
    #[schema(value_type = Option<String>, example = "ann@x.com")]
    pub email: Option<FieldValue>,
    /// Mobile number with at least 10 digits.
    #[schema(value_type = Option<String>, example = "555-123-4567")]
    pub mobile: Option<FieldValue>,
    /// Age in whole years between 1 and 150.
    #[schema(value_type = Option<u32>, example = 40)]
    pub age: Option<FieldValue>,
    /// Postal address, at least 5 characters.
    #[schema(value_type = Option<String>, example = "10 Oak Street")]
    pub address: Option<FieldValue>,
}

impl From<UserPayload> for UserFields {
    fn from(payload: UserPayload) -> Self {
        Self {
            name: payload.name.map(FieldValue::into_text),
            email: payload.email.map(FieldValue::into_text),
            mobile: payload.mobile.map(FieldValue::into_text),
            age: payload.age.map(FieldValue::into_text),
            address: payload.address.map(FieldValue::into_text),
        }
    }
}
