//! Success envelopes shared by the user endpoints.
//!
//! Every successful response carries `"success": true` plus whichever of
//! `data`, `count` and `message` the endpoint defines. Failures use the
//! [`crate::domain::Error`] envelope instead.

use serde::Serialize;

/// Success body for user endpoints.
///
/// # Examples
/// ```
/// use user_registry::inbound::http::envelope::Envelope;
///
/// let body = serde_json::to_value(Envelope::list(vec![1, 2])).expect("serialise");
/// assert_eq!(body, serde_json::json!({"success": true, "data": [1, 2], "count": 2}));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
}

impl<T> Envelope<T> {
    /// Wrap a single value.
    pub const fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            count: None,
        }
    }

    /// Wrap a value alongside a confirmation message.
    pub const fn with_message(message: &'static str, data: T) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
            count: None,
        }
    }
}

impl<T> Envelope<Vec<T>> {
    /// Wrap a collection and report its length.
    pub fn list(data: Vec<T>) -> Self {
        Self {
            success: true,
            message: None,
            count: Some(data.len()),
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    /// A confirmation message with no data.
    pub const fn message(message: &'static str) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: None,
            count: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn message_only_envelope_omits_data() {
        let body = serde_json::to_value(Envelope::message("User deleted successfully"))
            .expect("serialise");
        assert_eq!(
            body,
            json!({"success": true, "message": "User deleted successfully"})
        );
    }

    #[test]
    fn message_with_data_keeps_both() {
        let body = serde_json::to_value(Envelope::with_message("User created successfully", 7))
            .expect("serialise");
        assert_eq!(
            body,
            json!({"success": true, "message": "User created successfully", "data": 7})
        );
    }
}
