//! OpenAPI schema definitions for store and domain types.
//!
//! The `user-store` crate and the domain error stay framework-agnostic by not
//! deriving `ToSchema`. This module provides the schema definitions required
//! for OpenAPI documentation using utoipa's external schema registration.
//!
//! The wrappers mirror the serialised shape of their counterparts but live in
//! the inbound adapter layer where framework concerns belong.

#![expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]

use std::collections::BTreeMap;

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The email address is already registered.
    #[schema(rename = "conflict")]
    Conflict,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for the serialised [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = ErrorResponse, rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Always `false`.
    #[schema(example = false)]
    success: bool,
    /// Human-readable message returned to clients.
    #[schema(example = "Invalid email address")]
    error: String,
    /// Stable machine-readable error code.
    code: ErrorCodeSchema,
    /// Supplementary details, such as the rejected field.
    details: Option<serde_json::Value>,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "7c9e6679-7425-40de-944b-e07fc1f90ae7")]
    trace_id: Option<String>,
}

/// OpenAPI schema for [`user_store::UserRecord`].
#[derive(ToSchema)]
#[schema(as = UserRecord)]
pub struct UserRecordSchema {
    /// Store-assigned identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// Display name.
    #[schema(example = "Ann Lee")]
    name: String,
    /// Lowercased email address.
    #[schema(example = "ann@x.com")]
    email: String,
    /// Mobile number as supplied.
    #[schema(example = "555-123-4567")]
    mobile: String,
    /// Age in years; legacy rows may carry text instead.
    #[schema(value_type = u32, example = 40)]
    age: serde_json::Value,
    /// Postal address.
    #[schema(example = "10 Oak Street")]
    address: String,
    /// RFC 3339 creation timestamp.
    #[schema(example = "2026-03-14T09:26:53.000000Z")]
    created_at: String,
}

/// OpenAPI schema for [`user_store::UserStats`].
#[derive(ToSchema)]
#[schema(as = UserStats)]
pub struct UserStatsSchema {
    /// Number of stored users.
    #[schema(example = 5)]
    total_users: usize,
    /// Mean numeric age, one decimal place.
    #[schema(example = 34.4)]
    average_age: f64,
    /// Users per age bucket: `0-18`, `19-30`, `31-50` and `51+`.
    #[schema(example = json!({"0-18": 0, "19-30": 2, "31-50": 3, "51+": 0}))]
    age_distribution: BTreeMap<String, usize>,
}

/// `GET /api/users` response.
#[derive(ToSchema)]
pub struct UserListResponse {
    /// Always `true`.
    success: bool,
    /// Users in stored order.
    data: Vec<UserRecordSchema>,
    /// Number of users returned.
    count: usize,
}

/// Single-user response.
#[derive(ToSchema)]
pub struct UserResponse {
    /// Always `true`.
    success: bool,
    /// Confirmation message on create and update.
    #[schema(example = "User created successfully")]
    message: Option<String>,
    /// The user.
    data: UserRecordSchema,
}

/// Confirmation without data.
#[derive(ToSchema)]
pub struct MessageResponse {
    /// Always `true`.
    success: bool,
    /// Confirmation message.
    #[schema(example = "User deleted successfully")]
    message: String,
}

/// `GET /api/users/stats/summary` response.
#[derive(ToSchema)]
pub struct UserStatsResponse {
    /// Always `true`.
    success: bool,
    /// Aggregate statistics.
    data: UserStatsSchema,
}

#[cfg(test)]
mod tests {
    use utoipa::PartialSchema;

    use super::*;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_code_schema_lists_every_code() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        assert_eq!(ErrorCodeSchema::name(), "ErrorCode");
        for code in ["invalid_request", "not_found", "conflict", "internal_error"] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn error_schema_uses_wire_field_names() {
        let schema_json = schema_to_json::<ErrorSchema>();
        assert_eq!(ErrorSchema::name(), "ErrorResponse");
        assert!(schema_json.contains("traceId"));
        assert!(schema_json.contains("\"error\""));
    }

    #[test]
    fn user_record_schema_has_every_column() {
        let schema_json = schema_to_json::<UserRecordSchema>();
        assert_eq!(UserRecordSchema::name(), "UserRecord");
        for column in user_store::table::COLUMNS {
            assert!(schema_json.contains(column), "missing {column}");
        }
    }
}
