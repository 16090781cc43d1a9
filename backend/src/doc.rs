//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every user endpoint plus the health report and probes
//! - **Schemas**: wrappers from [`crate::inbound::http::schemas`] that
//!   describe store and domain types without coupling them to utoipa
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::health::ServiceHealth;
use crate::inbound::http::payload::UserPayload;
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, MessageResponse, UserListResponse, UserRecordSchema,
    UserResponse, UserStatsResponse, UserStatsSchema,
};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User registry API",
        description = "CRUD and statistics over a CSV-backed user table, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::user_stats,
        crate::inbound::http::health::service_health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserPayload,
        UserRecordSchema,
        UserStatsSchema,
        UserListResponse,
        UserResponse,
        UserStatsResponse,
        MessageResponse,
        ServiceHealth,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "users", description = "Operations on user records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document.

    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/api/users")]
    #[case("/api/users/{id}")]
    #[case("/api/users/stats/summary")]
    #[case("/api/health")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn documents_every_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[test]
    fn error_schema_uses_the_failure_envelope() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("ErrorResponse").expect("Error schema");

        assert_object_schema_has_field(error_schema, "success");
        assert_object_schema_has_field(error_schema, "error");
        assert_object_schema_has_field(error_schema, "code");
    }

    #[test]
    fn user_record_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user_schema = schemas.get("UserRecord").expect("UserRecord schema");

        assert_object_schema_has_field(user_schema, "email");
        assert_object_schema_has_field(user_schema, "created_at");
    }
}
