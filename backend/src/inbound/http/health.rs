//! Health endpoints: the service status report plus liveness and readiness
//! probes for orchestration and load balancers.
//! Document endpoints in OpenAPI via Utoipa.
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use chrono::SecondsFormat;
use serde::Serialize;
use utoipa::ToSchema;

use crate::inbound::http::state::HttpState;

/// Name reported by `GET /api/health`.
pub const SERVICE_NAME: &str = "User Management System API";

/// Shared readiness state for the probes.
#[derive(Debug, Default)]
pub struct HealthState {
    ready: AtomicBool,
}

impl HealthState {
    /// Create a new health state starting as not ready.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready once the user table is initialised.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Return readiness state.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ServiceHealth {
    /// Always `healthy` while the process answers.
    #[schema(example = "healthy")]
    pub status: &'static str,
    /// Service name.
    #[schema(example = "User Management System API")]
    pub service: &'static str,
    /// RFC 3339 time the report was produced.
    #[schema(example = "2026-03-14T09:26:53.000000Z")]
    pub timestamp: String,
}

/// Service status report.
#[utoipa::path(
    get,
    path = "/api/health",
    tags = ["health"],
    responses(
        (status = 200, description = "Service is healthy", body = ServiceHealth)
    )
)]
#[get("/health")]
pub async fn service_health(state: web::Data<HttpState>) -> HttpResponse {
    let timestamp = state
        .clock
        .utc()
        .to_rfc3339_opts(SecondsFormat::Micros, true);
    HttpResponse::Ok().json(ServiceHealth {
        status: "healthy",
        service: SERVICE_NAME,
        timestamp,
    })
}

/// Readiness probe. Return 200 when the user table is initialised and the server can handle traffic; return 503 otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (
            status = 405,
            description = "Method not allowed; only GET probes are supported"
        ),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe. Return 200 whenever the process can answer.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (
            status = 405,
            description = "Method not allowed; only GET probes are supported"
        )
    )
)]
#[get("/health/live")]
pub async fn live() -> HttpResponse {
    HealthState::probe_response(true)
}
