//! Server construction and middleware wiring.

mod config;

pub use config::RegistrySettings;

use std::net::SocketAddr;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::error::{endpoint_not_found, json_error_handler};
use crate::inbound::http::health::{HealthState, live, ready, service_health};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users;

/// Shared state handed to every worker's application.
#[derive(Clone)]
pub struct AppDependencies {
    /// Readiness flag for the probes.
    pub health_state: web::Data<HealthState>,
    /// Ports used by the user handlers.
    pub http_state: web::Data<HttpState>,
}

/// Assemble the application: trace middleware, JSON error handling, the
/// `/api` scope, health probes and the 404 fallback.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use actix_web::web;
/// use user_registry::inbound::http::health::HealthState;
/// use user_registry::inbound::http::state::HttpState;
/// use user_registry::outbound::persistence::CsvUserDirectory;
/// use user_registry::server::{AppDependencies, build_app};
/// use user_store::{StoreConfig, UserStore};
///
/// let users = CsvUserDirectory::new(UserStore::new(StoreConfig::default()));
/// let _app = build_app(AppDependencies {
///     health_state: web::Data::new(HealthState::new()),
///     http_state: web::Data::new(HttpState::new(Arc::new(users))),
/// });
/// ```
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api")
        .service(service_health)
        .configure(users::configure);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(endpoint_not_found))
}

/// Construct an Actix HTTP server bound to `bind_addr`.
///
/// # Parameters
/// - `deps`: shared state; readiness is marked once the socket is bound.
/// - `bind_addr`: address from [`RegistrySettings::bind_addr`].
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(deps: AppDependencies, bind_addr: SocketAddr) -> std::io::Result<Server> {
    let health_state = deps.health_state.clone();
    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
