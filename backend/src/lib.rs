//! User registry HTTP service.
//!
//! A thin actix-web transport over the `user-store` crate, laid out
//! hexagonally:
//!
//! - [`domain`]: the transport-agnostic error type, trace identifiers and the
//!   [`domain::ports::UserDirectory`] port.
//! - [`outbound`]: the CSV table adapter implementing that port.
//! - [`inbound`]: HTTP handlers, envelopes and error mapping.
//! - [`middleware`] and [`server`]: request tracing and application wiring.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
