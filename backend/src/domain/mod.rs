//! Domain primitives and ports.
//!
//! Purpose: keep transport and storage details out of the types handlers and
//! adapters share. User records and their validation live in the
//! `user-store` crate; this module adds the error envelope, the request trace
//! identifier and the [`ports::UserDirectory`] use-case port.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - TraceId (alias to `trace_id::TraceId`): request correlation id.

pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
