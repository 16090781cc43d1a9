//! HTTP inbound adapter exposing the user registry REST endpoints.

pub mod envelope;
pub mod error;
pub mod health;
pub mod payload;
pub mod schemas;
pub mod state;
pub mod users;

pub use error::ApiResult;
