//! Driving port for user registry use-cases.
//!
//! Inbound adapters (HTTP handlers) use this port to read and change user
//! records without importing persistence concerns. Production backs it with
//! the CSV table adapter; handler tests use the generated mock.

use async_trait::async_trait;
use user_store::{UserFields, UserRecord, UserStats};

use crate::domain::Error;

/// Domain use-case port for the user registry.
///
/// Implementations report failures as [`Error`] with
/// [`crate::domain::ErrorCode::InvalidRequest`] for rejected fields,
/// [`crate::domain::ErrorCode::NotFound`] for unknown identifiers and
/// [`crate::domain::ErrorCode::Conflict`] for a taken email address.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Every user, in stored order.
    async fn list_users(&self) -> Result<Vec<UserRecord>, Error>;

    /// The user with identifier `id`.
    async fn get_user(&self, id: &str) -> Result<UserRecord, Error>;

    /// Validate and register a new user.
    async fn create_user(&self, fields: UserFields) -> Result<UserRecord, Error>;

    /// Apply the supplied fields to an existing user.
    async fn update_user(&self, id: &str, fields: UserFields) -> Result<UserRecord, Error>;

    /// Remove a user.
    async fn delete_user(&self, id: &str) -> Result<(), Error>;

    /// Summary statistics over every user.
    async fn user_stats(&self) -> Result<UserStats, Error>;
}
