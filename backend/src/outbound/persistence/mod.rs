//! Persistence adapters backed by the flat CSV user table.
//!
//! Adapters only translate between the `user-store` crate and domain types;
//! validation and uniqueness rules live in the store itself.

mod csv_user_directory;
mod store_error_mapping;

pub use csv_user_directory::CsvUserDirectory;
