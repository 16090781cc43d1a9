//! A user-record store kept in a single flat CSV table.
//!
//! The crate owns everything between a request for a user operation and the
//! bytes on disk: field validation, email uniqueness, the table codec, atomic
//! rewrites, and age statistics. It is synchronous and performs no locking;
//! hosts that share a store across threads serialise access themselves.
//!
//! # Overview
//!
//! - [`UserStore`] creates the table on first use and offers list, get,
//!   insert, update and delete operations plus [`UserStore::summarize`].
//! - [`validation`] exposes the individual field rules so transports can
//!   report them ahead of time.
//! - [`table`] is the CSV codec, usable on its own for import and export.
//!
//! # Example
//!
//! ```
//! use user_store::{Initialization, StoreConfig, UserStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let store = UserStore::new(StoreConfig::new(dir.path(), "users.csv"));
//!
//! assert_eq!(store.ensure_initialized()?, Initialization::Created { seeded: 5 });
//! assert_eq!(store.ensure_initialized()?, Initialization::Existing);
//! assert_eq!(store.summarize()?.total_users, 5);
//! # Ok(())
//! # }
//! ```

mod atomic_io;
mod config;
mod error;
mod record;
mod seed;
mod stats;
mod store;
pub mod table;
pub mod validation;

pub use config::{DEFAULT_DIRECTORY, DEFAULT_FILE_NAME, StoreConfig};
pub use error::{Field, StoreError, ValidationError};
pub use record::{StoredAge, UserFields, UserId, UserRecord};
pub use stats::{AgeBucket, AgeHistogram, UserStats, summarize};
pub use store::{Initialization, UserStore};
