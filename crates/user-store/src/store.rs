//! The users table and its read-modify-rewrite operations.
//!
//! Every mutation loads the whole collection, applies one change in memory,
//! and rewrites the whole table through [`crate::atomic_io`]. That costs
//! O(n) per write, which is fine at the scale a flat file is meant for, and
//! means a failed write never leaves a half-written table behind.
//!
//! The store performs no locking. Callers sharing one table between threads
//! must serialise access themselves.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use chrono::SecondsFormat;
use mockable::{Clock, DefaultClock};
use tracing::{debug, info};

use crate::atomic_io::write_atomic;
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::record::{StoredAge, UserFields, UserId, UserRecord, email_key};
use crate::seed::seed_records;
use crate::stats::{UserStats, summarize};
use crate::table;
use crate::validation::{
    validate_address, validate_age, validate_email, validate_mobile, validate_name,
    validate_new_user,
};

/// Outcome of [`UserStore::ensure_initialized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Initialization {
    /// The table was absent and has been created.
    Created {
        /// Number of seed records written.
        seeded: usize,
    },
    /// The table already existed and was left untouched.
    Existing,
}

/// A users table persisted as a flat CSV file.
///
/// # Examples
/// ```
/// use user_store::{StoreConfig, UserFields, UserStore};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = tempfile::tempdir()?;
/// let store = UserStore::new(StoreConfig::new(dir.path(), "users.csv").without_seed_records());
/// store.ensure_initialized()?;
///
/// let created = store.insert(
///     &UserFields::default()
///         .with_name("Ann Lee")
///         .with_email("Ann@X.com")
///         .with_mobile("555-123-4567")
///         .with_age("40")
///         .with_address("10 Oak Street"),
/// )?;
/// assert_eq!(created.email, "ann@x.com");
/// assert_eq!(store.get(created.id.as_ref())?, created);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct UserStore {
    config: StoreConfig,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for UserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl UserStore {
    /// Create a store for `config` using the system clock.
    ///
    /// No I/O happens until an operation is called.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self::with_clock(config, Arc::new(DefaultClock))
    }

    /// Create a store that stamps records using `clock`.
    #[must_use]
    pub fn with_clock(config: StoreConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    /// The configuration this store was built with.
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Full path of the backing table.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.config.path()
    }

    /// Create the directory and table if they do not exist yet.
    ///
    /// A new table gets the header row plus, unless disabled in the
    /// configuration, a handful of seed records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidConfig`] for an unusable file name and
    /// [`StoreError::Storage`] when the directory or table cannot be created.
    pub fn ensure_initialized(&self) -> Result<Initialization, StoreError> {
        let dir = self.open_dir(true)?;
        let file_name = self.config.file_name();
        let exists = dir
            .try_exists(file_name)
            .map_err(|error| StoreError::storage(self.path(), &error))?;
        if exists {
            debug!(path = %self.path().display(), "user table already present");
            return Ok(Initialization::Existing);
        }

        let records = if self.config.seed_on_create() {
            seed_records(&self.timestamp()).map_err(|error| StoreError::InvalidConfig {
                message: format!("seed record rejected: {error}"),
            })?
        } else {
            Vec::new()
        };
        self.persist(&dir, &records)?;
        info!(
            path = %self.path().display(),
            seeded = records.len(),
            "created user table"
        );
        Ok(Initialization::Created {
            seeded: records.len(),
        })
    }

    /// Every record, in table order.
    ///
    /// A missing table (or directory) reads as an empty collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the table cannot be read and
    /// [`StoreError::MalformedTable`] if it cannot be decoded.
    pub fn list_all(&self) -> Result<Vec<UserRecord>, StoreError> {
        let records = match self.try_open_dir()? {
            Some(dir) => self.load(&dir)?,
            None => Vec::new(),
        };
        debug!(rows = records.len(), "loaded user table");
        Ok(records)
    }

    /// The record with identifier `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no record matches, or any error
    /// from [`Self::list_all`].
    pub fn get(&self, id: &str) -> Result<UserRecord, StoreError> {
        self.list_all()?
            .into_iter()
            .find(|record| record.id.as_ref() == id)
            .ok_or_else(|| not_found(id))
    }

    /// Validate `fields`, assign an identifier and timestamp, and append the
    /// new record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for the first invalid field,
    /// [`StoreError::Conflict`] when the email is already registered, and
    /// storage errors from reading or rewriting the table. Nothing is written
    /// unless every check passes.
    pub fn insert(&self, fields: &UserFields) -> Result<UserRecord, StoreError> {
        let valid = validate_new_user(fields)?;

        let dir = self.open_dir(true)?;
        let mut records = self.load(&dir)?;
        ensure_email_available(&records, &valid.email, None)?;

        let record = UserRecord {
            id: fresh_id(&records),
            name: valid.name,
            email: valid.email,
            mobile: valid.mobile,
            age: StoredAge::Years(valid.age),
            address: valid.address,
            created_at: self.timestamp(),
        };
        records.push(record.clone());
        self.persist(&dir, &records)?;

        info!(user_id = %record.id, rows = records.len(), "inserted user");
        Ok(record)
    }

    /// Apply the supplied fields to the record with identifier `id`.
    ///
    /// Only supplied fields are validated; values already stored are kept as
    /// they are even if they would fail today's rules. Fields are checked in
    /// the order name, email, mobile, age, address, and the email uniqueness
    /// check runs against every other record when an email is supplied.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown identifier,
    /// [`StoreError::Validation`] or [`StoreError::Conflict`] for rejected
    /// fields, and storage errors from reading or rewriting the table. A
    /// rejected update leaves the table untouched.
    pub fn update(&self, id: &str, fields: &UserFields) -> Result<UserRecord, StoreError> {
        let Some(dir) = self.try_open_dir()? else {
            return Err(not_found(id));
        };
        let mut records = self.load(&dir)?;
        let index = records
            .iter()
            .position(|record| record.id.as_ref() == id)
            .ok_or_else(|| not_found(id))?;

        let current = records.get(index).ok_or_else(|| not_found(id))?;
        let updated = apply_patch(current, fields, &records)?;
        if let Some(slot) = records.get_mut(index) {
            *slot = updated.clone();
        }
        self.persist(&dir, &records)?;

        info!(user_id = %updated.id, "updated user");
        Ok(updated)
    }

    /// Remove the record with identifier `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown identifier and storage
    /// errors from reading or rewriting the table.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let Some(dir) = self.try_open_dir()? else {
            return Err(not_found(id));
        };
        let mut records = self.load(&dir)?;
        let before = records.len();
        records.retain(|record| record.id.as_ref() != id);
        if records.len() == before {
            return Err(not_found(id));
        }
        self.persist(&dir, &records)?;

        info!(user_id = id, rows = records.len(), "deleted user");
        Ok(())
    }

    /// Summary statistics over the current collection.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Self::list_all`].
    pub fn summarize(&self) -> Result<UserStats, StoreError> {
        Ok(summarize(&self.list_all()?))
    }

    fn timestamp(&self) -> String {
        self.clock
            .utc()
            .to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    fn open_dir(&self, create: bool) -> Result<Dir, StoreError> {
        self.config.validate()?;
        let directory = self.config.directory();
        if create {
            Dir::create_ambient_dir_all(directory, ambient_authority())
                .map_err(|error| StoreError::storage(directory, &error))?;
        }
        Dir::open_ambient_dir(directory, ambient_authority())
            .map_err(|error| StoreError::storage(directory, &error))
    }

    fn try_open_dir(&self) -> Result<Option<Dir>, StoreError> {
        match self.open_dir(false) {
            Ok(dir) => Ok(Some(dir)),
            Err(StoreError::Storage { .. }) if !self.config.directory().exists() => Ok(None),
            Err(error) => Err(error),
        }
    }

    fn load(&self, dir: &Dir) -> Result<Vec<UserRecord>, StoreError> {
        match dir.read_to_string(self.config.file_name()) {
            Ok(text) => table::decode(&text),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(error) => Err(StoreError::storage(self.path(), &error)),
        }
    }

    fn persist(&self, dir: &Dir, records: &[UserRecord]) -> Result<(), StoreError> {
        let text = table::encode(records)?;
        write_atomic(
            dir,
            self.config.directory(),
            self.config.file_name(),
            &text,
        )
    }
}

fn not_found(id: &str) -> StoreError {
    StoreError::NotFound { id: id.to_owned() }
}

fn fresh_id(records: &[UserRecord]) -> UserId {
    loop {
        let candidate = UserId::generate();
        if records.iter().all(|record| record.id != candidate) {
            return candidate;
        }
    }
}

fn ensure_email_available(
    records: &[UserRecord],
    email: &str,
    except: Option<&UserId>,
) -> Result<(), StoreError> {
    let key = email_key(email);
    let taken = records
        .iter()
        .filter(|record| Some(&record.id) != except)
        .any(|record| record.email_key() == key);
    if taken {
        return Err(StoreError::Conflict {
            email: email.to_owned(),
        });
    }
    Ok(())
}

/// Build the updated record without touching `records`.
fn apply_patch(
    current: &UserRecord,
    fields: &UserFields,
    records: &[UserRecord],
) -> Result<UserRecord, StoreError> {
    let mut updated = current.clone();
    if let Some(name) = fields.name.as_deref() {
        updated.name = validate_name(name)?;
    }
    if let Some(email) = fields.email.as_deref() {
        let email = validate_email(email)?;
        ensure_email_available(records, &email, Some(&current.id))?;
        updated.email = email;
    }
    if let Some(mobile) = fields.mobile.as_deref() {
        updated.mobile = validate_mobile(mobile)?;
    }
    if let Some(age) = fields.age.as_deref() {
        updated.age = StoredAge::Years(validate_age(age)?);
    }
    if let Some(address) = fields.address.as_deref() {
        updated.address = validate_address(address)?;
    }
    Ok(updated)
}
