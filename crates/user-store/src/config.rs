//! Store location and bootstrap settings.

use std::path::{Path, PathBuf};

use camino::{Utf8Component, Utf8Path};

use crate::error::StoreError;

/// Default directory holding the users table.
pub const DEFAULT_DIRECTORY: &str = "database";
/// Default users table file name.
pub const DEFAULT_FILE_NAME: &str = "users.csv";

/// Where the users table lives and how it is first created.
///
/// # Examples
/// ```
/// use user_store::StoreConfig;
///
/// let config = StoreConfig::new("/var/lib/users", "people.csv").without_seed_records();
/// assert_eq!(config.path(), std::path::Path::new("/var/lib/users/people.csv"));
/// assert!(!config.seed_on_create());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    directory: PathBuf,
    file_name: String,
    seed_on_create: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DIRECTORY, DEFAULT_FILE_NAME)
    }
}

impl StoreConfig {
    /// Configure a table named `file_name` inside `directory`.
    ///
    /// Seed records are written when the table is first created.
    pub fn new(directory: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.into(),
            seed_on_create: true,
        }
    }

    /// Create the table with only a header row.
    #[must_use]
    pub fn without_seed_records(mut self) -> Self {
        self.seed_on_create = false;
        self
    }

    /// Directory holding the table.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Table file name within [`Self::directory`].
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Whether [`crate::UserStore::ensure_initialized`] writes seed records.
    #[must_use]
    pub const fn seed_on_create(&self) -> bool {
        self.seed_on_create
    }

    /// Full path of the table.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    /// Check that the file name is a single plain path component.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidConfig`] for empty names, names with
    /// separators, or `.`/`..`.
    pub fn validate(&self) -> Result<(), StoreError> {
        let mut components = Utf8Path::new(&self.file_name).components();
        match (components.next(), components.next()) {
            (Some(Utf8Component::Normal(name)), None) if name == self.file_name => Ok(()),
            _ => Err(StoreError::InvalidConfig {
                message: format!(
                    "table file name '{}' must be a single file name",
                    self.file_name
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn defaults_match_the_conventional_location() {
        let config = StoreConfig::default();
        assert_eq!(config.path(), PathBuf::from("database").join("users.csv"));
        assert!(config.seed_on_create());
        assert!(config.validate().is_ok());
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("..")]
    #[case("nested/users.csv")]
    #[case("/users.csv")]
    #[case("users.csv/")]
    fn rejects_file_names_that_are_not_plain(#[case] file_name: &str) {
        let config = StoreConfig::new("data", file_name);
        assert!(matches!(
            config.validate(),
            Err(StoreError::InvalidConfig { .. })
        ));
    }
}
