//! Registry settings loaded via OrthoConfig.
//!
//! Values merge command-line flags, `USER_REGISTRY_*` environment variables
//! and configuration files. Every field is optional; accessors supply the
//! defaults.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use user_store::{DEFAULT_DIRECTORY, DEFAULT_FILE_NAME, StoreConfig};

const DEFAULT_PORT: u16 = 5000;

/// Configuration values for the registry server.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_REGISTRY")]
pub struct RegistrySettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<SocketAddr>,
    /// Directory holding the user table.
    pub data_dir: Option<PathBuf>,
    /// File name of the user table inside `data_dir`.
    pub users_file: Option<String>,
    /// Write demonstration users when the table is first created.
    pub seed_on_create: Option<bool>,
}

impl RegistrySettings {
    /// Return the bind address, falling back to `127.0.0.1:5000`.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)))
    }

    /// Return the data directory, falling back to `database`.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIRECTORY))
    }

    /// Return the table file name, falling back to `users.csv`.
    #[must_use]
    pub fn users_file(&self) -> &str {
        self.users_file.as_deref().unwrap_or(DEFAULT_FILE_NAME)
    }

    /// Whether a freshly created table receives the demonstration users.
    #[must_use]
    pub fn seed_on_create(&self) -> bool {
        self.seed_on_create.unwrap_or(true)
    }

    /// Store configuration derived from these settings.
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        let config = StoreConfig::new(self.data_dir(), self.users_file());
        if self.seed_on_create() {
            config
        } else {
            config.without_seed_records()
        }
    }
}
