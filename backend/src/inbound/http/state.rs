//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::ports::UserDirectory;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User registry use-cases.
    pub users: Arc<dyn UserDirectory>,
    /// Clock used for response timestamps.
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Construct state around `users` using the system clock.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use user_registry::inbound::http::state::HttpState;
    /// use user_registry::outbound::persistence::CsvUserDirectory;
    /// use user_store::{StoreConfig, UserStore};
    ///
    /// let users = CsvUserDirectory::new(UserStore::new(StoreConfig::default()));
    /// let _state = HttpState::new(Arc::new(users));
    /// ```
    #[must_use]
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self::with_clock(users, Arc::new(DefaultClock))
    }

    /// Construct state with an explicit clock.
    #[must_use]
    pub fn with_clock(users: Arc<dyn UserDirectory>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}
