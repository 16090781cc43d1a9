//! [`UserDirectory`] adapter over the flat CSV user table.
//!
//! The store is synchronous and rewrites the whole table on every change, so
//! calls run on Tokio's blocking pool behind one mutex per table. The mutex
//! makes each read-modify-rewrite cycle exclusive for this process.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tracing::error;
use user_store::{StoreError, UserFields, UserRecord, UserStats, UserStore};

use super::store_error_mapping::map_store_error;
use crate::domain::ports::UserDirectory;
use crate::domain::{Error, TraceId};

/// User directory backed by a [`UserStore`].
///
/// # Examples
/// ```no_run
/// use user_registry::outbound::persistence::CsvUserDirectory;
/// use user_store::{StoreConfig, UserStore};
///
/// let directory = CsvUserDirectory::new(UserStore::new(StoreConfig::default()));
/// ```
#[derive(Debug, Clone)]
pub struct CsvUserDirectory {
    store: Arc<Mutex<UserStore>>,
}

impl CsvUserDirectory {
    /// Wrap `store`; the table should already be initialised.
    #[must_use]
    pub fn new(store: UserStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    async fn run<T, F>(&self, operation: F) -> Result<T, Error>
    where
        T: Send + 'static,
        F: FnOnce(&UserStore) -> Result<T, StoreError> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let trace_id = TraceId::current();
        let joined = tokio::task::spawn_blocking(move || {
            TraceId::sync_scope(trace_id, || {
                // The store holds no in-memory state, so a poisoned lock is
                // still safe to use.
                let guard = store.lock().unwrap_or_else(PoisonError::into_inner);
                operation(&guard).map_err(map_store_error)
            })
        })
        .await;

        joined.unwrap_or_else(|join_error| {
            error!(error = %join_error, "user store task failed");
            Err(Error::internal("user store task failed"))
        })
    }
}

#[async_trait]
impl UserDirectory for CsvUserDirectory {
    async fn list_users(&self) -> Result<Vec<UserRecord>, Error> {
        self.run(UserStore::list_all).await
    }

    async fn get_user(&self, id: &str) -> Result<UserRecord, Error> {
        let id = id.to_owned();
        self.run(move |store| store.get(&id)).await
    }

    async fn create_user(&self, fields: UserFields) -> Result<UserRecord, Error> {
        self.run(move |store| store.insert(&fields)).await
    }

    async fn update_user(&self, id: &str, fields: UserFields) -> Result<UserRecord, Error> {
        let id = id.to_owned();
        self.run(move |store| store.update(&id, &fields)).await
    }

    async fn delete_user(&self, id: &str) -> Result<(), Error> {
        let id = id.to_owned();
        self.run(move |store| store.delete(&id)).await
    }

    async fn user_stats(&self) -> Result<UserStats, Error> {
        self.run(UserStore::summarize).await
    }
}

#[cfg(test)]
mod tests {
    //! Adapter tests against a real table in a temporary directory.

    use rstest::{fixture, rstest};
    use tempfile::TempDir;
    use user_store::StoreConfig;

    use super::*;
    use crate::domain::ErrorCode;

    struct Fixture {
        _dir: TempDir,
        directory: CsvUserDirectory,
    }

    #[fixture]
    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = UserStore::new(StoreConfig::new(dir.path(), "users.csv").without_seed_records());
        store.ensure_initialized().expect("initialise store");
        Fixture {
            _dir: dir,
            directory: CsvUserDirectory::new(store),
        }
    }

    fn ann() -> UserFields {
        UserFields::default()
            .with_name("Ann Lee")
            .with_email("Ann@X.com")
            .with_mobile("555-123-4567")
            .with_age("40")
            .with_address("10 Oak Street")
    }

    #[rstest]
    #[tokio::test]
    async fn create_then_get_returns_the_same_record(fixture: Fixture) {
        let created = fixture.directory.create_user(ann()).await.expect("create");

        let fetched = fixture
            .directory
            .get_user(created.id.as_ref())
            .await
            .expect("get");

        assert_eq!(fetched, created);
        assert_eq!(fixture.directory.list_users().await.expect("list").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_maps_to_conflict(fixture: Fixture) {
        fixture.directory.create_user(ann()).await.expect("create");

        let err = fixture
            .directory
            .create_user(ann().with_email("ann@x.com"))
            .await
            .expect_err("conflict");

        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn errors_carry_the_callers_trace_id(fixture: Fixture) {
        let trace_id = TraceId::generate();

        let err = TraceId::scope(trace_id, fixture.directory.delete_user("missing"))
            .await
            .expect_err("not found");

        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.trace_id(), Some(trace_id.to_string().as_str()));
    }

    #[rstest]
    #[tokio::test]
    async fn concurrent_inserts_all_land(fixture: Fixture) {
        let inserts = (0..8).map(|n| {
            let directory = fixture.directory.clone();
            tokio::spawn(async move {
                directory
                    .create_user(ann().with_email(format!("user{n}@example.com")))
                    .await
            })
        });
        for handle in inserts.collect::<Vec<_>>() {
            handle.await.expect("task joins").expect("insert");
        }

        let stats = fixture.directory.user_stats().await.expect("stats");

        assert_eq!(stats.total_users, 8);
    }
}
