//! Database Module
//!
//! Opens the embedded SurrealDB (RocksDB) store and hands out repositories.

pub mod repository;

use std::path::Path;
use std::time::Duration;

use shared::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};
use tokio::time::Instant;

/// Database service - owns the store handle and the request window
///
/// The shared instance in `ServerState` has no deadline. Handlers get a
/// request-scoped copy through [`DbService::for_request`] (see the
/// [`RequestDb`](crate::utils::RequestDb) extractor); every store call made
/// with that copy shares one deadline.
#[derive(Clone, Debug)]
pub struct DbService {
    pub db: Surreal<Db>,
    pub timeout: Duration,
    deadline: Option<Instant>,
}

impl DbService {
    /// Open (or create) the store at `path` and select namespace/database
    pub async fn open(
        path: impl AsRef<Path>,
        namespace: &str,
        database: &str,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let path = path.as_ref();
        let db: Surreal<Db> = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(namespace)
            .use_db(database)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!(
            path = %path.display(),
            namespace,
            database,
            "Database connection established (SurrealDB RocksDB)"
        );

        Ok(Self {
            db,
            timeout,
            deadline: None,
        })
    }

    /// Wrap an existing handle
    pub fn from_handle(db: Surreal<Db>, timeout: Duration) -> Self {
        Self {
            db,
            timeout,
            deadline: None,
        }
    }

    /// Copy whose store calls all end at `now + timeout`
    pub fn for_request(&self) -> Self {
        Self {
            db: self.db.clone(),
            timeout: self.timeout,
            deadline: Some(Instant::now() + self.timeout),
        }
    }

    /// End of the request window; unscoped handles start one now
    pub fn deadline(&self) -> Instant {
        self.deadline
            .unwrap_or_else(|| Instant::now() + self.timeout)
    }
}
