//! Dining Table Repository

use super::{BaseRepository, RepoError, RepoResult, patch_with_timestamp, required};
use crate::db::DbService;
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use shared::util::{new_id, now};

pub const TABLE: &str = "dining_table";
pub const ID_FIELD: &str = "table_id";

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: &DbService) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all dining tables
    pub async fn find_all(&self) -> RepoResult<Vec<DiningTable>> {
        self.base.find_all(TABLE).await
    }

    /// Find table by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DiningTable>> {
        self.base.find_one(TABLE, ID_FIELD, id).await
    }

    /// Find every table whose id is in `ids`
    pub async fn find_by_ids(&self, ids: &[String]) -> RepoResult<Vec<DiningTable>> {
        self.base.find_in(TABLE, ID_FIELD, ids).await
    }

    /// Does a table with this id exist
    pub async fn exists(&self, id: &str) -> RepoResult<bool> {
        self.base.exists(TABLE, ID_FIELD, id).await
    }

    /// Create a new dining table
    pub async fn create(&self, data: DiningTableCreate) -> RepoResult<DiningTable> {
        let now = now();
        let table = DiningTable {
            table_id: new_id(),
            table_number: required(data.table_number, "table_number")?,
            number_of_guests: required(data.number_of_guests, "number_of_guests")?,
            created_at: now,
            updated_at: now,
        };

        self.base.insert(TABLE, table).await
    }

    /// Update a dining table
    pub async fn update(&self, id: &str, data: DiningTableUpdate) -> RepoResult<DiningTable> {
        let patch = patch_with_timestamp(&data)?;
        self.base
            .merge(TABLE, ID_FIELD, id, patch)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))
    }
}
