//! Menu Repository

use super::{BaseRepository, RepoError, RepoResult, patch_with_timestamp, required};
use crate::db::DbService;
use shared::models::{Menu, MenuCreate, MenuUpdate, is_valid_span};
use shared::util::{new_id, now};

pub const TABLE: &str = "menu";
pub const ID_FIELD: &str = "menu_id";

#[derive(Clone)]
pub struct MenuRepository {
    base: BaseRepository,
}

impl MenuRepository {
    pub fn new(db: &DbService) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all menus
    pub async fn find_all(&self) -> RepoResult<Vec<Menu>> {
        self.base.find_all(TABLE).await
    }

    /// Find menu by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Menu>> {
        self.base.find_one(TABLE, ID_FIELD, id).await
    }

    /// Create a new menu
    pub async fn create(&self, data: MenuCreate) -> RepoResult<Menu> {
        let start_date = required(data.start_date, "start_date")?;
        let end_date = required(data.end_date, "end_date")?;
        if !is_valid_span(start_date, end_date) {
            return Err(RepoError::Validation(
                "end_date must be after start_date".to_string(),
            ));
        }

        let now = now();
        let menu = Menu {
            menu_id: new_id(),
            name: required(data.name, "name")?,
            category: required(data.category, "category")?,
            start_date,
            end_date,
            created_at: now,
            updated_at: now,
        };

        self.base.insert(TABLE, menu).await
    }

    /// Update a menu
    ///
    /// When only one end of the window changes it is checked against the
    /// stored other end.
    pub async fn update(&self, id: &str, data: MenuUpdate) -> RepoResult<Menu> {
        if data.start_date.is_some() || data.end_date.is_some() {
            let existing = self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Menu {id} not found")))?;
            let start = data.start_date.unwrap_or(existing.start_date);
            let end = data.end_date.unwrap_or(existing.end_date);
            if !is_valid_span(start, end) {
                return Err(RepoError::Validation(
                    "end_date must be after start_date".to_string(),
                ));
            }
        }

        let patch = patch_with_timestamp(&data)?;
        self.base
            .merge(TABLE, ID_FIELD, id, patch)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu {id} not found")))
    }
}
