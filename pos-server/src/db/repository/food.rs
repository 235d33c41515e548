//! Food Repository

use super::{BaseRepository, RepoError, RepoResult, menu, patch_with_timestamp, required};
use crate::db::DbService;
use shared::models::{Food, FoodCreate, FoodUpdate};
use shared::money::round_price;
use shared::util::{new_id, now};

pub const TABLE: &str = "food";
const ID_FIELD: &str = "food_id";

#[derive(Clone)]
pub struct FoodRepository {
    base: BaseRepository,
}

impl FoodRepository {
    pub fn new(db: &DbService) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all foods
    pub async fn find_all(&self) -> RepoResult<Vec<Food>> {
        self.base.find_all(TABLE).await
    }

    /// Find one page of foods, plus the collection size
    pub async fn find_page(&self, start: u64, limit: u64) -> RepoResult<(u64, Vec<Food>)> {
        let total = self.base.count(TABLE).await?;
        let items = self.base.page(TABLE, start, limit).await?;
        Ok((total, items))
    }

    /// Find food by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Food>> {
        self.base.find_one(TABLE, ID_FIELD, id).await
    }

    /// Find every food whose id is in `ids`
    pub async fn find_by_ids(&self, ids: &[String]) -> RepoResult<Vec<Food>> {
        self.base.find_in(TABLE, ID_FIELD, ids).await
    }

    /// Create a new food; the referenced menu must exist
    pub async fn create(&self, data: FoodCreate) -> RepoResult<Food> {
        let menu_id = required(data.menu_id, "menu_id")?;
        self.ensure_menu(&menu_id).await?;

        let now = now();
        let food = Food {
            food_id: new_id(),
            name: required(data.name, "name")?,
            price: round_price(required(data.price, "price")?),
            food_image: required(data.food_image, "food_image")?,
            menu_id,
            created_at: now,
            updated_at: now,
        };

        self.base.insert(TABLE, food).await
    }

    /// Update a food; a changed menu reference must exist
    pub async fn update(&self, id: &str, mut data: FoodUpdate) -> RepoResult<Food> {
        if let Some(menu_id) = &data.menu_id {
            self.ensure_menu(menu_id).await?;
        }
        data.price = data.price.map(round_price);

        let patch = patch_with_timestamp(&data)?;
        self.base
            .merge(TABLE, ID_FIELD, id, patch)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Food {id} not found")))
    }

    async fn ensure_menu(&self, menu_id: &str) -> RepoResult<()> {
        if self.base.exists(menu::TABLE, menu::ID_FIELD, menu_id).await? {
            Ok(())
        } else {
            Err(RepoError::NotFound(format!("Menu {menu_id} not found")))
        }
    }
}
