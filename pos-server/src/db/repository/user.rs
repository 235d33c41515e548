//! User Repository

use serde_json::json;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::DbService;
use shared::models::User;
use shared::util::now;

pub const TABLE: &str = "user";
const ID_FIELD: &str = "user_id";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: &DbService) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find one page of users, plus the collection size
    pub async fn find_page(&self, start: u64, limit: u64) -> RepoResult<(u64, Vec<User>)> {
        let total = self.base.count(TABLE).await?;
        let items = self.base.page(TABLE, start, limit).await?;
        Ok((total, items))
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        self.base.find_one(TABLE, ID_FIELD, id).await
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.base.find_one(TABLE, "email", email).await
    }

    /// Insert a new user; email and phone must be unused
    pub async fn create(&self, user: User) -> RepoResult<User> {
        if self.base.exists(TABLE, "email", &user.email).await? {
            return Err(RepoError::Duplicate("this email already exists".to_string()));
        }
        if self.base.exists(TABLE, "phone", &user.phone).await? {
            return Err(RepoError::Duplicate(
                "this phone number already exists".to_string(),
            ));
        }
        self.base.insert(TABLE, user).await
    }

    /// Store freshly issued tokens on the user
    pub async fn update_tokens(
        &self,
        id: &str,
        token: &str,
        refresh_token: &str,
    ) -> RepoResult<User> {
        let patch = json!({
            "token": token,
            "refresh_token": refresh_token,
            "updated_at": now(),
        });
        self.base
            .merge(TABLE, ID_FIELD, id, patch)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
    }
}
