//! User DataLoader for batched fetching

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::dataloader::Loader;
use bson::oid::ObjectId;

use crate::error::ApiError;
use crate::models::User;
use crate::repositories::UserRepository;

/// DataLoader batching user point-lookups by id
#[derive(Clone)]
pub struct UserLoader {
    users: Arc<dyn UserRepository>,
}

impl UserLoader {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

impl Loader<ObjectId> for UserLoader {
    type Value = User;
    type Error = Arc<ApiError>;

    async fn load(&self, keys: &[ObjectId]) -> Result<HashMap<ObjectId, Self::Value>, Self::Error> {
        // Guard against empty keys to avoid an unnecessary storage call
        if keys.is_empty() {
            return Ok(HashMap::new());
        }

        let users = self.users.find_by_ids(keys).await.map_err(Arc::new)?;
        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }
}
