//! Tag DataLoader for batched fetching

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::dataloader::Loader;
use bson::oid::ObjectId;

use crate::error::ApiError;
use crate::models::Tag;
use crate::repositories::TagRepository;

/// DataLoader batching tag point-lookups by id
#[derive(Clone)]
pub struct TagLoader {
    tags: Arc<dyn TagRepository>,
}

impl TagLoader {
    pub fn new(tags: Arc<dyn TagRepository>) -> Self {
        Self { tags }
    }
}

impl Loader<ObjectId> for TagLoader {
    type Value = Tag;
    type Error = Arc<ApiError>;

    async fn load(&self, keys: &[ObjectId]) -> Result<HashMap<ObjectId, Self::Value>, Self::Error> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }

        let tags = self.tags.find_by_ids(keys).await.map_err(Arc::new)?;
        Ok(tags.into_iter().map(|t| (t.id, t)).collect())
    }
}
