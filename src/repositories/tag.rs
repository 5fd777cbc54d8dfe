//! Tag repository

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Bson, Regex};
use futures_util::TryStreamExt;
use mongodb::options::FindOptions;
use mongodb::{Collection, Database};

use super::escape_regex;
use crate::error::ApiResult;
use crate::models::Tag;

/// Storage operations for tag documents
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Batch point-lookup by id; missing ids are simply absent from the result
    async fn find_by_ids(&self, ids: &[ObjectId]) -> ApiResult<Vec<Tag>>;

    /// Find a tag by its deduplication key
    async fn find_by_lowercase_name(&self, lowercase_name: &str) -> ApiResult<Option<Tag>>;

    /// Case-insensitive prefix search over tag names
    async fn search_prefix(&self, prefix: &str, limit: i64) -> ApiResult<Vec<Tag>>;

    /// Insert a new tag document
    async fn insert(&self, tag: &Tag) -> ApiResult<()>;
}

/// MongoDB implementation of [`TagRepository`]
#[derive(Clone)]
pub struct MongoTagRepository {
    collection: Collection<Tag>,
}

impl MongoTagRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("tags"),
        }
    }
}

#[async_trait]
impl TagRepository for MongoTagRepository {
    async fn find_by_ids(&self, ids: &[ObjectId]) -> ApiResult<Vec<Tag>> {
        let cursor = self
            .collection
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_lowercase_name(&self, lowercase_name: &str) -> ApiResult<Option<Tag>> {
        Ok(self
            .collection
            .find_one(doc! { "lowercaseName": lowercase_name })
            .await?)
    }

    async fn search_prefix(&self, prefix: &str, limit: i64) -> ApiResult<Vec<Tag>> {
        // Prefix search against the lowercased name so the index (and not a
        // case-insensitive scan) can serve it.
        let pattern = Regex {
            pattern: format!("^{}", escape_regex(&prefix.to_lowercase())),
            options: String::new(),
        };

        let options = FindOptions::builder().limit(limit).build();
        let cursor = self
            .collection
            .find(doc! { "lowercaseName": Bson::RegularExpression(pattern) })
            .with_options(options)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, tag: &Tag) -> ApiResult<()> {
        self.collection.insert_one(tag).await?;
        Ok(())
    }
}
