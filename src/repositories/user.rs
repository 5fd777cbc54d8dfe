//! User repository

use async_trait::async_trait;
use bson::doc;
use bson::oid::ObjectId;
use futures_util::TryStreamExt;
use mongodb::{Collection, Database};

use crate::error::ApiResult;
use crate::models::User;

/// Storage operations for user documents
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id
    async fn find_by_id(&self, id: ObjectId) -> ApiResult<Option<User>>;

    /// Batch point-lookup by id; missing ids are simply absent from the result
    async fn find_by_ids(&self, ids: &[ObjectId]) -> ApiResult<Vec<User>>;

    /// Find a user by email (unique)
    async fn find_by_email(&self, email: &str) -> ApiResult<Option<User>>;

    /// Insert a new user document
    async fn insert(&self, user: &User) -> ApiResult<()>;
}

/// MongoDB implementation of [`UserRepository`]
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("users"),
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_id(&self, id: ObjectId) -> ApiResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> ApiResult<Vec<User>> {
        let cursor = self
            .collection
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    async fn insert(&self, user: &User) -> ApiResult<()> {
        self.collection.insert_one(user).await?;
        Ok(())
    }
}
