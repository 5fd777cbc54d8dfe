//! Link repository

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Document};
use futures_util::TryStreamExt;
use mongodb::options::FindOptions;
use mongodb::{Collection, Database};

use crate::error::ApiResult;
use crate::models::{Comment, Link, LinkSearchCriteria};

/// Storage operations for link documents
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Find a link by its id
    async fn find_by_id(&self, id: ObjectId) -> ApiResult<Option<Link>>;

    /// Find a link by its URL (URLs are unique)
    async fn find_by_url(&self, url: &str) -> ApiResult<Option<Link>>;

    /// Search links by owner/tags with ordering and pagination.
    ///
    /// The criteria are assumed validated: the limit is already capped and
    /// order fields already allow-listed by the caller.
    async fn search(&self, criteria: &LinkSearchCriteria) -> ApiResult<Vec<Link>>;

    /// Insert a new link document
    async fn insert(&self, link: &Link) -> ApiResult<()>;

    /// Overwrite a link's url and tags
    async fn update_fields(&self, id: ObjectId, url: &str, tags: &[ObjectId]) -> ApiResult<()>;

    /// Append an embedded comment
    async fn push_comment(&self, link_id: ObjectId, comment: &Comment) -> ApiResult<()>;

    /// Remove an embedded comment; returns whether a comment was removed
    async fn pull_comment(&self, link_id: ObjectId, comment_id: ObjectId) -> ApiResult<bool>;

    /// Record a vote. Uses a set update, so re-adding an existing vote is a
    /// no-op at the storage level; the resolver rejects duplicates first.
    async fn add_vote(&self, link_id: ObjectId, user_id: ObjectId) -> ApiResult<()>;

    /// Delete a link; returns whether a document was deleted
    async fn delete(&self, id: ObjectId) -> ApiResult<bool>;
}

/// MongoDB implementation of [`LinkRepository`]
#[derive(Clone)]
pub struct MongoLinkRepository {
    collection: Collection<Link>,
}

impl MongoLinkRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("links"),
        }
    }
}

fn search_filter(criteria: &LinkSearchCriteria) -> Document {
    let mut filter = Document::new();
    if let Some(owner) = criteria.owner {
        filter.insert("owner", owner);
    }
    if !criteria.tags.is_empty() {
        filter.insert("tags", doc! { "$in": criteria.tags.clone() });
    }
    filter
}

fn search_sort(criteria: &LinkSearchCriteria) -> Document {
    let mut sort = Document::new();
    for (field, descending) in &criteria.order {
        sort.insert(field.as_str(), if *descending { -1 } else { 1 });
    }
    sort
}

#[async_trait]
impl LinkRepository for MongoLinkRepository {
    async fn find_by_id(&self, id: ObjectId) -> ApiResult<Option<Link>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_url(&self, url: &str) -> ApiResult<Option<Link>> {
        Ok(self.collection.find_one(doc! { "url": url }).await?)
    }

    async fn search(&self, criteria: &LinkSearchCriteria) -> ApiResult<Vec<Link>> {
        let options = FindOptions::builder()
            .sort(search_sort(criteria))
            .skip(criteria.skip)
            .limit(criteria.limit)
            .build();

        let cursor = self
            .collection
            .find(search_filter(criteria))
            .with_options(options)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, link: &Link) -> ApiResult<()> {
        self.collection.insert_one(link).await?;
        Ok(())
    }

    async fn update_fields(&self, id: ObjectId, url: &str, tags: &[ObjectId]) -> ApiResult<()> {
        self.collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "url": url, "tags": tags.to_vec() } },
            )
            .await?;
        Ok(())
    }

    async fn push_comment(&self, link_id: ObjectId, comment: &Comment) -> ApiResult<()> {
        self.collection
            .update_one(
                doc! { "_id": link_id },
                doc! { "$push": { "comments": bson::to_bson(comment)? } },
            )
            .await?;
        Ok(())
    }

    async fn pull_comment(&self, link_id: ObjectId, comment_id: ObjectId) -> ApiResult<bool> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": link_id },
                doc! { "$pull": { "comments": { "id": comment_id } } },
            )
            .await?;
        Ok(result.modified_count > 0)
    }

    async fn add_vote(&self, link_id: ObjectId, user_id: ObjectId) -> ApiResult<()> {
        self.collection
            .update_one(
                doc! { "_id": link_id },
                doc! { "$addToSet": { "votes": user_id } },
            )
            .await?;
        Ok(())
    }

    async fn delete(&self, id: ObjectId) -> ApiResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
