//! Link GraphQL type
//!
//! Relationship fields (owner, votes, tags, comment authors) resolve through
//! the request-scoped loaders so a page of links costs one user batch and one
//! tag batch instead of a lookup per entity.

use async_graphql::{Context, ErrorExtensions, Object, Result, ID};
use chrono::{DateTime, Utc};

use crate::error::ApiError;
use crate::graphql::loaders::{TagDataLoader, UserDataLoader};
use crate::models::Link as DbLink;

use super::comment::Comment;
use super::tag::Tag;
use super::user::User;

/// Shared bookmark exposed via GraphQL
pub struct Link {
    inner: DbLink,
}

impl Link {
    pub fn new(link: DbLink) -> Self {
        Self { inner: link }
    }
}

impl From<DbLink> for Link {
    fn from(link: DbLink) -> Self {
        Self::new(link)
    }
}

#[Object]
impl Link {
    /// Unique link identifier
    async fn id(&self) -> ID {
        ID(self.inner.id.to_hex())
    }

    /// Target URL
    async fn url(&self) -> &str {
        &self.inner.url
    }

    /// Page title scraped at creation time, if any
    async fn title(&self) -> Option<&str> {
        self.inner.title.as_deref()
    }

    /// Page description scraped at creation time, if any
    async fn description(&self) -> Option<&str> {
        self.inner.description.as_deref()
    }

    /// Preview image URL scraped at creation time, if any
    async fn image_url(&self) -> Option<&str> {
        self.inner.image_url.as_deref()
    }

    /// Link creation timestamp
    async fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    /// The user who submitted this link
    async fn owner(&self, ctx: &Context<'_>) -> Result<User> {
        let loader = ctx.data::<UserDataLoader>()?;
        let owner = loader
            .load_one(self.inner.owner)
            .await
            .map_err(|e| e.extend())?
            .ok_or_else(|| {
                ApiError::NotFound {
                    resource_type: "user",
                    id: self.inner.owner.to_hex(),
                }
                .extend()
            })?;
        Ok(User::from(owner))
    }

    /// Users who voted for this link.
    ///
    /// Voters whose accounts no longer exist are omitted.
    async fn votes(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let loader = ctx.data::<UserDataLoader>()?;
        let mut users = loader
            .load_many(self.inner.votes.iter().copied())
            .await
            .map_err(|e| e.extend())?;

        Ok(self
            .inner
            .votes
            .iter()
            .filter_map(|id| users.remove(id))
            .map(User::from)
            .collect())
    }

    /// Comments on this link
    async fn comments(&self) -> Vec<Comment> {
        self.inner
            .comments
            .iter()
            .cloned()
            .map(Comment::from)
            .collect()
    }

    /// Tags attached to this link
    async fn tags(&self, ctx: &Context<'_>) -> Result<Vec<Tag>> {
        let loader = ctx.data::<TagDataLoader>()?;
        let mut tags = loader
            .load_many(self.inner.tags.iter().copied())
            .await
            .map_err(|e| e.extend())?;

        Ok(self
            .inner
            .tags
            .iter()
            .filter_map(|id| tags.remove(id))
            .map(Tag::from)
            .collect())
    }
}
