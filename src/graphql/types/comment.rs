//! Comment GraphQL type

use async_graphql::{Context, ErrorExtensions, Object, Result, ID};
use chrono::{DateTime, Utc};

use crate::error::ApiError;
use crate::graphql::loaders::UserDataLoader;
use crate::models::Comment as DbComment;

use super::user::User;

/// Comment embedded in a link, exposed via GraphQL
pub struct Comment {
    inner: DbComment,
}

impl Comment {
    pub fn new(comment: DbComment) -> Self {
        Self { inner: comment }
    }
}

impl From<DbComment> for Comment {
    fn from(comment: DbComment) -> Self {
        Self::new(comment)
    }
}

#[Object]
impl Comment {
    /// Unique comment identifier
    async fn id(&self) -> ID {
        ID(self.inner.id.to_hex())
    }

    /// Comment text
    async fn text(&self) -> &str {
        &self.inner.text
    }

    /// Comment creation timestamp
    async fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    /// The comment's author, fetched through the user loader
    async fn user(&self, ctx: &Context<'_>) -> Result<User> {
        let loader = ctx.data::<UserDataLoader>()?;
        let user = loader
            .load_one(self.inner.user)
            .await
            .map_err(|e| e.extend())?
            .ok_or_else(|| {
                ApiError::NotFound {
                    resource_type: "user",
                    id: self.inner.user.to_hex(),
                }
                .extend()
            })?;
        Ok(User::from(user))
    }
}
