//! Tag GraphQL type

use async_graphql::{Object, ID};
use chrono::{DateTime, Utc};

use crate::models::Tag as DbTag;

/// Tag exposed via GraphQL
pub struct Tag {
    inner: DbTag,
}

impl Tag {
    pub fn new(tag: DbTag) -> Self {
        Self { inner: tag }
    }
}

impl From<DbTag> for Tag {
    fn from(tag: DbTag) -> Self {
        Self::new(tag)
    }
}

#[Object]
impl Tag {
    /// Unique tag identifier
    async fn id(&self) -> ID {
        ID(self.inner.id.to_hex())
    }

    /// Display name, with the casing of the first reference
    async fn name(&self) -> &str {
        &self.inner.name
    }

    /// Tag creation timestamp
    async fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }
}
