//! User GraphQL type

use async_graphql::{Object, SimpleObject, ID};
use chrono::{DateTime, Utc};

use crate::models::User as DbUser;

/// User account exposed via GraphQL
pub struct User {
    inner: DbUser,
}

impl User {
    pub fn new(user: DbUser) -> Self {
        Self { inner: user }
    }
}

impl From<DbUser> for User {
    fn from(user: DbUser) -> Self {
        Self::new(user)
    }
}

#[Object]
impl User {
    /// Unique user identifier
    async fn id(&self) -> ID {
        ID(self.inner.id.to_hex())
    }

    /// Email reported by the identity provider
    async fn email(&self) -> &str {
        &self.inner.email
    }

    /// Display name
    async fn name(&self) -> &str {
        &self.inner.name
    }

    /// Account creation timestamp
    async fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }
}

/// Result of a successful login
#[derive(SimpleObject)]
pub struct AuthPayload {
    /// Bearer token to send in the Authorization header
    pub token: String,
    /// The logged-in user (created lazily on first login)
    pub user: User,
}
