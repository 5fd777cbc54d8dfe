//! Request-scoped DataLoaders for GraphQL
//!
//! Field resolvers for link relationships (owner, voters, comment authors,
//! tags) would otherwise issue one point-lookup per entity. These loaders
//! batch all ids requested within a batching window into a single
//! `find_by_ids` call, de-duplicate concurrent requests for the same id, and
//! cache resolved values for the remainder of the request.
//!
//! A fresh `DataLoader` pair is created per inbound request (see
//! [`attach_request_loaders`]); nothing is shared or evicted across requests.

mod tag;
mod user;

use std::sync::Arc;

use async_graphql::dataloader::{DataLoader, HashMapCache};
use async_graphql::Request;

use crate::repositories::{TagRepository, UserRepository};

pub use tag::TagLoader;
pub use user::UserLoader;

/// Request-scoped user loader with per-request caching
pub type UserDataLoader = DataLoader<UserLoader, HashMapCache>;

/// Request-scoped tag loader with per-request caching
pub type TagDataLoader = DataLoader<TagLoader, HashMapCache>;

/// Attach fresh loader instances to a GraphQL request.
///
/// Called once per inbound request; the loaders (and their caches) are
/// dropped with the request data when execution finishes.
pub fn attach_request_loaders(
    request: Request,
    users: Arc<dyn UserRepository>,
    tags: Arc<dyn TagRepository>,
) -> Request {
    request
        .data(DataLoader::with_cache(
            UserLoader::new(users),
            tokio::spawn,
            HashMapCache::default(),
        ))
        .data(DataLoader::with_cache(
            TagLoader::new(tags),
            tokio::spawn,
            HashMapCache::default(),
        ))
}
