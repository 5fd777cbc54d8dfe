//! Tag queries

use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::graphql::guards::AuthGuard;
use crate::graphql::pagination::MAX_TAG_RESULTS;
use crate::graphql::types::Tag;
use crate::repositories::TagRepository;

/// Tag search queries
#[derive(Default)]
pub struct TagQuery;

#[Object]
impl TagQuery {
    /// Search tags by case-insensitive name prefix, returning at most 10
    #[graphql(guard = "AuthGuard")]
    async fn search_tags(&self, ctx: &Context<'_>, filter: String) -> Result<Vec<Tag>> {
        let repo = ctx.data::<Arc<dyn TagRepository>>()?;
        let tags = repo
            .search_prefix(&filter, MAX_TAG_RESULTS)
            .await
            .map_err(|e| e.extend())?;
        Ok(tags.into_iter().map(Tag::from).collect())
    }
}
