//! Lazy tag resolution
//!
//! Tag names referenced by `createLink`/`editLink` are resolved to tag ids,
//! creating missing tags on first reference. Deduplication is by lowercased
//! name, so "Rust" and "rust" resolve to the same tag.

use std::sync::Arc;

use bson::oid::ObjectId;

use crate::error::ApiResult;
use crate::models::Tag;
use crate::repositories::TagRepository;

/// Resolves tag names to ids, creating tags lazily
#[derive(Clone)]
pub struct TagService {
    tags: Arc<dyn TagRepository>,
}

impl TagService {
    pub fn new(tags: Arc<dyn TagRepository>) -> Self {
        Self { tags }
    }

    /// Resolve the given names to tag ids, in input order.
    ///
    /// Names are matched case-insensitively; a name with no existing tag gets
    /// one created, preserving the caller's casing in the display name.
    pub async fn resolve_names(&self, names: &[String]) -> ApiResult<Vec<ObjectId>> {
        let mut ids = Vec::with_capacity(names.len());

        for name in names {
            let lowercase = name.to_lowercase();
            let id = match self.tags.find_by_lowercase_name(&lowercase).await? {
                Some(tag) => tag.id,
                None => {
                    let tag = Tag::new(name.clone());
                    self.tags.insert(&tag).await?;
                    tracing::debug!(tag = %tag.name, "created tag on first reference");
                    tag.id
                }
            };
            ids.push(id);
        }

        Ok(ids)
    }
}
