//! Link mutations

use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, InputObject, Object, Result, ID};
use bson::oid::ObjectId;

use crate::error::ApiError;
use crate::graphql::guards::AuthGuard;
use crate::graphql::types::{Comment, Link, User};
use crate::models::{Comment as DbComment, CurrentUser, Link as DbLink};
use crate::repositories::LinkRepository;
use crate::services::{PageMetadataFetcher, TagService};

/// Input for creating a link
#[derive(Debug, InputObject)]
pub struct NewLink {
    /// Target URL (must not already be shared)
    pub url: String,
    /// Optional initial comment
    pub comment: Option<String>,
    /// Optional tag names, created lazily
    pub tags: Option<Vec<String>>,
}

/// Input for editing a link
#[derive(Debug, InputObject)]
pub struct EditLink {
    pub id: ID,
    /// Replacement URL; unchanged when omitted
    pub url: Option<String>,
    /// Replacement tag names; unchanged when omitted
    pub tags: Option<Vec<String>>,
}

/// Fail with Unauthorized unless the current user owns the link
fn ensure_owner(link: &DbLink, user_id: &ObjectId) -> Result<(), ApiError> {
    if link.owner != *user_id {
        return Err(ApiError::Unauthorized(
            "only the link owner can modify it".into(),
        ));
    }
    Ok(())
}

fn parse_id(id: &str) -> Result<ObjectId, ApiError> {
    Ok(ObjectId::parse_str(id)?)
}

/// Link lifecycle mutations
#[derive(Default)]
pub struct LinkMutation;

#[Object]
impl LinkMutation {
    /// Share a new link.
    ///
    /// Fails with CONFLICT when the URL is already shared. Page metadata
    /// (title/description/image) is fetched best-effort and never fails the
    /// mutation.
    #[graphql(guard = "AuthGuard")]
    async fn create_link(&self, ctx: &Context<'_>, link: NewLink) -> Result<Link> {
        let repo = ctx.data::<Arc<dyn LinkRepository>>()?;
        let tag_service = ctx.data::<TagService>()?;
        let page_meta = ctx.data::<Arc<dyn PageMetadataFetcher>>()?;
        let CurrentUser(user) = ctx.data::<CurrentUser>()?;

        if repo
            .find_by_url(&link.url)
            .await
            .map_err(|e| e.extend())?
            .is_some()
        {
            return Err(ApiError::Conflict {
                resource_type: "link",
                id: link.url,
            }
            .extend());
        }

        let mut new_link = DbLink::new(&link.url, user.id);

        if let Some(metadata) = page_meta.fetch(&link.url).await {
            new_link.title = metadata.title;
            new_link.description = metadata.description;
            new_link.image_url = metadata.image_url;
        }

        if let Some(text) = link.comment.filter(|text| !text.is_empty()) {
            new_link.comments.push(DbComment::new(user.id, text));
        }

        if let Some(tags) = &link.tags {
            new_link.tags = tag_service.resolve_names(tags).await.map_err(|e| e.extend())?;
        }

        repo.insert(&new_link).await.map_err(|e| e.extend())?;
        tracing::info!(link_id = %new_link.id, url = %new_link.url, "link created");

        Ok(Link::from(new_link))
    }

    /// Edit a link's URL and tags. Only the owner may edit.
    #[graphql(guard = "AuthGuard")]
    async fn edit_link(&self, ctx: &Context<'_>, link: EditLink) -> Result<Link> {
        let repo = ctx.data::<Arc<dyn LinkRepository>>()?;
        let tag_service = ctx.data::<TagService>()?;
        let CurrentUser(user) = ctx.data::<CurrentUser>()?;

        let link_id = parse_id(&link.id).map_err(|e| e.extend())?;
        let mut existing = repo
            .find_by_id(link_id)
            .await
            .map_err(|e| e.extend())?
            .ok_or_else(|| {
                ApiError::NotFound {
                    resource_type: "link",
                    id: link.id.to_string(),
                }
                .extend()
            })?;

        ensure_owner(&existing, &user.id).map_err(|e| e.extend())?;

        if let Some(new_url) = &link.url {
            if *new_url != existing.url
                && repo
                    .find_by_url(new_url)
                    .await
                    .map_err(|e| e.extend())?
                    .is_some()
            {
                return Err(ApiError::Conflict {
                    resource_type: "link",
                    id: new_url.clone(),
                }
                .extend());
            }
            existing.url = new_url.clone();
        }

        if let Some(tags) = &link.tags {
            existing.tags = tag_service.resolve_names(tags).await.map_err(|e| e.extend())?;
        }

        repo.update_fields(link_id, &existing.url, &existing.tags)
            .await
            .map_err(|e| e.extend())?;

        Ok(Link::from(existing))
    }

    /// Remove a link. Only the owner may remove it.
    #[graphql(guard = "AuthGuard")]
    async fn remove_link(&self, ctx: &Context<'_>, link_id: ID) -> Result<bool> {
        let repo = ctx.data::<Arc<dyn LinkRepository>>()?;
        let CurrentUser(user) = ctx.data::<CurrentUser>()?;

        let id = parse_id(&link_id).map_err(|e| e.extend())?;
        let existing = repo
            .find_by_id(id)
            .await
            .map_err(|e| e.extend())?
            .ok_or_else(|| {
                ApiError::NotFound {
                    resource_type: "link",
                    id: link_id.to_string(),
                }
                .extend()
            })?;

        ensure_owner(&existing, &user.id).map_err(|e| e.extend())?;

        repo.delete(id).await.map_err(|e| e.extend())
    }

    /// Comment on a link
    #[graphql(guard = "AuthGuard")]
    async fn add_link_comment(
        &self,
        ctx: &Context<'_>,
        link_id: ID,
        comment: String,
    ) -> Result<Comment> {
        let repo = ctx.data::<Arc<dyn LinkRepository>>()?;
        let CurrentUser(user) = ctx.data::<CurrentUser>()?;

        let id = parse_id(&link_id).map_err(|e| e.extend())?;
        repo.find_by_id(id)
            .await
            .map_err(|e| e.extend())?
            .ok_or_else(|| {
                ApiError::NotFound {
                    resource_type: "link",
                    id: link_id.to_string(),
                }
                .extend()
            })?;

        let new_comment = DbComment::new(user.id, comment);
        repo.push_comment(id, &new_comment)
            .await
            .map_err(|e| e.extend())?;

        Ok(Comment::from(new_comment))
    }

    /// Remove a comment from a link. Only the comment's author may remove it.
    #[graphql(guard = "AuthGuard")]
    async fn remove_link_comment(
        &self,
        ctx: &Context<'_>,
        link_id: ID,
        comment_id: ID,
    ) -> Result<bool> {
        let repo = ctx.data::<Arc<dyn LinkRepository>>()?;
        let CurrentUser(user) = ctx.data::<CurrentUser>()?;

        let id = parse_id(&link_id).map_err(|e| e.extend())?;
        let comment_oid = parse_id(&comment_id).map_err(|e| e.extend())?;

        let link = repo
            .find_by_id(id)
            .await
            .map_err(|e| e.extend())?
            .ok_or_else(|| {
                ApiError::NotFound {
                    resource_type: "link",
                    id: link_id.to_string(),
                }
                .extend()
            })?;

        let comment = link.comment(&comment_oid).ok_or_else(|| {
            ApiError::NotFound {
                resource_type: "comment",
                id: comment_id.to_string(),
            }
            .extend()
        })?;

        if comment.user != user.id {
            return Err(
                ApiError::Unauthorized("only the comment author can remove it".into()).extend(),
            );
        }

        repo.pull_comment(id, comment_oid)
            .await
            .map_err(|e| e.extend())
    }

    /// Vote for a link.
    ///
    /// Fails with PRECONDITION_FAILED for self-votes and duplicate votes.
    /// Returns the voting user.
    #[graphql(guard = "AuthGuard")]
    async fn add_link_vote(&self, ctx: &Context<'_>, link_id: ID) -> Result<User> {
        let repo = ctx.data::<Arc<dyn LinkRepository>>()?;
        let CurrentUser(user) = ctx.data::<CurrentUser>()?;

        let id = parse_id(&link_id).map_err(|e| e.extend())?;
        let link = repo
            .find_by_id(id)
            .await
            .map_err(|e| e.extend())?
            .ok_or_else(|| {
                ApiError::NotFound {
                    resource_type: "link",
                    id: link_id.to_string(),
                }
                .extend()
            })?;

        if link.owner == user.id {
            return Err(ApiError::PreconditionFailed(
                "the link owner cannot vote for their own link".into(),
            )
            .extend());
        }

        if link.has_vote_from(&user.id) {
            return Err(
                ApiError::PreconditionFailed("user already voted for this link".into()).extend(),
            );
        }

        repo.add_vote(id, user.id).await.map_err(|e| e.extend())?;

        Ok(User::from(user.clone()))
    }
}
