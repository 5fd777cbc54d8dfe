//! Link queries

use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, InputObject, Object, Result};
use bson::oid::ObjectId;

use crate::error::ApiError;
use crate::graphql::guards::AuthGuard;
use crate::graphql::pagination::{clamp_count, clamp_skip};
use crate::graphql::types::Link;
use crate::models::{LinkOrderField, LinkSearchCriteria};
use crate::repositories::LinkRepository;

/// Search criteria for `searchLinks`
#[derive(Debug, Default, InputObject)]
pub struct LinkQueryCriteria {
    /// Number of records to skip
    pub first: Option<i32>,
    /// Number of records to return (default 20, capped at 50)
    pub count: Option<i32>,
    /// Filters, combined with AND; unknown fields are ignored
    pub filter: Option<Vec<LinkQueryFilterOption>>,
    /// Ordering; fields outside the allow-list are dropped
    pub order: Option<Vec<LinkQueryOrderOption>>,
}

/// A single search filter
#[derive(Debug, InputObject)]
pub struct LinkQueryFilterOption {
    /// Filterable field: `owner` or `tags`
    pub field: String,
    /// Values to match; ids in hex form
    pub values: Vec<String>,
}

/// A single ordering option
#[derive(Debug, InputObject)]
pub struct LinkQueryOrderOption {
    /// Orderable field: `createdAt` or `votes`
    pub field: String,
    pub is_descending: bool,
}

/// Validate the raw criteria into the repository's shape: cap the count,
/// parse filter ids, allow-list order fields.
fn build_criteria(criteria: LinkQueryCriteria) -> Result<LinkSearchCriteria, ApiError> {
    let mut owner = None;
    let mut tags = Vec::new();

    for option in criteria.filter.unwrap_or_default() {
        match option.field.as_str() {
            "owner" => {
                let value = option.values.first().ok_or_else(|| {
                    ApiError::BadRequest("owner filter requires a value".into())
                })?;
                owner = Some(ObjectId::parse_str(value)?);
            }
            "tags" => {
                for value in &option.values {
                    tags.push(ObjectId::parse_str(value)?);
                }
            }
            // Unknown filter fields are ignored rather than rejected
            _ => {}
        }
    }

    let mut order: Vec<(LinkOrderField, bool)> = criteria
        .order
        .unwrap_or_default()
        .into_iter()
        .filter_map(|option| {
            LinkOrderField::parse(&option.field).map(|field| (field, option.is_descending))
        })
        .collect();

    if order.is_empty() {
        order.push((LinkOrderField::CreatedAt, true));
    }

    Ok(LinkSearchCriteria {
        skip: clamp_skip(criteria.first),
        limit: clamp_count(criteria.count),
        owner,
        tags,
        order,
    })
}

/// Link search queries
#[derive(Default)]
pub struct LinkQuery;

#[Object]
impl LinkQuery {
    /// Search links by owner and tags, ordered and paginated.
    ///
    /// Never returns more than 50 records regardless of the requested count.
    #[graphql(guard = "AuthGuard")]
    async fn search_links(
        &self,
        ctx: &Context<'_>,
        criteria: Option<LinkQueryCriteria>,
    ) -> Result<Vec<Link>> {
        let repo = ctx.data::<Arc<dyn LinkRepository>>()?;
        let criteria = build_criteria(criteria.unwrap_or_default()).map_err(|e| e.extend())?;

        let links = repo.search(&criteria).await.map_err(|e| e.extend())?;
        Ok(links.into_iter().map(Link::from).collect())
    }
}
