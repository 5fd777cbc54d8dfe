//! GraphQL queries for Linkstash

mod link;
mod tag;

pub use link::LinkQuery;
pub use tag::TagQuery;

use async_graphql::MergedObject;

/// Root query type combining all query domains
#[derive(MergedObject, Default)]
pub struct Query(LinkQuery, TagQuery);
