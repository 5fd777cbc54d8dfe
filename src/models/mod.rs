//! Domain models for Linkstash
//!
//! These structs mirror the BSON documents in the store (camelCase field
//! names, `_id` primary keys). GraphQL-facing wrappers live in
//! `crate::graphql::types`.

pub mod link;
pub mod tag;
pub mod user;

pub use link::{Comment, Link, LinkOrderField, LinkSearchCriteria};
pub use tag::Tag;
pub use user::{Claims, CurrentUser, User};
