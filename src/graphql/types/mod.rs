//! GraphQL type definitions
//!
//! Thin wrappers over the domain models; relationship fields resolve through
//! the request-scoped loaders.

mod comment;
mod link;
mod tag;
mod user;

pub use comment::Comment;
pub use link::Link;
pub use tag::Tag;
pub use user::{AuthPayload, User};
