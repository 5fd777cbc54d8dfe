//! GraphQL schema and resolvers for Linkstash
//!
//! This module contains the async-graphql schema including:
//! - Query resolvers for searching links and tags
//! - Mutation resolvers for authentication and link lifecycle
//! - Request-scoped DataLoaders batching user/tag point lookups
//! - The authentication guard applied declaratively per operation

pub mod guards;
pub mod loaders;
pub mod mutation;
pub mod pagination;
pub mod query;
pub mod schema;
pub mod types;

pub use loaders::attach_request_loaders;
pub use schema::{LinkstashSchema, SchemaBuilder};
