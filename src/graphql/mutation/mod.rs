//! GraphQL mutations for Linkstash

mod auth;
mod link;

pub use auth::AuthMutation;
pub use link::LinkMutation;

use async_graphql::MergedObject;

/// Root mutation type combining all mutation domains
#[derive(MergedObject, Default)]
pub struct Mutation(AuthMutation, LinkMutation);
