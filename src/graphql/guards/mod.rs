//! GraphQL guards for the Linkstash API
//!
//! Authorization is declarative: every operation that needs an authenticated
//! user carries `#[graphql(guard = "AuthGuard")]`, and `login` simply carries
//! none. No operation is exempted by name.

mod auth;

pub use auth::AuthGuard;
