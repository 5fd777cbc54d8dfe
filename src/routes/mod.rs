//! HTTP route handlers

pub mod graphql;
pub mod health;

pub use graphql::{graphql_router, GraphQLState};
pub use health::{health_router, HealthState};
