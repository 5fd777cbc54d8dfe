//! Linkstash API library
//!
//! A bookmark-sharing GraphQL API: users submit links, tag them, comment on
//! them, and vote on them. This crate exposes the core components for the
//! server binary and for integration tests.

pub mod config;
pub mod error;
pub mod graphql;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use error::{ApiError, ApiResult};
pub use graphql::{LinkstashSchema, SchemaBuilder};
pub use services::{AuthConfig, AuthService};
