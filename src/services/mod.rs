//! Services for the Linkstash API
//!
//! This module contains business logic shared by resolvers and the route
//! layer: token issuance/verification, identity-provider adapters, lazy tag
//! resolution, and best-effort page metadata scraping.

pub mod auth;
pub mod identity;
pub mod page_meta;
pub mod tags;

pub use auth::{AuthConfig, AuthService};
pub use identity::{GithubProvider, IdentityProvider, IdentityProviders, Profile};
pub use page_meta::{HttpPageMetadataFetcher, PageMetadata, PageMetadataFetcher};
pub use tags::TagService;
