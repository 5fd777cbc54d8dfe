//! GraphQL schema builder
//!
//! Entity resolver modules are merged into the roots through explicit
//! `MergedObject` lists in `query::Query` and `mutation::Mutation`; a field
//! name declared by two modules is a build-time error, never a silent
//! overwrite.

use std::sync::Arc;

use async_graphql::{EmptySubscription, Schema};

use super::mutation::Mutation;
use super::query::Query;
use crate::repositories::{LinkRepository, TagRepository, UserRepository};
use crate::services::{AuthService, IdentityProviders, PageMetadataFetcher, TagService};

/// The Linkstash GraphQL schema type
pub type LinkstashSchema = Schema<Query, Mutation, EmptySubscription>;

/// Builder assembling the schema with its required collaborators
pub struct SchemaBuilder {
    links: Option<Arc<dyn LinkRepository>>,
    tags: Option<Arc<dyn TagRepository>>,
    users: Option<Arc<dyn UserRepository>>,
    auth_service: Option<AuthService>,
    identity_providers: IdentityProviders,
    page_meta: Option<Arc<dyn PageMetadataFetcher>>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            links: None,
            tags: None,
            users: None,
            auth_service: None,
            identity_providers: IdentityProviders::new(),
            page_meta: None,
        }
    }

    pub fn links(mut self, links: Arc<dyn LinkRepository>) -> Self {
        self.links = Some(links);
        self
    }

    pub fn tags(mut self, tags: Arc<dyn TagRepository>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn users(mut self, users: Arc<dyn UserRepository>) -> Self {
        self.users = Some(users);
        self
    }

    pub fn auth_service(mut self, auth_service: AuthService) -> Self {
        self.auth_service = Some(auth_service);
        self
    }

    /// Set the identity provider registry used by the login mutation
    pub fn identity_providers(mut self, identity_providers: IdentityProviders) -> Self {
        self.identity_providers = identity_providers;
        self
    }

    /// Set the page metadata fetcher used by createLink
    pub fn page_meta(mut self, page_meta: Arc<dyn PageMetadataFetcher>) -> Self {
        self.page_meta = Some(page_meta);
        self
    }

    /// Build the schema with all configured collaborators
    ///
    /// # Panics
    /// Panics if a required collaborator (repositories, auth service, page
    /// metadata fetcher) is not configured
    pub fn build(self) -> LinkstashSchema {
        let links = self.links.expect("link repository is required");
        let tags = self.tags.expect("tag repository is required");
        let users = self.users.expect("user repository is required");
        let auth_service = self.auth_service.expect("auth service is required");
        let page_meta = self.page_meta.expect("page metadata fetcher is required");

        Schema::build(Query::default(), Mutation::default(), EmptySubscription)
            .data(TagService::new(tags.clone()))
            .data(links)
            .data(tags)
            .data(users)
            .data(auth_service)
            .data(self.identity_providers)
            .data(page_meta)
            .finish()
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
