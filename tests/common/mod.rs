//! Common test utilities for API integration tests
//!
//! Provides in-memory fake repositories with storage-call counters, a stub
//! identity provider, and a `TestApp` harness executing GraphQL operations
//! directly against the built schema (no HTTP transport needed).

#![allow(dead_code)]

pub mod fakes;
pub mod fixtures;

use std::sync::Arc;

use async_graphql::{Request, Response, Value};

use linkstash_api::graphql::attach_request_loaders;
use linkstash_api::models::{CurrentUser, User};
use linkstash_api::repositories::{LinkRepository, TagRepository, UserRepository};
use linkstash_api::services::{
    AuthConfig, AuthService, IdentityProvider, IdentityProviders, PageMetadataFetcher,
};
use linkstash_api::{LinkstashSchema, SchemaBuilder};

pub use fakes::{
    FakeLinkRepository, FakeTagRepository, FakeUserRepository, StubIdentityProvider,
    StubPageMetadataFetcher,
};

/// Schema plus handles on the fake stores behind it
pub struct TestApp {
    pub schema: LinkstashSchema,
    pub links: Arc<FakeLinkRepository>,
    pub tags: Arc<FakeTagRepository>,
    pub users: Arc<FakeUserRepository>,
    pub auth_service: AuthService,
}

impl TestApp {
    /// Build a test app with empty stores and no identity providers
    pub fn new() -> Self {
        Self::with_identity_providers(IdentityProviders::new())
    }

    /// Build a test app with the given identity provider registered under
    /// `"github"`
    pub fn with_provider(provider: impl IdentityProvider + 'static) -> Self {
        Self::with_identity_providers(
            IdentityProviders::new().register("github", Arc::new(provider)),
        )
    }

    pub fn with_identity_providers(identity_providers: IdentityProviders) -> Self {
        let links = Arc::new(FakeLinkRepository::new());
        let tags = Arc::new(FakeTagRepository::new());
        let users = Arc::new(FakeUserRepository::new());
        let auth_service = AuthService::new(AuthConfig::new(
            "integration-test-secret-integration-test-secret",
        ));

        let links_dyn: Arc<dyn LinkRepository> = links.clone();
        let tags_dyn: Arc<dyn TagRepository> = tags.clone();
        let users_dyn: Arc<dyn UserRepository> = users.clone();
        let page_meta: Arc<dyn PageMetadataFetcher> = Arc::new(StubPageMetadataFetcher::empty());

        let schema = SchemaBuilder::new()
            .links(links_dyn)
            .tags(tags_dyn)
            .users(users_dyn)
            .auth_service(auth_service.clone())
            .identity_providers(identity_providers)
            .page_meta(page_meta)
            .build();

        Self {
            schema,
            links,
            tags,
            users,
            auth_service,
        }
    }

    /// Execute an operation with an authenticated user in context
    pub async fn execute_as(&self, user: &User, query: impl Into<String>) -> Response {
        self.execute_request(Request::new(query).data(CurrentUser(user.clone())))
            .await
    }

    /// Execute an operation without authentication
    pub async fn execute_anonymous(&self, query: impl Into<String>) -> Response {
        self.execute_request(Request::new(query)).await
    }

    async fn execute_request(&self, request: Request) -> Response {
        // Mirror the route handler: fresh loaders per request
        let request = attach_request_loaders(request, self.users.clone(), self.tags.clone());
        self.schema.execute(request).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// The `code` extension of the response's first error, if any
pub fn error_code(response: &Response) -> Option<String> {
    let error = response.errors.first()?;
    let extensions = error.extensions.as_ref()?;
    match extensions.get("code")? {
        Value::String(code) => Some(code.clone()),
        _ => None,
    }
}

/// The response data as JSON, panicking on errors
pub fn data_json(response: &Response) -> serde_json::Value {
    assert!(
        response.errors.is_empty(),
        "unexpected GraphQL errors: {:?}",
        response.errors
    );
    response
        .data
        .clone()
        .into_json()
        .expect("response data is JSON-representable")
}
