//! External identity providers
//!
//! Login exchanges an authorization code with an external provider for a
//! minimal `{name, email}` profile; the user record is then created lazily
//! on first login. Providers are registered under a string type key so the
//! `login` mutation can dispatch on its `providerType` argument.

mod github;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{ApiError, ApiResult};

pub use github::GithubProvider;

/// Profile data returned by an identity provider after a successful exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub email: String,
}

/// An external identity provider able to turn an authorization code into a
/// user profile
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange an authorization code (plus optional CSRF state) for the
    /// authenticated user's profile.
    ///
    /// # Errors
    /// - [`ApiError::Http`] when the provider rejects the code or is
    ///   unreachable
    /// - [`ApiError::PreconditionFailed`] when the account exposes no email
    async fn authenticate(&self, code: &str, state: Option<&str>) -> ApiResult<Profile>;
}

/// Registry of identity providers keyed by provider type
#[derive(Clone, Default)]
pub struct IdentityProviders {
    providers: HashMap<String, Arc<dyn IdentityProvider>>,
}

impl IdentityProviders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under its type key (e.g. `"github"`)
    pub fn register(
        mut self,
        provider_type: impl Into<String>,
        provider: Arc<dyn IdentityProvider>,
    ) -> Self {
        self.providers.insert(provider_type.into(), provider);
        self
    }

    /// Look up a provider, failing with BadRequest for unknown types
    pub fn get(&self, provider_type: &str) -> ApiResult<&Arc<dyn IdentityProvider>> {
        self.providers.get(provider_type).ok_or_else(|| {
            ApiError::BadRequest(format!("unknown identity provider type: {provider_type}"))
        })
    }
}
