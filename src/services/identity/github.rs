//! GitHub OAuth identity provider

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{IdentityProvider, Profile};
use crate::error::{ApiError, ApiResult};

const DEFAULT_OAUTH_BASE_URL: &str = "https://github.com";
const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Exchanges GitHub OAuth authorization codes for user profiles.
///
/// Two hops: the code is traded for an access token at the OAuth endpoint,
/// then the user profile is fetched from the REST API. Base URLs are
/// injectable so tests can point the provider at a local mock server.
pub struct GithubProvider {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    oauth_base_url: String,
    api_base_url: String,
}

#[derive(Debug, Serialize)]
struct AccessTokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubUser {
    login: String,
    name: Option<String>,
    email: Option<String>,
}

impl GithubProvider {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self::with_base_urls(
            client_id,
            client_secret,
            DEFAULT_OAUTH_BASE_URL,
            DEFAULT_API_BASE_URL,
        )
    }

    /// Create a provider against custom endpoints (used by tests)
    pub fn with_base_urls(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        oauth_base_url: impl Into<String>,
        api_base_url: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            oauth_base_url: oauth_base_url.into(),
            api_base_url: api_base_url.into(),
        }
    }

    async fn exchange_code(&self, code: &str, state: Option<&str>) -> ApiResult<String> {
        let response: AccessTokenResponse = self
            .http
            .post(format!("{}/login/oauth/access_token", self.oauth_base_url))
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&AccessTokenRequest {
                client_id: &self.client_id,
                client_secret: &self.client_secret,
                code,
                state,
            })
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = response.error {
            let description = response.error_description.unwrap_or_default();
            return Err(ApiError::Http(format!(
                "GitHub code exchange failed: {error} {description}"
            )));
        }

        response
            .access_token
            .ok_or_else(|| ApiError::Http("GitHub returned no access token".into()))
    }

    async fn fetch_profile(&self, access_token: &str) -> ApiResult<Profile> {
        let user: GithubUser = self
            .http
            .get(format!("{}/user", self.api_base_url))
            .bearer_auth(access_token)
            // GitHub rejects requests without a User-Agent
            .header(reqwest::header::USER_AGENT, "linkstash-api")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let email = user.email.ok_or_else(|| {
            ApiError::PreconditionFailed("GitHub account must have a public email".into())
        })?;

        Ok(Profile {
            name: user.name.unwrap_or(user.login),
            email,
        })
    }
}

#[async_trait]
impl IdentityProvider for GithubProvider {
    async fn authenticate(&self, code: &str, state: Option<&str>) -> ApiResult<Profile> {
        let access_token = self.exchange_code(code, state).await?;
        self.fetch_profile(&access_token).await
    }
}
