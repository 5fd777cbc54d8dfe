//! Authentication mutations
//!
//! `login` is the only unguarded operation in the schema: it exchanges an
//! authorization code with an external identity provider, lazily creates the
//! user record on first login, and issues a bearer token. `logout` exists for
//! API symmetry; tokens are stateless, so discarding the token is the
//! client's job.

use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::error::ApiError;
use crate::graphql::guards::AuthGuard;
use crate::graphql::types::{AuthPayload, User};
use crate::models::User as DbUser;
use crate::repositories::UserRepository;
use crate::services::{AuthService, IdentityProviders};

/// Authentication mutations
#[derive(Default)]
pub struct AuthMutation;

#[Object]
impl AuthMutation {
    /// Log in via an external identity provider.
    ///
    /// The provider exchanges `code` for the user's `{name, email}` profile;
    /// a user record is created on first login. Fails with BAD_REQUEST for
    /// an unknown `providerType` and PRECONDITION_FAILED when the provider
    /// account exposes no email.
    async fn login(
        &self,
        ctx: &Context<'_>,
        provider_type: String,
        code: String,
        state: Option<String>,
    ) -> Result<AuthPayload> {
        let providers = ctx.data::<IdentityProviders>()?;
        let users = ctx.data::<Arc<dyn UserRepository>>()?;
        let auth_service = ctx.data::<AuthService>()?;

        let provider = providers.get(&provider_type).map_err(|e| e.extend())?;
        let profile = provider
            .authenticate(&code, state.as_deref())
            .await
            .map_err(|e| sanitize_login_error(&e))?;

        let user = match users
            .find_by_email(&profile.email)
            .await
            .map_err(|e| e.extend())?
        {
            Some(user) => user,
            None => {
                let user = DbUser::new(profile.email, profile.name);
                users.insert(&user).await.map_err(|e| e.extend())?;
                tracing::info!(user_id = %user.id, "created user on first login");
                user
            }
        };

        let token = auth_service.issue_token(&user).map_err(|e| e.extend())?;

        Ok(AuthPayload {
            token,
            user: User::from(user),
        })
    }

    /// Log out the current user.
    ///
    /// Tokens are stateless; this acknowledges the request so clients have a
    /// uniform logout call, and the client discards its token.
    #[graphql(guard = "AuthGuard")]
    async fn logout(&self) -> bool {
        true
    }
}

/// Keep provider-side failures from leaking implementation detail.
///
/// Expected, user-actionable failures pass through; anything else is logged
/// server-side and reported generically.
fn sanitize_login_error(error: &ApiError) -> async_graphql::Error {
    match error {
        ApiError::PreconditionFailed(_) | ApiError::BadRequest(_) => error.extend(),
        other => {
            tracing::warn!(error = %other, "identity provider login failed");
            ApiError::Http("identity provider login failed".into()).extend()
        }
    }
}
