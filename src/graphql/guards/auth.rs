//! Authentication guard

use async_graphql::{Context, ErrorExtensions, Guard};

use crate::error::ApiError;
use crate::models::CurrentUser;

/// Guard requiring an authenticated user in the request context.
///
/// The GraphQL route handler verifies the bearer token and injects
/// [`CurrentUser`] before execution; this guard only checks its presence, so
/// a missing credential, a bad signature, and a token whose subject has no
/// user record all fail the same way.
///
/// # Example
///
/// ```ignore
/// #[Object]
/// impl LinkMutation {
///     #[graphql(guard = "AuthGuard")]
///     async fn create_link(&self, ctx: &Context<'_>, link: NewLink) -> Result<Link> {
///         // ... only reached with a CurrentUser in context
///     }
/// }
/// ```
pub struct AuthGuard;

impl Guard for AuthGuard {
    async fn check(&self, ctx: &Context<'_>) -> async_graphql::Result<()> {
        if ctx.data_opt::<CurrentUser>().is_some() {
            Ok(())
        } else {
            tracing::debug!("rejecting unauthenticated GraphQL operation");
            Err(ApiError::Unauthorized("request requires an authenticated user".into()).extend())
        }
    }
}
