//! GraphQL transport route
//!
//! The handler is the seam between HTTP and the graph: it extracts and
//! verifies the bearer token, attaches the authenticated user and a fresh
//! pair of request-scoped loaders to the request, and executes it. Requests
//! without a valid token still execute; protected operations then fail in
//! the auth guard.

use std::sync::Arc;

use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::Extension,
    http::{header, HeaderMap},
    routing::{get, post},
    Router,
};

use crate::graphql::{attach_request_loaders, LinkstashSchema};
use crate::models::CurrentUser;
use crate::repositories::{TagRepository, UserRepository};
use crate::services::AuthService;

/// Shared state for the GraphQL route
#[derive(Clone)]
pub struct GraphQLState {
    pub schema: LinkstashSchema,
    pub auth_service: AuthService,
    pub users: Arc<dyn UserRepository>,
    pub tags: Arc<dyn TagRepository>,
}

/// Build the GraphQL router (`POST /graphql`, plus the playground in
/// development)
pub fn graphql_router(state: GraphQLState, enable_playground: bool) -> Router {
    let mut router = Router::new().route("/graphql", post(graphql_handler));

    if enable_playground {
        router = router.route("/graphql", get(graphql_playground));
    }

    router.layer(Extension(state))
}

/// Extract the bearer token from the Authorization header (case-insensitive
/// scheme, rejecting malformed values with trailing parts)
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())?;

    let mut parts = value.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;

    if parts.next().is_some() {
        return None;
    }

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

async fn graphql_handler(
    Extension(state): Extension<GraphQLState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();

    // Verify the bearer token and resolve the user record. Failures leave
    // the request unauthenticated; protected operations then fail in the
    // guard with UNAUTHORIZED.
    if let Some(token) = extract_bearer_token(&headers) {
        match state.auth_service.verify_token(token) {
            Ok(claims) => match claims.user_id() {
                Some(user_id) => match state.users.find_by_id(user_id).await {
                    Ok(Some(user)) => {
                        tracing::debug!(user_id = %user.id, "GraphQL request authenticated");
                        request = request.data(CurrentUser(user));
                    }
                    Ok(None) => {
                        tracing::debug!(%user_id, "token subject has no user record");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "user lookup during auth failed");
                    }
                },
                None => {
                    tracing::debug!("token subject is not a valid id");
                }
            },
            Err(e) => {
                tracing::debug!(error = %e, "bearer token rejected");
            }
        }
    }

    // One loader pair per request: request-scoped caching and batching
    request = attach_request_loaders(request, state.users.clone(), state.tags.clone());

    state.schema.execute(request).await.into()
}

/// GraphQL Playground handler for development
async fn graphql_playground() -> impl axum::response::IntoResponse {
    axum::response::Html(async_graphql::http::playground_source(
        async_graphql::http::GraphQLPlaygroundConfig::new("/graphql"),
    ))
}
