//! Error handling for the Linkstash API
//!
//! This module provides a unified error type using thiserror, with a stable
//! string code and HTTP-style status for every variant. Errors crossing the
//! GraphQL boundary carry both in their extensions via [`ErrorExtensions`].

use async_graphql::ErrorExtensions;
use axum::http::StatusCode;
use thiserror::Error;

/// Convenience alias for Results using ApiError
pub type ApiResult<T> = Result<T, ApiError>;

/// Main API error type
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    // ========== Authentication & Authorization ==========
    /// Missing credentials or an operation the current user may not perform
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Invalid bearer token (expired, malformed, bad signature)
    #[error("invalid authentication token: {0}")]
    InvalidToken(String),

    // ========== Resource Errors ==========
    /// Requested resource not found
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Resource already exists
    #[error("{resource_type} already exists: {id}")]
    Conflict {
        resource_type: &'static str,
        id: String,
    },

    /// A domain invariant rejected the operation (self-vote, duplicate vote)
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    /// Malformed or unsupported request input
    #[error("bad request: {0}")]
    BadRequest(String),

    // ========== Infrastructure Errors ==========
    /// Document store operation failed
    #[error("database error: {0}")]
    Database(String),

    /// Outbound HTTP call failed (identity provider, page metadata)
    #[error("external service error: {0}")]
    Http(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal server error (catch-all for unexpected failures)
    #[error("internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Stable machine-readable code surfaced in GraphQL error extensions
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::InvalidToken(_) => "INVALID_TOKEN",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Conflict { .. } => "CONFLICT",
            ApiError::PreconditionFailed(_) => "PRECONDITION_FAILED",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Database(_) => "DATABASE_ERROR",
            ApiError::Http(_) => "EXTERNAL_SERVICE_ERROR",
            ApiError::Configuration(_) => "CONFIGURATION_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP-style status associated with this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) | ApiError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::PreconditionFailed(_) => StatusCode::PRECONDITION_FAILED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Http(_) => StatusCode::BAD_GATEWAY,
            ApiError::Database(_) | ApiError::Configuration(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<mongodb::error::Error> for ApiError {
    fn from(err: mongodb::error::Error) -> Self {
        ApiError::Database(err.to_string())
    }
}

impl From<bson::ser::Error> for ApiError {
    fn from(err: bson::ser::Error) -> Self {
        ApiError::Database(err.to_string())
    }
}

impl From<bson::oid::Error> for ApiError {
    fn from(err: bson::oid::Error) -> Self {
        ApiError::BadRequest(format!("invalid id: {err}"))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Http(err.to_string())
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| {
            e.set("code", self.code());
            e.set("status", self.status().as_u16());
        })
    }
}
