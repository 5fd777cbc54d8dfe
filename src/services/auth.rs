//! Bearer token service
//!
//! Issues and verifies the HS256 tokens carried in the Authorization header.
//! The subject claim is the hex-encoded user id; no server-side session state
//! exists, so logout is purely a client-side token discard.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::error::{ApiError, ApiResult};
use crate::models::{Claims, User};

/// Token service configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Token TTL in seconds (default: 7 days)
    pub token_ttl_secs: i64,
}

impl AuthConfig {
    /// Create a new AuthConfig with the default TTL
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl_secs: 7 * 24 * 3600,
        }
    }

    /// Override the token TTL
    pub fn with_ttl(mut self, token_ttl_secs: i64) -> Self {
        self.token_ttl_secs = token_ttl_secs;
        self
    }
}

/// Issues and verifies bearer tokens
#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Issue a signed token for the given user
    pub fn issue_token(&self, user: &User) -> ApiResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_hex(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.config.token_ttl_secs)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| ApiError::Internal(format!("token signing failed: {e}")))
    }

    /// Verify a token's signature and expiry, returning its claims
    pub fn verify_token(&self, token: &str) -> ApiResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| {
            tracing::debug!(error = %e, "bearer token verification failed");
            ApiError::InvalidToken(e.to_string())
        })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn service() -> AuthService {
        AuthService::new(AuthConfig::new("test-secret-test-secret-test-secret"))
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = service();
        let user = User::new("ada@example.com", "Ada");

        let token = service.issue_token(&user).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.user_id(), Some(user.id));
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let user = User::new("ada@example.com", "Ada");
        let token = service().issue_token(&user).unwrap();

        let other = AuthService::new(AuthConfig::new("another-secret-another-secret-abc"));
        assert_matches!(other.verify_token(&token), Err(ApiError::InvalidToken(_)));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let service = AuthService::new(
            AuthConfig::new("test-secret-test-secret-test-secret").with_ttl(-3600),
        );
        let user = User::new("ada@example.com", "Ada");
        let token = service.issue_token(&user).unwrap();

        assert_matches!(service.verify_token(&token), Err(ApiError::InvalidToken(_)));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert_matches!(
            service().verify_token("not.a.token"),
            Err(ApiError::InvalidToken(_))
        );
    }
}
