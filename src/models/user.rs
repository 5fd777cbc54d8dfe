//! User documents and bearer token claims

use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user account, created lazily on first successful identity-provider login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    /// Email reported by the identity provider, unique across users
    pub email: String,

    pub name: String,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(),
            email: email.into(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}

/// JWT claims carried by a Linkstash bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: hex-encoded ObjectId of the user
    pub sub: String,

    /// Issued at timestamp (Unix epoch)
    pub iat: i64,

    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl Claims {
    /// Parse the subject back into the user's ObjectId
    pub fn user_id(&self) -> Option<ObjectId> {
        ObjectId::parse_str(&self.sub).ok()
    }
}

/// The authenticated user attached to a request context.
///
/// Injected by the GraphQL route handler after token verification; its
/// presence is what [`crate::graphql::guards::AuthGuard`] checks.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_subject_round_trip() {
        let id = ObjectId::new();
        let claims = Claims {
            sub: id.to_hex(),
            iat: 0,
            exp: i64::MAX,
        };
        assert_eq!(claims.user_id(), Some(id));
    }

    #[test]
    fn test_claims_bad_subject() {
        let claims = Claims {
            sub: "not-an-object-id".into(),
            iat: 0,
            exp: 0,
        };
        assert_eq!(claims.user_id(), None);
    }
}
