//! Link and embedded comment documents

use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shared bookmark, owned by the user who submitted it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    /// Target URL, unique across all links
    pub url: String,

    /// Page title scraped from the target, if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Page description scraped from the target, if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Preview image URL scraped from the target, if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,

    /// Submitting user; only the owner may edit or remove the link
    pub owner: ObjectId,

    /// Ids of users who voted for this link; at most one entry per user
    pub votes: Vec<ObjectId>,

    /// Embedded comments
    pub comments: Vec<Comment>,

    /// Ids of associated tags
    pub tags: Vec<ObjectId>,
}

impl Link {
    /// Create a new link with empty votes/comments/tags
    pub fn new(url: impl Into<String>, owner: ObjectId) -> Self {
        Self {
            id: ObjectId::new(),
            url: url.into(),
            title: None,
            description: None,
            image_url: None,
            created_at: Utc::now(),
            owner,
            votes: Vec::new(),
            comments: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Whether the given user already voted for this link
    pub fn has_vote_from(&self, user_id: &ObjectId) -> bool {
        self.votes.contains(user_id)
    }

    /// Find an embedded comment by id
    pub fn comment(&self, comment_id: &ObjectId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == *comment_id)
    }
}

/// A comment embedded inside a link document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: ObjectId,

    /// Authoring user; only the author may remove the comment
    pub user: ObjectId,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,

    pub text: String,
}

impl Comment {
    pub fn new(user: ObjectId, text: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(),
            user,
            created_at: Utc::now(),
            text: text.into(),
        }
    }
}

/// Fields links may be ordered by in a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOrderField {
    CreatedAt,
    Votes,
}

impl LinkOrderField {
    /// BSON document field name backing this order option
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkOrderField::CreatedAt => "createdAt",
            LinkOrderField::Votes => "votes",
        }
    }

    /// Parse an order field name, rejecting anything outside the allow-list
    pub fn parse(field: &str) -> Option<Self> {
        match field {
            "createdAt" => Some(LinkOrderField::CreatedAt),
            "votes" => Some(LinkOrderField::Votes),
            _ => None,
        }
    }
}

/// Validated search criteria handed to the link repository
#[derive(Debug, Clone)]
pub struct LinkSearchCriteria {
    /// Number of records to skip
    pub skip: u64,

    /// Maximum number of records to return (already capped by the resolver)
    pub limit: i64,

    /// Restrict to links owned by this user
    pub owner: Option<ObjectId>,

    /// Restrict to links carrying at least one of these tags
    pub tags: Vec<ObjectId>,

    /// Ordering, applied in sequence; `true` means descending
    pub order: Vec<(LinkOrderField, bool)>,
}

impl Default for LinkSearchCriteria {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 20,
            owner: None,
            tags: Vec::new(),
            order: vec![(LinkOrderField::CreatedAt, true)],
        }
    }
}
