//! Tag documents

use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tag, created lazily the first time a link references its name.
///
/// Tags are deduplicated by `lowercase_name`; `name` preserves the casing of
/// the first reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub name: String,

    /// Lowercased name used for deduplication and prefix search
    pub lowercase_name: String,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: ObjectId::new(),
            lowercase_name: name.to_lowercase(),
            name,
            created_at: Utc::now(),
        }
    }
}
