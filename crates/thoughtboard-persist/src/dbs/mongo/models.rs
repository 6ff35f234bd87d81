use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use thoughtboard_types::Thought;

/// MongoDB-specific Thought document (uses ObjectId and BSON dates)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoThought {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_text: Option<String>,
    #[serde(default)]
    pub resonance_count: i64,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl From<MongoThought> for Thought {
    fn from(thought: MongoThought) -> Self {
        Self {
            id: thought.id.to_hex(),
            content: thought.content,
            secondary_text: thought.secondary_text,
            // `$inc` only ever adds, a negative value means a hand-edited document
            resonance_count: u64::try_from(thought.resonance_count).unwrap_or(0),
            created_at: thought.created_at,
        }
    }
}
