use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored thought, as returned by every store backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thought {
    pub id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_text: Option<String>,
    pub resonance_count: u64,
    pub created_at: DateTime<Utc>,
}

/// Unvalidated field values pulled out of a request body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawThought {
    pub content: Option<String>,
    pub secondary_text: Option<String>,
}

impl RawThought {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            secondary_text: None,
        }
    }

    pub fn with_secondary_text(mut self, text: impl Into<String>) -> Self {
        self.secondary_text = Some(text.into());
        self
    }
}

/// Content fields that passed validation.
///
/// Only `ThoughtRules::validate` builds one, so a draft handed to a store
/// always satisfies the configured bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThoughtDraft {
    content: String,
    secondary_text: Option<String>,
}

impl ThoughtDraft {
    pub(crate) fn new(content: String, secondary_text: Option<String>) -> Self {
        Self {
            content,
            secondary_text,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn secondary_text(&self) -> Option<&str> {
        self.secondary_text.as_deref()
    }

    pub fn into_parts(self) -> (String, Option<String>) {
        (self.content, self.secondary_text)
    }
}
