use async_trait::async_trait;
use mongodb::bson::{self, oid::ObjectId};

use thoughtboard_types::{FetchPlan, Thought, ThoughtDraft};

use crate::dbs::mongo::models::MongoThought;
use crate::dbs::mongo::repositories::MongoThoughtRepository;
use crate::error::Result;
use crate::store::ThoughtStore;

pub struct MongoThoughtStore {
    thought_repo: MongoThoughtRepository,
}

impl MongoThoughtStore {
    pub fn new(thought_repo: MongoThoughtRepository) -> Self {
        Self { thought_repo }
    }
}

/// Ids that are not ObjectIds cannot name a stored thought
fn parse_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

#[async_trait]
impl ThoughtStore for MongoThoughtStore {
    async fn create(&self, draft: ThoughtDraft) -> Result<Thought> {
        let (content, secondary_text) = draft.into_parts();
        let thought = MongoThought {
            id: ObjectId::new(),
            content,
            secondary_text,
            resonance_count: 0,
            // millisecond precision, same as what comes back from the server
            created_at: bson::DateTime::now().to_chrono(),
        };

        let thought = self.thought_repo.insert(thought).await?;
        tracing::debug!(id = %thought.id, "Thought inserted");
        Ok(thought.into())
    }

    async fn find_page(&self, plan: FetchPlan) -> Result<Vec<Thought>> {
        let skip = plan.skip.min(i64::MAX as u64);
        let limit = i64::try_from(plan.limit).unwrap_or(i64::MAX);

        let thoughts = self
            .thought_repo
            .find_page(plan.direction.order(), skip, limit)
            .await?;
        Ok(thoughts.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Thought>> {
        let Some(object_id) = parse_id(id) else {
            return Ok(None);
        };
        let thought = self.thought_repo.find_by_id(object_id).await?;
        Ok(thought.map(Into::into))
    }

    async fn update_content(&self, id: &str, draft: ThoughtDraft) -> Result<Option<Thought>> {
        let Some(object_id) = parse_id(id) else {
            return Ok(None);
        };
        let (content, secondary_text) = draft.into_parts();
        let thought = self
            .thought_repo
            .update_content(object_id, content, secondary_text)
            .await?;
        Ok(thought.map(Into::into))
    }

    async fn increment(&self, id: &str) -> Result<Option<Thought>> {
        let Some(object_id) = parse_id(id) else {
            return Ok(None);
        };
        let thought = self.thought_repo.increment_resonance(object_id).await?;
        Ok(thought.map(Into::into))
    }

    async fn delete(&self, id: &str) -> Result<Option<Thought>> {
        let Some(object_id) = parse_id(id) else {
            return Ok(None);
        };
        let thought = self.thought_repo.delete(object_id).await?;
        Ok(thought.map(Into::into))
    }

    async fn ping(&self) -> Result<()> {
        self.thought_repo.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_rejects_non_object_ids() {
        assert!(parse_id("not-an-id").is_none());
        assert!(parse_id("").is_none());
        assert!(parse_id("65a1f0c2e4b0a1b2c3d4e5f6").is_some());
    }

    #[test]
    fn test_document_converts_to_thought() {
        let id = ObjectId::new();
        let created_at = bson::DateTime::now().to_chrono();
        let thought: Thought = MongoThought {
            id,
            content: "Hello world".to_string(),
            secondary_text: None,
            resonance_count: 3,
            created_at,
        }
        .into();

        assert_eq!(thought.id, id.to_hex());
        assert_eq!(thought.resonance_count, 3);
        assert_eq!(thought.created_at, created_at);
    }
}
