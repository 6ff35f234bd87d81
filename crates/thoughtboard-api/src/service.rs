use std::sync::Arc;

use serde_json::Value;

use thoughtboard_persist::{PersistError, ThoughtStore};
use thoughtboard_types::{FetchPlan, PaginationConfig, Thought, ThoughtRules};

use crate::error::{ApiError, ApiResult};

/// Thought operations shared by the HTTP handlers.
///
/// Holds no mutable state of its own; every write goes straight to the store.
#[derive(Clone)]
pub struct ThoughtService {
    store: Arc<dyn ThoughtStore>,
    rules: Arc<ThoughtRules>,
    pagination: PaginationConfig,
}

impl ThoughtService {
    pub fn new(store: Arc<dyn ThoughtStore>, rules: ThoughtRules, pagination: PaginationConfig) -> Self {
        Self {
            store,
            rules: Arc::new(rules),
            pagination,
        }
    }

    pub fn rules(&self) -> &ThoughtRules {
        &self.rules
    }

    /// Validate a request body and store it as a new thought
    pub async fn create(&self, body: &Value) -> ApiResult<Thought> {
        let draft = self.rules.draft_from_json(body)?;

        let thought = self
            .store
            .create(draft)
            .await
            .map_err(|e| self.translate(e))?;

        tracing::info!(id = %thought.id, "Thought created");
        Ok(thought)
    }

    /// Resolve raw query values and fetch exactly that page
    pub async fn list(
        &self,
        sort: Option<&str>,
        page: Option<&str>,
        per_page: Option<&str>,
    ) -> ApiResult<(FetchPlan, Vec<Thought>)> {
        let plan = self.pagination.resolve(sort, page, per_page);
        let thoughts = self.store.find_page(plan).await?;

        tracing::debug!(
            sort = plan.direction.as_str(),
            skip = plan.skip,
            limit = plan.limit,
            returned = thoughts.len(),
            "Thoughts listed"
        );
        Ok((plan, thoughts))
    }

    pub async fn get(&self, id: &str) -> ApiResult<Thought> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::ThoughtNotFound(id.to_string()))
    }

    /// Replace content fields only; the counter and creation time stay as they are
    pub async fn update(&self, id: &str, body: &Value) -> ApiResult<Thought> {
        let draft = self.rules.draft_from_json(body)?;

        let thought = self
            .store
            .update_content(id, draft)
            .await
            .map_err(|e| self.translate(e))?
            .ok_or_else(|| ApiError::ThoughtNotFound(id.to_string()))?;

        tracing::info!(id = %thought.id, "Thought updated");
        Ok(thought)
    }

    /// Add one to the resonance count through the store's atomic increment
    pub async fn score(&self, id: &str) -> ApiResult<Thought> {
        let thought = self
            .store
            .increment(id)
            .await?
            .ok_or_else(|| ApiError::ThoughtNotFound(id.to_string()))?;

        tracing::debug!(id = %thought.id, resonance_count = thought.resonance_count, "Thought scored");
        Ok(thought)
    }

    pub async fn delete(&self, id: &str) -> ApiResult<Thought> {
        let thought = self
            .store
            .delete(id)
            .await?
            .ok_or_else(|| ApiError::ThoughtNotFound(id.to_string()))?;

        tracing::info!(id = %thought.id, "Thought deleted");
        Ok(thought)
    }

    pub async fn ping(&self) -> ApiResult<()> {
        Ok(self.store.ping().await?)
    }

    /// Report store conflicts under the configured content field name
    fn translate(&self, error: PersistError) -> ApiError {
        match error {
            PersistError::Conflict { .. } => ApiError::Conflict {
                field: self.rules.content.field.clone(),
            },
            other => ApiError::Persist(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use thoughtboard_persist::MemoryThoughtStore;
    use thoughtboard_types::{FieldRule, SortDirection, ValidationError};

    fn service_with(store: MemoryThoughtStore, rules: ThoughtRules) -> ThoughtService {
        ThoughtService::new(Arc::new(store), rules, PaginationConfig::default())
    }

    fn service() -> ThoughtService {
        service_with(MemoryThoughtStore::new(), ThoughtRules::default())
    }

    #[tokio::test]
    async fn test_create_then_score() {
        let service = service();
        let thought = service.create(&json!({ "content": "Hello world" })).await.unwrap();
        assert_eq!(thought.resonance_count, 0);

        for expected in 1..=3 {
            let scored = service.score(&thought.id).await.unwrap();
            assert_eq!(scored.resonance_count, expected);
        }
    }

    #[tokio::test]
    async fn test_invalid_body_never_reaches_store() {
        let store = Arc::new(MemoryThoughtStore::new());
        let service = ThoughtService::new(store.clone(), ThoughtRules::default(), PaginationConfig::default());

        let err = service.create(&json!({ "content": "Hi" })).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(ValidationError::TooShort { .. })));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_conflict_uses_configured_field_name() {
        let rules = ThoughtRules::new(FieldRule::new("name", 2, 15).with_unique(true));
        let service = service_with(MemoryThoughtStore::new().with_unique_content(true), rules);

        service.create(&json!({ "name": "duplicate" })).await.unwrap();
        let err = service.create(&json!({ "name": "duplicate" })).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict { ref field } if field == "name"));
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() {
        let service = service();
        assert!(matches!(service.get("missing").await, Err(ApiError::ThoughtNotFound(_))));
        assert!(matches!(service.score("missing").await, Err(ApiError::ThoughtNotFound(_))));
        assert!(matches!(service.delete("missing").await, Err(ApiError::ThoughtNotFound(_))));
        assert!(matches!(
            service.update("missing", &json!({ "content": "Hello world" })).await,
            Err(ApiError::ThoughtNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_validates_before_lookup() {
        let service = service();
        let err = service.update("missing", &json!({ "content": "" })).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(ValidationError::Required { .. })));
    }

    #[tokio::test]
    async fn test_list_honors_resolved_plan() {
        let service = service();
        for i in 0..25 {
            service.create(&json!({ "content": format!("thought {i:02}") })).await.unwrap();
        }

        let (plan, thoughts) = service.list(Some("asc"), Some("3"), Some("10")).await.unwrap();
        assert_eq!(plan.direction, SortDirection::Ascending);
        assert_eq!(plan.skip, 20);
        let contents: Vec<&str> = thoughts.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["thought 20", "thought 21", "thought 22", "thought 23", "thought 24"]);
    }
}
