use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use thoughtboard_types::{FetchPlan, SortDirection, Thought, ThoughtDraft};

use crate::error::{PersistError, Result};
use crate::store::ThoughtStore;

/// Process-local store, for development and tests.
///
/// Every mutation takes the write lock, which is what makes `increment`
/// atomic here.
pub struct MemoryThoughtStore {
    unique_content: bool,
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    next_seq: u64,
    thoughts: HashMap<String, Entry>,
}

struct Entry {
    /// Insertion order, breaks `created_at` ties
    seq: u64,
    thought: Thought,
}

impl MemoryState {
    fn content_taken(&self, content: &str, except: Option<&str>) -> bool {
        self.thoughts
            .values()
            .any(|e| e.thought.content == content && Some(e.thought.id.as_str()) != except)
    }
}

impl MemoryThoughtStore {
    pub fn new() -> Self {
        Self {
            unique_content: false,
            state: RwLock::new(MemoryState::default()),
        }
    }

    pub fn with_unique_content(mut self, unique: bool) -> Self {
        self.unique_content = unique;
        self
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.thoughts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryThoughtStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ThoughtStore for MemoryThoughtStore {
    async fn create(&self, draft: ThoughtDraft) -> Result<Thought> {
        let mut state = self.state.write().await;

        if self.unique_content && state.content_taken(draft.content(), None) {
            return Err(PersistError::conflict("content"));
        }

        let (content, secondary_text) = draft.into_parts();
        let thought = Thought {
            id: uuid::Uuid::new_v4().to_string(),
            content,
            secondary_text,
            resonance_count: 0,
            created_at: Utc::now(),
        };

        let seq = state.next_seq;
        state.next_seq += 1;
        state.thoughts.insert(
            thought.id.clone(),
            Entry {
                seq,
                thought: thought.clone(),
            },
        );

        tracing::debug!(id = %thought.id, "Thought stored in memory");
        Ok(thought)
    }

    async fn find_page(&self, plan: FetchPlan) -> Result<Vec<Thought>> {
        let state = self.state.read().await;

        let mut entries: Vec<&Entry> = state.thoughts.values().collect();
        entries.sort_by_key(|e| (e.thought.created_at, e.seq));
        if plan.direction == SortDirection::Descending {
            entries.reverse();
        }

        let skip = usize::try_from(plan.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(plan.limit).unwrap_or(usize::MAX);

        Ok(entries
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|e| e.thought.clone())
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Thought>> {
        let state = self.state.read().await;
        Ok(state.thoughts.get(id).map(|e| e.thought.clone()))
    }

    async fn update_content(&self, id: &str, draft: ThoughtDraft) -> Result<Option<Thought>> {
        let mut state = self.state.write().await;

        if !state.thoughts.contains_key(id) {
            return Ok(None);
        }
        if self.unique_content && state.content_taken(draft.content(), Some(id)) {
            return Err(PersistError::conflict("content"));
        }

        let (content, secondary_text) = draft.into_parts();
        Ok(state.thoughts.get_mut(id).map(|entry| {
            entry.thought.content = content;
            if secondary_text.is_some() {
                entry.thought.secondary_text = secondary_text;
            }
            entry.thought.clone()
        }))
    }

    async fn increment(&self, id: &str) -> Result<Option<Thought>> {
        let mut state = self.state.write().await;
        Ok(state.thoughts.get_mut(id).map(|entry| {
            entry.thought.resonance_count = entry.thought.resonance_count.saturating_add(1);
            entry.thought.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<Option<Thought>> {
        let mut state = self.state.write().await;
        Ok(state.thoughts.remove(id).map(|e| e.thought))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use thoughtboard_types::{RawThought, ThoughtRules};

    fn draft(content: &str) -> ThoughtDraft {
        ThoughtRules::default().validate(RawThought::new(content)).unwrap()
    }

    fn plan(direction: SortDirection, skip: u64, limit: u64) -> FetchPlan {
        FetchPlan {
            direction,
            page: skip / limit.max(1) + 1,
            skip,
            limit,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_zero_count() {
        let store = MemoryThoughtStore::new();
        let thought = store.create(draft("Hello world")).await.unwrap();

        assert!(!thought.id.is_empty());
        assert_eq!(thought.resonance_count, 0);
        assert_eq!(store.find_by_id(&thought.id).await.unwrap(), Some(thought));
    }

    #[tokio::test]
    async fn test_unique_content_conflicts() {
        let store = MemoryThoughtStore::new().with_unique_content(true);
        store.create(draft("Hello world")).await.unwrap();

        let err = store.create(draft("Hello world")).await.unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_duplicates_allowed_without_uniqueness() {
        let store = MemoryThoughtStore::new();
        store.create(draft("Hello world")).await.unwrap();
        store.create(draft("Hello world")).await.unwrap();
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_update_to_own_content_is_not_a_conflict() {
        let store = MemoryThoughtStore::new().with_unique_content(true);
        let thought = store.create(draft("Hello world")).await.unwrap();
        let other = store.create(draft("Other thought")).await.unwrap();

        assert!(store.update_content(&thought.id, draft("Hello world")).await.is_ok());
        let err = store.update_content(&other.id, draft("Hello world")).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_find_page_orders_and_windows() {
        let store = MemoryThoughtStore::new();
        for i in 0..5 {
            store.create(draft(&format!("thought {i}"))).await.unwrap();
        }

        let newest = store.find_page(plan(SortDirection::Descending, 0, 2)).await.unwrap();
        let contents: Vec<&str> = newest.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["thought 4", "thought 3"]);

        let oldest = store.find_page(plan(SortDirection::Ascending, 1, 2)).await.unwrap();
        let contents: Vec<&str> = oldest.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["thought 1", "thought 2"]);

        let beyond = store.find_page(plan(SortDirection::Descending, 10, 2)).await.unwrap();
        assert!(beyond.is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_count_and_created_at() {
        let store = MemoryThoughtStore::new();
        let thought = store.create(draft("Hello world")).await.unwrap();
        store.increment(&thought.id).await.unwrap();

        let updated = store
            .update_content(&thought.id, draft("Goodbye world"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.content, "Goodbye world");
        assert_eq!(updated.resonance_count, 1);
        assert_eq!(updated.created_at, thought.created_at);
    }

    #[tokio::test]
    async fn test_missing_ids_return_none() {
        let store = MemoryThoughtStore::new();
        assert!(store.find_by_id("nope").await.unwrap().is_none());
        assert!(store.increment("nope").await.unwrap().is_none());
        assert!(store.update_content("nope", draft("Hello world")).await.unwrap().is_none());
        assert!(store.delete("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let store = MemoryThoughtStore::new();
        let thought = store.create(draft("Hello world")).await.unwrap();

        assert_eq!(store.delete(&thought.id).await.unwrap(), Some(thought.clone()));
        assert_eq!(store.delete(&thought.id).await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_not_lost() {
        let store = Arc::new(MemoryThoughtStore::new());
        let thought = store.create(draft("Hello world")).await.unwrap();

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let store = Arc::clone(&store);
                let id = thought.id.clone();
                tokio::spawn(async move { store.increment(&id).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = store.find_by_id(&thought.id).await.unwrap().unwrap();
        assert_eq!(stored.resonance_count, 50);
    }
}
