use async_trait::async_trait;
use thoughtboard_types::{FetchPlan, Thought, ThoughtDraft};

use crate::error::Result;

/// Storage operations for thoughts
///
/// Implementations own all write serialization: callers never read a value
/// and write it back. An id that is malformed for the backend is reported
/// the same way as an id that does not exist (`Ok(None)`).
#[async_trait]
pub trait ThoughtStore: Send + Sync {
    /// Persist a new thought with a fresh id, `created_at` now and a zero count.
    /// Fails with `PersistError::Conflict` when uniqueness is violated.
    async fn create(&self, draft: ThoughtDraft) -> Result<Thought>;

    /// At most `plan.limit` thoughts ordered by `created_at`, after skipping `plan.skip`
    async fn find_page(&self, plan: FetchPlan) -> Result<Vec<Thought>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Thought>>;

    /// Replace the content, and the secondary text when the draft has one.
    /// Leaves `resonance_count` and `created_at` untouched.
    async fn update_content(&self, id: &str, draft: ThoughtDraft) -> Result<Option<Thought>>;

    /// Add one to `resonance_count` in a single store operation and return
    /// the thought as it is after the increment
    async fn increment(&self, id: &str) -> Result<Option<Thought>>;

    /// Remove a thought, returning what was removed
    async fn delete(&self, id: &str) -> Result<Option<Thought>>;

    /// Check that the backend is reachable
    async fn ping(&self) -> Result<()>;
}
