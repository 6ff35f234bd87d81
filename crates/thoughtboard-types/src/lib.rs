pub mod thought;
pub mod rules;
pub mod validation;
pub mod pagination;

pub use thought::{RawThought, Thought, ThoughtDraft};
pub use rules::{FieldRule, RulesError, ThoughtRules, THOUGHT_RULES_SCHEMA_VERSION};
pub use validation::ValidationError;
pub use pagination::{FetchPlan, PaginationConfig, SortDirection};
