pub mod error;
pub mod store;
pub mod dbs;
#[cfg(feature = "mongodb")]
pub mod builder;

pub use error::{PersistError, Result};
pub use store::ThoughtStore;
pub use dbs::memory::MemoryThoughtStore;
#[cfg(feature = "mongodb")]
pub use dbs::mongo::MongoThoughtStore;
#[cfg(feature = "mongodb")]
pub use builder::MongoStoreBuilder;

pub use thoughtboard_types::{FetchPlan, SortDirection, Thought, ThoughtDraft};
