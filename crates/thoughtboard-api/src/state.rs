use std::sync::Arc;

use thoughtboard_persist::ThoughtStore;

use crate::config::Config;
use crate::service::ThoughtService;

/// Shared application state passed to all handlers
///
/// The store is built once in `main` and injected here; handlers never
/// reach it any other way.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub thoughts: ThoughtService,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn ThoughtStore>) -> Self {
        let thoughts = ThoughtService::new(store, config.thoughts.clone(), config.pagination.clone());
        Self {
            config: Arc::new(config),
            thoughts,
        }
    }
}
