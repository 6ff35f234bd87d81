use std::time::Duration;

use mongodb::{options::ClientOptions, Client};

use crate::dbs::mongo::{repositories::MongoThoughtRepository, MongoThoughtStore};
use crate::error::{PersistError, Result};

pub struct MongoStoreBuilder {
    mongodb_uri: Option<String>,
    database: Option<String>,
    collection: String,
    pool_size: Option<u32>,
    timeout_ms: Option<u64>,
    unique_content: bool,
}

impl MongoStoreBuilder {
    pub fn new() -> Self {
        Self {
            mongodb_uri: None,
            database: None,
            collection: "thoughts".to_string(),
            pool_size: None,
            timeout_ms: None,
            unique_content: false,
        }
    }

    pub fn mongodb_uri(mut self, uri: impl Into<String>) -> Self {
        self.mongodb_uri = Some(uri.into());
        self
    }

    pub fn database(mut self, db: impl Into<String>) -> Self {
        self.database = Some(db.into());
        self
    }

    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn pool_size(mut self, size: u32) -> Self {
        self.pool_size = Some(size);
        self
    }

    /// Server selection timeout
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn unique_content(mut self, unique: bool) -> Self {
        self.unique_content = unique;
        self
    }

    /// Connect and make sure the indexes exist
    pub async fn build(self) -> Result<MongoThoughtStore> {
        let mongodb_uri = self
            .mongodb_uri
            .ok_or_else(|| PersistError::Internal("mongodb_uri is required".to_string()))?;
        let database = self
            .database
            .ok_or_else(|| PersistError::Internal("database is required".to_string()))?;

        let mut options = ClientOptions::parse(&mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;
        options.app_name = Some("thoughtboard".to_string());
        if let Some(size) = self.pool_size {
            options.max_pool_size = Some(size);
        }
        if let Some(timeout_ms) = self.timeout_ms {
            options.server_selection_timeout = Some(Duration::from_millis(timeout_ms));
        }

        let client = Client::with_options(options).map_err(|e| PersistError::Connection(e.to_string()))?;

        let thought_repo = MongoThoughtRepository::new(&client, &database, &self.collection);
        thought_repo.ensure_indexes(self.unique_content).await?;

        tracing::info!(
            database = %database,
            collection = %self.collection,
            unique_content = self.unique_content,
            "MongoDB thought store ready"
        );

        Ok(MongoThoughtStore::new(thought_repo))
    }
}

impl Default for MongoStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
