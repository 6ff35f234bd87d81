use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use thoughtboard_types::{PaginationConfig, ThoughtRules};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub mongodb: MongoDbConfig,
    #[serde(default)]
    pub thoughts: ThoughtRules,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(default)]
    pub mongodb_uri: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Mongodb,
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MongoDbConfig {
    pub database: String,
    pub collection: String,
    pub pool_size: u32,
    pub timeout_ms: u64,
}

impl Default for MongoDbConfig {
    fn default() -> Self {
        Self {
            database: "happyThoughts".to_string(),
            collection: "thoughts".to_string(),
            pool_size: 10,
            timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. THOUGHTBOARD_-prefixed variables, `__` between sections
    ///    (e.g. THOUGHTBOARD_SERVER__PORT, THOUGHTBOARD_STORAGE__BACKEND)
    /// 4. PORT, MONGODB_URI / MONGO_URL
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("THOUGHTBOARD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;

        let mut cfg: Config = config.try_deserialize()?;

        if let Ok(port) = std::env::var("PORT") {
            cfg.server.port = port
                .parse()
                .map_err(|_| ConfigError::Message(format!("PORT is not a valid port: {}", port)))?;
        }

        // Load secrets from ENV (not in TOML)
        if let Ok(uri) = std::env::var("MONGODB_URI").or_else(|_| std::env::var("MONGO_URL")) {
            cfg.mongodb_uri = uri;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));

        let config = builder.build()?;
        let cfg: Config = config.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.backend == StorageBackend::Mongodb && self.mongodb_uri.is_empty() {
            return Err(ConfigError::Message(
                "MONGODB_URI environment variable is required for the mongodb backend".to_string(),
            ));
        }

        self.thoughts
            .check()
            .map_err(|e| ConfigError::Message(format!("Invalid [thoughts] rules: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thoughtboard_types::SortDirection;

    #[test]
    fn test_config_structure() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 3000

            [cors]
            enabled = true
            origins = ["http://localhost:3000"]

            [storage]
            backend = "memory"

            [mongodb]
            database = "test"
            pool_size = 5
            timeout_ms = 3000

            [thoughts]
            schema_version = 1

            [thoughts.content]
            field = "name"
            aliases = ["content"]
            min_len = 2
            max_len = 15
            unique = true

            [thoughts.secondary_text]
            field = "description"
            min_len = 2
            max_len = 15

            [pagination]
            default_per_page = 10
            default_sort = "asc"

            [logging]
            level = "debug"
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.mongodb.database, "test");
        assert_eq!(config.mongodb.collection, "thoughts");
        assert_eq!(config.thoughts.content.field, "name");
        assert!(config.thoughts.content_unique());
        assert_eq!(
            config.thoughts.secondary_text.as_ref().map(|r| r.max_len),
            Some(15)
        );
        assert_eq!(config.pagination.default_per_page, 10);
        assert_eq!(config.pagination.max_per_page, 100);
        assert_eq!(config.pagination.default_sort, SortDirection::Ascending);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.backend, StorageBackend::Mongodb);
        assert_eq!(config.thoughts, ThoughtRules::default());
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_mongodb_backend_requires_uri() {
        let config = Config::default();
        assert!(config.validate().is_err());

        let config = Config {
            mongodb_uri: "mongodb://localhost/happyThoughts".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_reads_test_profile() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/test.toml");
        let config = Config::from_file(path).unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.server.port, 8080);
        assert!(config.mongodb_uri.is_empty());
    }

    #[test]
    fn test_invalid_rules_are_rejected() {
        let mut config = Config {
            storage: StorageConfig {
                backend: StorageBackend::Memory,
            },
            ..Config::default()
        };
        config.thoughts.content.min_len = 500;
        assert!(config.validate().is_err());
    }
}
