//! Store connection configuration.

use std::env;
use std::time::Duration;

use mongodb::options::ClientOptions;

use crate::error::{MongoError, MongoResult};

/// Environment variable holding the MongoDB URI.
pub const ENV_DB_URL: &str = "PODCAT_DB_URL";

/// Environment variable holding the database name.
pub const ENV_DB_NAME: &str = "PODCAT_DB_NAME";

/// Environment variable holding the application name reported to the server.
pub const ENV_APP_NAME: &str = "PODCAT_APP_NAME";

const DEFAULT_URI: &str = "mongodb://localhost:27017";
const DEFAULT_APP_NAME: &str = "podcat";

/// Store connection configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// MongoDB connection URI.
    pub uri: String,
    /// Database name.
    pub database: String,
    /// Application name (shown in server logs).
    pub app_name: Option<String>,
    /// Minimum connection pool size.
    pub min_pool_size: Option<u32>,
    /// Maximum connection pool size.
    pub max_pool_size: Option<u32>,
    /// Maximum idle time for connections.
    pub max_idle_time: Option<Duration>,
    /// Connection timeout.
    pub connect_timeout: Option<Duration>,
    /// Server selection timeout.
    pub server_selection_timeout: Option<Duration>,
    /// Retry writes.
    pub retry_writes: Option<bool>,
    /// Retry reads.
    pub retry_reads: Option<bool>,
    /// Direct connection (bypass replica set discovery).
    pub direct_connection: Option<bool>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_URI.to_string(),
            database: String::new(),
            app_name: Some(DEFAULT_APP_NAME.to_string()),
            min_pool_size: None,
            max_pool_size: Some(10),
            max_idle_time: Some(Duration::from_secs(300)),
            connect_timeout: Some(Duration::from_secs(10)),
            server_selection_timeout: Some(Duration::from_secs(30)),
            retry_writes: Some(true),
            retry_reads: Some(true),
            direct_connection: None,
        }
    }
}

impl StoreConfig {
    /// Create a new configuration from a MongoDB URI.
    pub fn from_uri(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    /// Read the configuration from `PODCAT_DB_URL`, `PODCAT_DB_NAME` and
    /// `PODCAT_APP_NAME`.
    pub fn from_env() -> MongoResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> MongoResult<Self> {
        let mut builder = Self::builder();

        if let Some(uri) = lookup(ENV_DB_URL) {
            builder = builder.uri(uri);
        }
        if let Some(database) = lookup(ENV_DB_NAME) {
            builder = builder.database(database);
        }
        if let Some(app_name) = lookup(ENV_APP_NAME) {
            builder = builder.app_name(app_name);
        }

        builder.build()
    }

    /// Create a builder for configuration.
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::new()
    }

    /// Convert to MongoDB ClientOptions.
    pub async fn to_client_options(&self) -> MongoResult<ClientOptions> {
        let mut options = ClientOptions::parse(&self.uri)
            .await
            .map_err(|e| MongoError::config(format!("failed to parse URI: {}", e)))?;

        self.apply(&mut options);
        Ok(options)
    }

    /// Copy the configured settings onto parsed client options.
    pub fn apply(&self, options: &mut ClientOptions) {
        if let Some(ref app_name) = self.app_name {
            options.app_name = Some(app_name.clone());
        }
        if let Some(min_pool) = self.min_pool_size {
            options.min_pool_size = Some(min_pool);
        }
        if let Some(max_pool) = self.max_pool_size {
            options.max_pool_size = Some(max_pool);
        }
        if let Some(max_idle) = self.max_idle_time {
            options.max_idle_time = Some(max_idle);
        }
        if let Some(connect_timeout) = self.connect_timeout {
            options.connect_timeout = Some(connect_timeout);
        }
        if let Some(selection_timeout) = self.server_selection_timeout {
            options.server_selection_timeout = Some(selection_timeout);
        }
        if let Some(retry_writes) = self.retry_writes {
            options.retry_writes = Some(retry_writes);
        }
        if let Some(retry_reads) = self.retry_reads {
            options.retry_reads = Some(retry_reads);
        }
        if let Some(direct) = self.direct_connection {
            options.direct_connection = Some(direct);
        }
    }
}

/// Builder for store configuration.
#[derive(Debug, Default)]
pub struct StoreConfigBuilder {
    uri: Option<String>,
    database: Option<String>,
    app_name: Option<String>,
    min_pool_size: Option<u32>,
    max_pool_size: Option<u32>,
    max_idle_time: Option<Duration>,
    connect_timeout: Option<Duration>,
    server_selection_timeout: Option<Duration>,
    retry_writes: Option<bool>,
    retry_reads: Option<bool>,
    direct_connection: Option<bool>,
}

impl StoreConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the MongoDB URI.
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the database name.
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Set the application name.
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Set the minimum pool size.
    pub fn min_pool_size(mut self, size: u32) -> Self {
        self.min_pool_size = Some(size);
        self
    }

    /// Set the maximum pool size.
    pub fn max_pool_size(mut self, size: u32) -> Self {
        self.max_pool_size = Some(size);
        self
    }

    /// Set the maximum idle time for connections.
    pub fn max_idle_time(mut self, duration: Duration) -> Self {
        self.max_idle_time = Some(duration);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, duration: Duration) -> Self {
        self.connect_timeout = Some(duration);
        self
    }

    /// Set the server selection timeout.
    pub fn server_selection_timeout(mut self, duration: Duration) -> Self {
        self.server_selection_timeout = Some(duration);
        self
    }

    /// Enable or disable retry writes.
    pub fn retry_writes(mut self, enabled: bool) -> Self {
        self.retry_writes = Some(enabled);
        self
    }

    /// Enable or disable retry reads.
    pub fn retry_reads(mut self, enabled: bool) -> Self {
        self.retry_reads = Some(enabled);
        self
    }

    /// Enable direct connection (bypass replica set discovery).
    pub fn direct_connection(mut self, enabled: bool) -> Self {
        self.direct_connection = Some(enabled);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> MongoResult<StoreConfig> {
        let database = self
            .database
            .filter(|d| !d.is_empty())
            .ok_or_else(|| MongoError::config("database name is required"))?;

        let defaults = StoreConfig::default();
        Ok(StoreConfig {
            uri: self.uri.unwrap_or(defaults.uri),
            database,
            app_name: self.app_name.or(defaults.app_name),
            min_pool_size: self.min_pool_size,
            max_pool_size: self.max_pool_size.or(defaults.max_pool_size),
            max_idle_time: self.max_idle_time.or(defaults.max_idle_time),
            connect_timeout: self.connect_timeout.or(defaults.connect_timeout),
            server_selection_timeout: self
                .server_selection_timeout
                .or(defaults.server_selection_timeout),
            retry_writes: self.retry_writes.or(defaults.retry_writes),
            retry_reads: self.retry_reads.or(defaults.retry_reads),
            direct_connection: self.direct_connection,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_from_uri() {
        let config = StoreConfig::from_uri("mongodb://db:27017", "catalog");
        assert_eq!(config.uri, "mongodb://db:27017");
        assert_eq!(config.database, "catalog");
        assert_eq!(config.app_name.as_deref(), Some("podcat"));
    }

    #[test]
    fn test_config_builder() {
        let config = StoreConfig::builder()
            .uri("mongodb://localhost:27017")
            .database("catalog")
            .app_name("scraper")
            .max_pool_size(20)
            .retry_writes(false)
            .build()
            .unwrap();

        assert_eq!(config.database, "catalog");
        assert_eq!(config.app_name, Some("scraper".to_string()));
        assert_eq!(config.max_pool_size, Some(20));
        assert_eq!(config.retry_writes, Some(false));
        assert_eq!(config.retry_reads, Some(true));
    }

    #[test]
    fn test_config_builder_missing_database() {
        let result = StoreConfig::builder().uri("mongodb://localhost:27017").build();
        assert!(result.is_err());

        let result = StoreConfig::builder().database("").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (ENV_DB_URL, "mongodb://mongo:27017"),
            (ENV_DB_NAME, "podcasts"),
        ]
        .into_iter()
        .collect();

        let config = StoreConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.uri, "mongodb://mongo:27017");
        assert_eq!(config.database, "podcasts");
    }

    #[test]
    fn test_config_from_lookup_requires_database() {
        let err = StoreConfig::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, MongoError::Config(_)));
    }

    #[test]
    fn test_apply_overrides_options() {
        let config = StoreConfig::builder()
            .database("catalog")
            .max_pool_size(5)
            .direct_connection(true)
            .build()
            .unwrap();

        let mut options = ClientOptions::default();
        config.apply(&mut options);
        assert_eq!(options.max_pool_size, Some(5));
        assert_eq!(options.direct_connection, Some(true));
        assert_eq!(options.app_name.as_deref(), Some("podcat"));
    }
}
