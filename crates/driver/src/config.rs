// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Driver configuration
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use sqltools_clickhouse_driver::DriverConfig;
//!
//! let config = DriverConfig::from_settings(&json!({
//!     "name": "local",
//!     "server": "localhost",
//!     "port": 8123,
//!     "database": "default",
//!     "username": "default",
//! }))
//! .unwrap();
//! assert_eq!(config.connection_id(), "local|localhost:8123|default");
//! ```

use serde_json::Value;
use sqltools_clickhouse_model::{ConnectionCredentials, Protocol};
use std::time::Duration;

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP transport settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Whole-request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("sqltools-clickhouse/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Main driver configuration
#[derive(Debug, Clone, Default)]
pub struct DriverConfig {
    /// Where and as whom to connect
    pub credentials: ConnectionCredentials,

    /// Transport settings
    pub http: HttpClientConfig,

    /// Log every executed query at info level
    pub log_queries: bool,

    /// Explicit connection id; derived from the credentials when absent
    pub connection_id: Option<String>,
}

impl DriverConfig {
    /// Create a configuration for the given credentials
    pub fn new(credentials: ConnectionCredentials) -> Self {
        Self {
            credentials,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// Checks that host, database and user are set and the port is non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let creds = &self.credentials;

        if creds.host.trim().is_empty() {
            return Err(ConfigError::MissingField("host"));
        }

        if creds.port == 0 {
            return Err(ConfigError::InvalidField {
                field: "port",
                reason: "must be greater than 0".to_string(),
            });
        }

        if creds.database.trim().is_empty() {
            return Err(ConfigError::MissingField("database"));
        }

        if creds.user.trim().is_empty() {
            return Err(ConfigError::MissingField("user"));
        }

        if self.http.timeout.is_zero() {
            return Err(ConfigError::InvalidField {
                field: "requestTimeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Identifier stamped on every result envelope.
    ///
    /// Unnamed connections without an explicit id get a random one, so call
    /// this once per driver.
    pub fn connection_id(&self) -> String {
        if let Some(id) = &self.connection_id {
            return id.clone();
        }

        let creds = &self.credentials;
        let name = if creds.name.is_empty() {
            uuid::Uuid::new_v4().to_string()
        } else {
            creds.name.clone()
        };
        format!("{}|{}:{}|{}", name, creds.host, creds.port, creds.database)
    }

    /// Parse a SQLTools connection settings object.
    ///
    /// Expected shape (every field optional):
    /// {
    ///   "name": "...",
    ///   "server": "..." | "host": "...",
    ///   "port": 8123 | "8123",
    ///   "database": "...",
    ///   "username": "..." | "user": "...",
    ///   "password": "...",
    ///   "protocol": "http" | "https",
    ///   "requestTimeout": 30,
    ///   "logQueries": false,
    ///   "id": "..."
    /// }
    pub fn from_settings(settings: &Value) -> Result<Self, ConfigError> {
        let obj = settings.as_object().ok_or(ConfigError::NotAnObject)?;
        let mut config = Self::default();
        let creds = &mut config.credentials;

        if let Some(name) = string_field(obj, &["name"])? {
            creds.name = name;
        }
        if let Some(host) = string_field(obj, &["server", "host"])? {
            creds.host = host;
        }
        if let Some(port) = obj.get("port") {
            creds.port = parse_port(port)?;
        }
        if let Some(database) = string_field(obj, &["database"])? {
            creds.database = database;
        }
        if let Some(user) = string_field(obj, &["username", "user"])? {
            creds.user = user;
        }
        if let Some(password) = string_field(obj, &["password"])? {
            creds.password = password;
        }
        if let Some(protocol) = string_field(obj, &["protocol"])? {
            creds.protocol = match protocol.to_ascii_lowercase().as_str() {
                "http" => Protocol::Http,
                "https" => Protocol::Https,
                other => {
                    return Err(ConfigError::InvalidField {
                        field: "protocol",
                        reason: format!("expected 'http' or 'https', got '{}'", other),
                    });
                }
            };
        }

        if let Some(timeout) = obj.get("requestTimeout") {
            let secs = timeout.as_u64().ok_or_else(|| ConfigError::InvalidField {
                field: "requestTimeout",
                reason: "expected a number of seconds".to_string(),
            })?;
            config.http.timeout = Duration::from_secs(secs);
        }
        if let Some(log_queries) = obj.get("logQueries") {
            config.log_queries = log_queries.as_bool().unwrap_or(false);
        }
        config.connection_id = string_field(obj, &["id"])?;

        config.validate()?;
        Ok(config)
    }
}

/// First present key among `keys`, which must hold a string
fn string_field(
    obj: &serde_json::Map<String, Value>,
    keys: &[&'static str],
) -> Result<Option<String>, ConfigError> {
    for &key in keys {
        match obj.get(key) {
            None | Some(Value::Null) => continue,
            Some(Value::String(s)) => return Ok(Some(s.clone())),
            Some(_) => {
                return Err(ConfigError::InvalidField {
                    field: key,
                    reason: "expected a string".to_string(),
                });
            }
        }
    }
    Ok(None)
}

fn parse_port(value: &Value) -> Result<u16, ConfigError> {
    let port = match value {
        Value::Number(n) => n.as_u64().and_then(|p| u16::try_from(p).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    port.ok_or_else(|| ConfigError::InvalidField {
        field: "port",
        reason: format!("expected a port number, got {}", value),
    })
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Settings payload is not a JSON object
    #[error("Connection settings must be a JSON object")]
    NotAnObject,

    /// Required field missing or empty
    #[error("Missing required setting '{0}'")]
    MissingField(&'static str),

    /// Field present with an unusable value
    #[error("Invalid setting '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },
}
