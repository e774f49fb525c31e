// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Connection credentials

use serde::{Deserialize, Serialize};
use std::fmt;

/// Transport protocol of the ClickHouse HTTP interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Http,
    Https,
}

impl Protocol {
    /// URL scheme for this protocol
    pub fn scheme(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

/// Everything needed to construct a client handle.
///
/// Immutable for the lifetime of a connection.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionCredentials {
    /// Display name of the connection
    pub name: String,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub protocol: Protocol,
}

impl Default for ConnectionCredentials {
    fn default() -> Self {
        Self {
            name: String::new(),
            host: "localhost".to_string(),
            port: 8123,
            database: "default".to_string(),
            user: "default".to_string(),
            password: String::new(),
            protocol: Protocol::Http,
        }
    }
}

impl ConnectionCredentials {
    /// Create credentials for `host:port`, keeping the other defaults
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Builder method: set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder method: set the database
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Builder method: set user and password
    pub fn with_user(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = user.into();
        self.password = password.into();
        self
    }

    /// Builder method: set the protocol
    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Base URL of the HTTP interface, e.g. `http://localhost:8123/`
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}/", self.protocol, self.host, self.port)
    }
}

// Keep the password out of logs.
impl fmt::Debug for ConnectionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionCredentials")
            .field("name", &self.name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .field("protocol", &self.protocol)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let creds = ConnectionCredentials::default();
        assert_eq!(creds.host, "localhost");
        assert_eq!(creds.port, 8123);
        assert_eq!(creds.database, "default");
        assert_eq!(creds.user, "default");
        assert_eq!(creds.protocol, Protocol::Http);
    }

    #[test]
    fn test_base_url() {
        let creds = ConnectionCredentials::new("ch.internal", 8443).with_protocol(Protocol::Https);
        assert_eq!(creds.base_url(), "https://ch.internal:8443/");
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = ConnectionCredentials::default().with_user("admin", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_deserialize_partial() {
        let creds: ConnectionCredentials =
            serde_json::from_str(r#"{"host":"db","database":"analytics","protocol":"https"}"#)
                .unwrap();
        assert_eq!(creds.host, "db");
        assert_eq!(creds.port, 8123);
        assert_eq!(creds.database, "analytics");
        assert_eq!(creds.protocol, Protocol::Https);
    }
}
