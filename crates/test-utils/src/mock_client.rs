// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Mock client implementation for testing
//!
//! Responses are scripted by SQL fragment with a builder pattern; every
//! executed statement is recorded for later assertions.

use sqltools_clickhouse_driver::{
    ClickHouseDriver, Client, Connector, DriverConfig, DriverResult,
};
use sqltools_clickhouse_model::{ConnectionCredentials, QueryError, Row};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

type Outcome = Result<Vec<Row>, QueryError>;

/// In-memory client answering from a script
#[derive(Debug, Default)]
pub struct MockClient {
    /// (SQL fragment, outcome); first match wins
    script: Vec<(String, Outcome)>,
    executed: Mutex<Vec<String>>,
}

impl MockClient {
    /// Create a client answering every query with zero rows
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer queries containing `fragment` with `rows`
    pub fn respond(mut self, fragment: impl Into<String>, rows: Vec<Row>) -> Self {
        self.script.push((fragment.into(), Ok(rows)));
        self
    }

    /// Fail queries containing `fragment` with `error`
    pub fn fail(mut self, fragment: impl Into<String>, error: QueryError) -> Self {
        self.script.push((fragment.into(), Err(error)));
        self
    }

    /// Every SQL text executed so far, in order
    pub fn executed(&self) -> Vec<String> {
        self.log().clone()
    }

    /// Number of executed statements
    pub fn execution_count(&self) -> usize {
        self.log().len()
    }

    fn log(&self) -> MutexGuard<'_, Vec<String>> {
        // A panicking test thread must not hide the log from the others.
        self.executed.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait::async_trait]
impl Client for MockClient {
    async fn execute(&self, sql: &str) -> Result<Vec<Row>, QueryError> {
        self.log().push(sql.to_string());
        self.script
            .iter()
            .find(|(fragment, _)| sql.contains(fragment.as_str()))
            .map(|(_, outcome)| outcome.clone())
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Connector handing out one shared [`MockClient`]
#[derive(Debug)]
pub struct MockConnector {
    client: Arc<MockClient>,
    connects: AtomicUsize,
}

impl MockConnector {
    pub fn new(client: MockClient) -> Self {
        Self {
            client: Arc::new(client),
            connects: AtomicUsize::new(0),
        }
    }

    /// The shared client
    pub fn client(&self) -> &MockClient {
        &self.client
    }

    /// How many handles were built
    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

impl Connector for MockConnector {
    fn connect(&self, _credentials: &ConnectionCredentials) -> DriverResult<Arc<dyn Client>> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(self.client.clone())
    }
}

/// Driver over `client`, connected to database `shop` as connection `test`
pub fn mock_driver(client: MockClient) -> (ClickHouseDriver, Arc<MockConnector>) {
    let credentials = ConnectionCredentials::default()
        .with_name("test")
        .with_database("shop");
    let connector = Arc::new(MockConnector::new(client));
    let driver = ClickHouseDriver::new(DriverConfig::new(credentials), connector.clone());
    (driver, connector)
}
