// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # ClickHouse driver
//!
//! Ties the gateway, the normalizer and the catalog together behind the
//! [`ConnectionDriver`] contract.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sqltools_clickhouse_driver::{ClickHouseDriver, ConnectionDriver, DriverConfig, QueryOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let driver = ClickHouseDriver::connect_http(DriverConfig::default())?;
//!     driver.test_connection().await?;
//!
//!     let results = driver.query("SELECT version() AS v", QueryOptions::default()).await;
//!     println!("{:?}", results[0].results);
//!     Ok(())
//! }
//! ```

use crate::client::{Client, Connector};
use crate::config::DriverConfig;
use crate::error::{DriverError, DriverResult};
use crate::gateway::Gateway;
use crate::normalize::normalize;
use crate::r#trait::{ConnectionDriver, QueryOptions};
use crate::search::ExtraSearchParams;
use crate::tree::ChildrenRequest;
use async_trait::async_trait;
use sqltools_clickhouse_catalog::{ClickHouseQueries, QueryCatalog, TableTarget};
use sqltools_clickhouse_model::{
    ContextValue, QueryError, ResultEnvelope, Row, SearchItem, StaticCompletions, TreeNode, Value,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Driver for one ClickHouse connection
pub struct ClickHouseDriver {
    config: DriverConfig,
    conn_id: String,
    gateway: Gateway,
    queries: Arc<dyn QueryCatalog>,
}

impl ClickHouseDriver {
    /// Create a driver building its client through `connector`
    pub fn new(config: DriverConfig, connector: Arc<dyn Connector>) -> Self {
        let conn_id = config.connection_id();
        let gateway = Gateway::new(config.credentials.clone(), connector);
        Self {
            config,
            conn_id,
            gateway,
            queries: Arc::new(ClickHouseQueries),
        }
    }

    /// Like [`ClickHouseDriver::new`], rejecting an invalid configuration
    pub fn try_new(config: DriverConfig, connector: Arc<dyn Connector>) -> DriverResult<Self> {
        config.validate()?;
        Ok(Self::new(config, connector))
    }

    /// Create a driver speaking the ClickHouse HTTP interface
    #[cfg(feature = "http")]
    pub fn connect_http(config: DriverConfig) -> DriverResult<Self> {
        let connector = Arc::new(crate::http::HttpConnector::new(config.http.clone()));
        Self::try_new(config, connector)
    }

    /// Builder method: replace the metadata query catalog
    pub fn with_queries(mut self, queries: Arc<dyn QueryCatalog>) -> Self {
        self.queries = queries;
        self
    }

    /// Identifier stamped on every envelope
    pub fn conn_id(&self) -> &str {
        &self.conn_id
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn queries(&self) -> &dyn QueryCatalog {
        self.queries.as_ref()
    }

    /// Whether a client handle is currently held
    pub async fn is_open(&self) -> bool {
        self.gateway.is_open().await
    }

    /// Execute SQL text and wrap the outcome.
    ///
    /// Opens the connection if needed; a handle that cannot be built is
    /// reported in the envelope like any other failure.
    pub async fn execute(&self, sql: &str, request_id: Option<String>) -> ResultEnvelope {
        if self.config.log_queries {
            info!(conn_id = %self.conn_id, "Executing query: {}", sql);
        } else {
            debug!(conn_id = %self.conn_id, "Executing query: {}", sql);
        }

        let outcome = match self.gateway.open().await {
            Ok(client) => client.execute(sql).await,
            Err(e) => Err(QueryError::new(e.to_string())),
        };
        normalize(&self.conn_id, sql, outcome).with_request_id(request_id)
    }

    /// Rows of a metadata query; empty when it fails
    pub(crate) async fn fetch_rows(&self, sql: &str) -> Vec<Row> {
        self.execute(sql, None).await.results
    }

    /// Server-side description of a table
    pub async fn describe_table(&self, target: &TableTarget) -> Vec<ResultEnvelope> {
        vec![self.execute(&self.queries.describe_table(target), None).await]
    }

    /// One page of a table's rows
    pub async fn show_records(
        &self,
        target: &TableTarget,
        limit: u32,
        offset: u32,
    ) -> Vec<ResultEnvelope> {
        let sql = self.queries.fetch_records(target, limit, offset);
        vec![self.execute(&sql, None).await]
    }

    /// Row count of a table, `None` when the count query fails
    pub async fn count_records(&self, target: &TableTarget) -> Option<u64> {
        let envelope = self.execute(&self.queries.count_records(target), None).await;
        match envelope.results.first()?.get("total")? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

#[async_trait]
impl ConnectionDriver for ClickHouseDriver {
    async fn open(&self) -> DriverResult<Arc<dyn Client>> {
        self.gateway.open().await
    }

    async fn close(&self) {
        self.gateway.close().await
    }

    async fn query(&self, sql: &str, options: QueryOptions) -> Vec<ResultEnvelope> {
        vec![self.execute(sql, options.request_id).await]
    }

    async fn test_connection(&self) -> DriverResult<()> {
        self.gateway.open().await?;

        let database = &self.config.credentials.database;
        let probe = self.execute(&self.queries.probe_database(database), None).await;
        let verdict = verify_probe(database, &probe);

        self.gateway.close().await;
        verdict
    }

    async fn get_children_for_item(&self, request: ChildrenRequest) -> Vec<TreeNode> {
        self.resolve_children(&request).await
    }

    async fn search_items(
        &self,
        item_type: ContextValue,
        search: &str,
        extra: ExtraSearchParams,
    ) -> Vec<SearchItem> {
        self.resolve_search(item_type, search, extra).await
    }

    async fn get_static_completions(&self) -> StaticCompletions {
        StaticCompletions::new()
    }
}

/// Accept a database probe only when it matched exactly one database
fn verify_probe(database: &str, probe: &ResultEnvelope) -> DriverResult<()> {
    if let Some(error) = &probe.error {
        return Err(DriverError::Verification(format!(
            "Cannot get database list: {}",
            error
        )));
    }

    match probe.row_count() {
        1 => Ok(()),
        0 => Err(DriverError::Verification(format!(
            "Cannot find {} database",
            database
        ))),
        n => Err(DriverError::Verification(format!(
            "Database name {} is ambiguous: {} databases match",
            database, n
        ))),
    }
}
