// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Host-facing driver contract
//!
//! This module defines the async trait a SQL tooling host drives: connection
//! lifecycle, ad hoc queries, the connectivity self-test, schema tree
//! expansion and autocomplete search.

use crate::client::Client;
use crate::error::DriverResult;
use crate::search::ExtraSearchParams;
use crate::tree::ChildrenRequest;
use serde::{Deserialize, Serialize};
use sqltools_clickhouse_model::{
    ContextValue, ResultEnvelope, SearchItem, StaticCompletions, TreeNode,
};
use std::sync::Arc;

/// Per-query host options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryOptions {
    /// Echoed into the result envelope
    pub request_id: Option<String>,
}

impl QueryOptions {
    pub fn with_request_id(request_id: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
        }
    }
}

/// Driver contract consumed by the host
///
/// # Examples
///
/// ```rust,ignore
/// use sqltools_clickhouse_driver::{ConnectionDriver, QueryOptions};
///
/// async fn row_count(driver: &dyn ConnectionDriver) -> usize {
///     let results = driver.query("SELECT * FROM system.one", QueryOptions::default()).await;
///     results[0].row_count()
/// }
/// ```
#[async_trait::async_trait]
pub trait ConnectionDriver: Send + Sync {
    /// Return the open client handle, opening it if needed
    ///
    /// # Errors
    ///
    /// Returns `DriverError::Connection` if the handle cannot be built.
    async fn open(&self) -> DriverResult<Arc<dyn Client>>;

    /// Drop the client handle; no-op when closed
    async fn close(&self);

    /// Execute SQL text.
    ///
    /// Always returns exactly one envelope; failures are reported through
    /// its `error` and `messages`.
    async fn query(&self, sql: &str, options: QueryOptions) -> Vec<ResultEnvelope>;

    /// Open, confirm the configured database exists, and close
    ///
    /// # Errors
    ///
    /// Returns `DriverError::Verification` if the probe fails or the
    /// database does not match exactly once.
    async fn test_connection(&self) -> DriverResult<()>;

    /// Children of a schema tree node
    async fn get_children_for_item(&self, request: ChildrenRequest) -> Vec<TreeNode>;

    /// Autocomplete matches for `search` among items of `item_type`
    async fn search_items(
        &self,
        item_type: ContextValue,
        search: &str,
        extra: ExtraSearchParams,
    ) -> Vec<SearchItem>;

    /// Keyword/function completions available without a query
    async fn get_static_completions(&self) -> StaticCompletions;
}
