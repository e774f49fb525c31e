// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Database client boundary
//!
//! The driver talks to ClickHouse only through these two traits. A [`Client`]
//! executes one SQL text per call and settles exactly once with rows or an
//! error; a [`Connector`] builds clients from credentials.

use crate::error::DriverResult;
use async_trait::async_trait;
use sqltools_clickhouse_model::{ConnectionCredentials, QueryError, Row};
use std::sync::Arc;

/// Opaque handle able to run SQL against the server.
///
/// Implementations holding a stream or socket must serialize calls
/// themselves; the driver issues requests concurrently.
#[async_trait]
pub trait Client: Send + Sync {
    /// Execute `sql`, returning every row or the failure
    async fn execute(&self, sql: &str) -> Result<Vec<Row>, QueryError>;
}

/// Factory for [`Client`] handles
pub trait Connector: Send + Sync {
    /// Build a client for `credentials`.
    ///
    /// Construction does no I/O; connectivity failures surface on first use.
    fn connect(&self, credentials: &ConnectionCredentials) -> DriverResult<Arc<dyn Client>>;
}
