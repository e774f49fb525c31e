// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Client gateway
//!
//! Owns the single client handle of a driver instance. The handle moves
//! absent → present on [`Gateway::open`] and present → absent on
//! [`Gateway::close`]; nothing else changes it. After a close the next
//! operation opens a fresh handle.

use crate::client::{Client, Connector};
use crate::error::DriverResult;
use sqltools_clickhouse_model::ConnectionCredentials;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Lazily opened, explicitly closed client handle
pub struct Gateway {
    credentials: ConnectionCredentials,
    connector: Arc<dyn Connector>,
    handle: Mutex<Option<Arc<dyn Client>>>,
}

impl Gateway {
    pub fn new(credentials: ConnectionCredentials, connector: Arc<dyn Connector>) -> Self {
        Self {
            credentials,
            connector,
            handle: Mutex::new(None),
        }
    }

    /// Credentials used to build handles
    pub fn credentials(&self) -> &ConnectionCredentials {
        &self.credentials
    }

    /// Return the live handle, creating it if absent.
    ///
    /// The lock is held while connecting, so concurrent callers all observe
    /// the handle created by the first one.
    pub async fn open(&self) -> DriverResult<Arc<dyn Client>> {
        let mut handle = self.handle.lock().await;
        if let Some(client) = handle.as_ref() {
            return Ok(Arc::clone(client));
        }

        let client = self.connector.connect(&self.credentials)?;
        info!(
            host = %self.credentials.host,
            port = self.credentials.port,
            database = %self.credentials.database,
            "Opened ClickHouse connection"
        );
        *handle = Some(Arc::clone(&client));
        Ok(client)
    }

    /// Drop the handle; no-op when none is open
    pub async fn close(&self) {
        if self.handle.lock().await.take().is_some() {
            info!(host = %self.credentials.host, "Closed ClickHouse connection");
        }
    }

    /// Whether a handle is currently held
    pub async fn is_open(&self) -> bool {
        self.handle.lock().await.is_some()
    }
}
