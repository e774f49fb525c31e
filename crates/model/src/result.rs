// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Result envelope
//!
//! Every SQL execution ends in exactly one [`ResultEnvelope`]. Failures are
//! values here, never panics or propagated errors:
//!
//! - `error` present: `cols` and `results` are empty
//! - `error` absent: `cols` are the field names of `results[0]`, or empty

use crate::Row;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error reported by the server or the transport for one execution
#[derive(Debug, Clone, PartialEq, Eq, Default, Error, Serialize, Deserialize)]
#[error("{}", .message.as_deref().unwrap_or("unknown error"))]
#[serde(rename_all = "camelCase")]
pub struct QueryError {
    /// Human-readable message, if the failure carried one
    pub message: Option<String>,
    /// ClickHouse exception code (e.g. 62 for a syntax error)
    pub code: Option<u32>,
    /// HTTP status of the failed response
    pub status: Option<u16>,
}

impl QueryError {
    /// Create an error with a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    /// Builder method: set the exception code
    pub fn with_code(mut self, code: u32) -> Self {
        self.code = Some(code);
        self
    }

    /// Builder method: set the HTTP status
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

/// Canonical, host-consumable result of one query execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope {
    /// Identifier of the connection that ran the query
    pub conn_id: String,
    /// Column names, in the order of the first row's fields
    pub cols: Vec<String>,
    /// Rows as returned by the server
    pub results: Vec<Row>,
    /// Originating query text
    pub query: String,
    /// Human-readable messages
    pub messages: Vec<String>,
    /// Set when the execution failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<QueryError>,
    /// Host request identifier, echoed back
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ResultEnvelope {
    /// Envelope for a successful execution.
    ///
    /// Columns are taken from the first row's own field names.
    pub fn success(conn_id: impl Into<String>, query: impl Into<String>, rows: Vec<Row>) -> Self {
        let cols = rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();

        Self {
            conn_id: conn_id.into(),
            cols,
            results: rows,
            query: query.into(),
            messages: Vec::new(),
            error: None,
            request_id: None,
        }
    }

    /// Envelope for a failed execution
    pub fn failure(conn_id: impl Into<String>, query: impl Into<String>, error: QueryError) -> Self {
        let messages = error.message.iter().cloned().collect();

        Self {
            conn_id: conn_id.into(),
            cols: Vec::new(),
            results: Vec::new(),
            query: query.into(),
            messages,
            error: Some(error),
            request_id: None,
        }
    }

    /// Builder method: echo a host request id
    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }

    /// Whether the execution failed
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.results.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: serde_json::Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_success_takes_columns_from_first_row() {
        let rows = vec![
            row(json!({"zeta": 1, "alpha": "a", "mid": null})),
            row(json!({"other": true})),
        ];
        let envelope = ResultEnvelope::success("c1", "SELECT 1", rows);
        assert_eq!(envelope.cols, vec!["zeta", "alpha", "mid"]);
        assert_eq!(envelope.row_count(), 2);
        assert!(envelope.messages.is_empty());
        assert!(!envelope.is_error());
    }

    #[test]
    fn test_failure_without_message() {
        let envelope = ResultEnvelope::failure("c1", "SELEC", QueryError::default());
        assert!(envelope.is_error());
        assert!(envelope.messages.is_empty());
        assert!(envelope.cols.is_empty());
    }

    #[test]
    fn test_serializes_with_host_field_names() {
        let envelope = ResultEnvelope::success("c1", "SELECT 1 AS x", vec![row(json!({"x": 1}))])
            .with_request_id(Some("r-7".to_string()));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["connId"], "c1");
        assert_eq!(value["cols"], json!(["x"]));
        assert_eq!(value["requestId"], "r-7");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_query_error_display() {
        assert_eq!(QueryError::new("boom").with_code(62).to_string(), "boom");
        assert_eq!(QueryError::default().to_string(), "unknown error");
    }
}
