// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Result normalization
//!
//! Turns the raw outcome of one execution into exactly one
//! [`ResultEnvelope`]. Errors become envelope contents; nothing here fails.

use sqltools_clickhouse_model::{QueryError, ResultEnvelope, Row};
use tracing::warn;

/// Wrap a raw outcome into an envelope
pub fn normalize(
    conn_id: &str,
    query: &str,
    outcome: Result<Vec<Row>, QueryError>,
) -> ResultEnvelope {
    match outcome {
        Ok(rows) => ResultEnvelope::success(conn_id, query, rows),
        Err(error) => {
            warn!(conn_id, code = ?error.code, "Query failed: {}", error);
            ResultEnvelope::failure(conn_id, query, error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(value: serde_json::Value) -> Vec<Row> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r.as_object().cloned().unwrap())
            .collect()
    }

    #[test]
    fn test_columns_follow_first_row_order() {
        let data = rows(json!([
            {"name": "hits", "engine": "MergeTree", "total_rows": 10},
            {"name": "visits", "engine": "Log", "total_rows": null}
        ]));
        let envelope = normalize("c", "SELECT name, engine, total_rows FROM t", Ok(data.clone()));

        assert_eq!(envelope.cols, vec!["name", "engine", "total_rows"]);
        assert_eq!(envelope.results, data);
        assert!(envelope.messages.is_empty());
        assert!(envelope.error.is_none());
        assert_eq!(envelope.conn_id, "c");
    }

    #[test]
    fn test_zero_rows() {
        let envelope = normalize("c", "SELECT 1 WHERE 0", Ok(Vec::new()));
        assert!(envelope.cols.is_empty());
        assert!(envelope.results.is_empty());
        assert!(envelope.error.is_none());
    }

    #[test]
    fn test_error_with_message() {
        let error = QueryError::new("Code: 60. Table default.nope does not exist").with_code(60);
        let envelope = normalize("c", "SELECT * FROM nope", Err(error.clone()));

        assert_eq!(envelope.error, Some(error));
        assert!(envelope.cols.is_empty());
        assert!(envelope.results.is_empty());
        assert_eq!(
            envelope.messages,
            vec!["Code: 60. Table default.nope does not exist"]
        );
        assert_eq!(envelope.query, "SELECT * FROM nope");
    }

    #[test]
    fn test_error_without_message() {
        let envelope = normalize("c", "SELECT 1", Err(QueryError::default().with_status(500)));
        assert!(envelope.is_error());
        assert!(envelope.messages.is_empty());
    }
}
