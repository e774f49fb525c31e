// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Test fixtures and sample metadata rows

use serde_json::{Value, json};
use sqltools_clickhouse_model::Row;

/// Convert a JSON object into a row; anything else yields an empty row
pub fn row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        _ => Row::new(),
    }
}

/// Convert a JSON array of objects into rows
pub fn rows(value: Value) -> Vec<Row> {
    match value {
        Value::Array(items) => items.into_iter().map(row).collect(),
        _ => Vec::new(),
    }
}

/// Rows shaped like the ClickHouse catalog queries' output for a `shop` database
pub struct ClickHouseFixtures;

impl ClickHouseFixtures {
    /// Output of the tables query
    pub fn tables() -> Vec<Row> {
        rows(json!([
            {"label": "orders", "database": "shop", "schema": "shop", "detail": "MergeTree",
             "isView": false, "totalRows": 1200, "comment": ""},
            {"label": "users", "database": "shop", "schema": "shop", "detail": "ReplacingMergeTree",
             "isView": false, "totalRows": 40, "comment": "customers"},
        ]))
    }

    /// Output of the views query
    pub fn views() -> Vec<Row> {
        rows(json!([
            {"label": "daily_revenue", "database": "shop", "schema": "shop",
             "detail": "MaterializedView", "isView": true, "definition": "SELECT ...", "comment": ""},
            {"label": "recent_orders", "database": "shop", "schema": "shop",
             "detail": "View", "isView": true, "definition": "SELECT ...", "comment": ""},
        ]))
    }

    /// Output of the columns query for `shop.orders`
    pub fn order_columns() -> Vec<Row> {
        rows(json!([
            {"label": "id", "database": "shop", "schema": "shop", "table": "orders",
             "dataType": "UInt64", "detail": "UInt64", "isNullable": 0,
             "defaultKind": "", "defaultExpression": "",
             "isPartitionKey": 0, "isSortingKey": 1, "isPrimaryKey": 1, "comment": ""},
            {"label": "ordered_at", "database": "shop", "schema": "shop", "table": "orders",
             "dataType": "DateTime", "detail": "DateTime", "isNullable": 0,
             "defaultKind": "DEFAULT", "defaultExpression": "now()",
             "isPartitionKey": 1, "isSortingKey": 0, "isPrimaryKey": 0, "comment": ""},
            {"label": "coupon", "database": "shop", "schema": "shop", "table": "orders",
             "dataType": "Nullable(String)", "detail": "Nullable(String)", "isNullable": 1,
             "defaultKind": "", "defaultExpression": "",
             "isPartitionKey": 0, "isSortingKey": 0, "isPrimaryKey": 0, "comment": ""},
        ]))
    }

    /// Output of `SHOW DATABASES LIKE ...` matching `names`
    pub fn databases(names: &[&str]) -> Vec<Row> {
        names.iter().map(|name| row(json!({"name": name}))).collect()
    }
}
