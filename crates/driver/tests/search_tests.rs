// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Autocomplete search tests

use serde_json::json;
use sqltools_clickhouse_catalog::{ClickHouseQueries, QueryCatalog, SearchTablesParams, TableRef};
use sqltools_clickhouse_driver::{ConnectionDriver, ExtraSearchParams};
use sqltools_clickhouse_model::ContextValue;
use sqltools_clickhouse_test_utils::{MockClient, mock_driver, rows};

#[tokio::test]
async fn test_table_search_issues_search_tables() {
    let client = MockClient::new().respond(
        "system.tables",
        rows(json!([
            {"label": "orders", "database": "shop", "schema": "shop", "detail": "MergeTree", "isView": 0},
            {"label": "recent_orders", "database": "shop", "schema": "shop", "detail": "View", "isView": 1},
        ])),
    );
    let (driver, connector) = mock_driver(client);

    let items = driver
        .search_items(ContextValue::Table, "ord", ExtraSearchParams::default())
        .await;

    assert_eq!(
        connector.client().executed(),
        vec![ClickHouseQueries.search_tables(&SearchTablesParams::new("ord"))]
    );
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].label, "orders");
    assert_eq!(items[0].node_type, ContextValue::Table);
    assert_eq!(items[1].node_type, ContextValue::View);
    assert_eq!(items[1].detail.as_deref(), Some("View"));
}

#[tokio::test]
async fn test_column_search_forwards_extra_params() {
    let client = MockClient::new().respond(
        "system.columns",
        rows(json!([
            {"label": "user_id", "database": "shop", "schema": "shop", "table": "orders",
             "dataType": "UInt64", "detail": "UInt64", "isNullable": 0},
        ])),
    );
    let (driver, connector) = mock_driver(client);

    let extra = ExtraSearchParams {
        tables: vec![TableRef::new("orders"), TableRef::new("users").in_database("crm")],
        limit: Some(10),
    };
    let items = driver.search_items(ContextValue::Column, "id", extra).await;

    let executed = connector.client().executed();
    assert_eq!(executed.len(), 1);
    assert!(executed[0].contains("name ILIKE '%id%'"));
    assert!(executed[0].contains("(database = currentDatabase() AND table = 'orders')"));
    assert!(executed[0].contains("(database = 'crm' AND table = 'users')"));
    assert!(executed[0].contains("LIMIT 10"));

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].node_type, ContextValue::Column);
    assert_eq!(items[0].table.as_deref(), Some("orders"));
}

#[tokio::test]
async fn test_unsupported_item_type_runs_no_query() {
    for kind in [
        ContextValue::View,
        ContextValue::Function,
        ContextValue::Connection,
        ContextValue::ResourceGroup,
    ] {
        let (driver, connector) = mock_driver(MockClient::new());
        let items = driver.search_items(kind, "ord", ExtraSearchParams::default()).await;

        assert!(items.is_empty());
        assert_eq!(connector.client().execution_count(), 0);
        assert_eq!(connector.connect_count(), 0);
    }
}

#[tokio::test]
async fn test_search_items_serialize_as_typed_rows() {
    let client = MockClient::new()
        .respond(
            "system.tables",
            rows(json!([
                {"label": "orders", "database": "shop", "schema": "shop", "detail": "MergeTree", "isView": 0},
                {"label": "recent_orders", "database": "shop", "schema": "shop", "detail": "View", "isView": 1},
            ])),
        )
        .respond(
            "system.columns",
            rows(json!([
                {"label": "coupon", "database": "shop", "schema": "shop", "table": "orders",
                 "dataType": "LowCardinality(Nullable(String))", "isNullable": 1, "comment": ""},
            ])),
        );
    let (driver, _) = mock_driver(client);

    let tables = driver
        .search_items(ContextValue::Table, "ord", ExtraSearchParams::default())
        .await;
    let columns = driver
        .search_items(ContextValue::Column, "cou", ExtraSearchParams::default())
        .await;

    // Every row field is kept; the node kind is added and flags become booleans.
    assert_eq!(
        serde_json::to_value(&tables).unwrap(),
        json!([
            {"label": "orders", "type": "connection.table", "database": "shop",
             "schema": "shop", "detail": "MergeTree", "isView": false},
            {"label": "recent_orders", "type": "connection.view", "database": "shop",
             "schema": "shop", "detail": "View", "isView": true},
        ])
    );
    assert_eq!(
        serde_json::to_value(&columns).unwrap(),
        json!([
            {"label": "coupon", "type": "connection.column", "database": "shop",
             "schema": "shop", "table": "orders",
             "dataType": "LowCardinality(Nullable(String))", "isNullable": true, "comment": ""},
        ])
    );
}

#[tokio::test]
async fn test_failed_search_yields_nothing() {
    let client = MockClient::new().fail(
        "system.tables",
        sqltools_clickhouse_model::QueryError::new("timeout"),
    );
    let (driver, _) = mock_driver(client);

    let items = driver
        .search_items(ContextValue::Table, "ord", ExtraSearchParams::default())
        .await;
    assert!(items.is_empty());
}

#[test]
fn test_extra_params_deserialize_from_host_json() {
    let extra: ExtraSearchParams =
        serde_json::from_value(json!({"tables": [{"table": "orders"}], "limit": 5})).unwrap();
    assert_eq!(extra.tables, vec![TableRef::new("orders")]);
    assert_eq!(extra.limit, Some(5));

    let empty: ExtraSearchParams = serde_json::from_value(json!({})).unwrap();
    assert_eq!(empty, ExtraSearchParams::default());
}
