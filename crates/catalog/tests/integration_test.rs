// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests for the catalog crate

use sqltools_clickhouse_catalog::{
    ClickHouseQueries, QueryCatalog, SchemaTarget, SearchColumnsParams, SearchTablesParams,
    TableRef, TableTarget,
};

// Catalog that wraps the ClickHouse one, for checking the trait is usable as an object
struct CommentedCatalog;

impl QueryCatalog for CommentedCatalog {
    fn fetch_tables(&self, target: &SchemaTarget) -> String {
        format!("/* tables */ {}", ClickHouseQueries.fetch_tables(target))
    }

    fn fetch_views(&self, target: &SchemaTarget) -> String {
        ClickHouseQueries.fetch_views(target)
    }

    fn fetch_columns(&self, target: &TableTarget) -> String {
        ClickHouseQueries.fetch_columns(target)
    }

    fn search_tables(&self, params: &SearchTablesParams) -> String {
        ClickHouseQueries.search_tables(params)
    }

    fn search_columns(&self, params: &SearchColumnsParams) -> String {
        ClickHouseQueries.search_columns(params)
    }

    fn probe_database(&self, database: &str) -> String {
        ClickHouseQueries.probe_database(database)
    }

    fn describe_table(&self, target: &TableTarget) -> String {
        ClickHouseQueries.describe_table(target)
    }

    fn fetch_records(&self, target: &TableTarget, limit: u32, offset: u32) -> String {
        ClickHouseQueries.fetch_records(target, limit, offset)
    }

    fn count_records(&self, target: &TableTarget) -> String {
        ClickHouseQueries.count_records(target)
    }
}

#[test]
fn test_catalog_as_trait_object() {
    let catalogs: Vec<Box<dyn QueryCatalog>> =
        vec![Box::new(ClickHouseQueries), Box::new(CommentedCatalog)];

    for catalog in &catalogs {
        let sql = catalog.fetch_tables(&SchemaTarget::new("metrics"));
        assert!(sql.contains("database = 'metrics'"));
    }
    assert!(catalogs[1]
        .fetch_tables(&SchemaTarget::new("metrics"))
        .starts_with("/* tables */"));
}

#[test]
fn test_builders_are_deterministic() {
    let target = TableTarget::new("metrics", "hits");
    assert_eq!(
        ClickHouseQueries.fetch_columns(&target),
        ClickHouseQueries.fetch_columns(&target)
    );
}

#[test]
fn test_table_ref_deserializes_from_host_params() {
    let tables: Vec<TableRef> =
        serde_json::from_str(r#"[{"table":"hits"},{"database":"logs","table":"events"}]"#)
            .unwrap();
    assert_eq!(tables[0], TableRef::new("hits"));
    assert_eq!(tables[1], TableRef::new("events").in_database("logs"));

    let mut params = SearchColumnsParams::new("url");
    params.tables = tables;
    let sql = ClickHouseQueries.search_columns(&params);
    assert!(sql.contains("(database = 'logs' AND table = 'events')"));
}
