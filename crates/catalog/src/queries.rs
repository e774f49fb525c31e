// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Metadata query builders

use crate::escape::{escape_identifier, escape_like, quote_literal};
use crate::target::{
    DEFAULT_SEARCH_LIMIT, SchemaTarget, SearchColumnsParams, SearchTablesParams, TableRef,
    TableTarget,
};

/// Set of pre-authored metadata queries.
///
/// Implementations must be pure: target in, SQL text out, no I/O.
pub trait QueryCatalog: Send + Sync {
    /// Base tables of one database
    fn fetch_tables(&self, target: &SchemaTarget) -> String;

    /// Views (plain, materialized, live, window) of one database
    fn fetch_views(&self, target: &SchemaTarget) -> String;

    /// Columns of one table, in declaration order
    fn fetch_columns(&self, target: &TableTarget) -> String;

    /// Tables of the current database whose name contains the fragment
    fn search_tables(&self, params: &SearchTablesParams) -> String;

    /// Columns whose name contains the fragment, optionally scoped to tables
    fn search_columns(&self, params: &SearchColumnsParams) -> String;

    /// Probe listing databases named like `database`
    fn probe_database(&self, database: &str) -> String;

    /// Server-side description of one table
    fn describe_table(&self, target: &TableTarget) -> String;

    /// A page of a table's rows
    fn fetch_records(&self, target: &TableTarget, limit: u32, offset: u32) -> String;

    /// Row count of a table, as column `total`
    fn count_records(&self, target: &TableTarget) -> String;
}

/// Queries against ClickHouse `system` tables
#[derive(Debug, Clone, Copy, Default)]
pub struct ClickHouseQueries;

impl ClickHouseQueries {
    fn qualified(target: &TableTarget) -> String {
        format!(
            "{}.{}",
            escape_identifier(&target.database),
            escape_identifier(&target.table)
        )
    }

    fn contains_pattern(search: &str) -> String {
        quote_literal(&format!("%{}%", escape_like(search)))
    }

    fn table_scope(table: &TableRef) -> String {
        let database = table
            .database
            .as_deref()
            .map(quote_literal)
            .unwrap_or_else(|| "currentDatabase()".to_string());
        format!(
            "(database = {} AND table = {})",
            database,
            quote_literal(&table.table)
        )
    }
}

impl QueryCatalog for ClickHouseQueries {
    fn fetch_tables(&self, target: &SchemaTarget) -> String {
        format!(
            r#"
SELECT
    name AS label,
    database,
    database AS schema,
    engine AS detail,
    false AS isView,
    total_rows AS totalRows,
    comment
FROM system.tables
WHERE database = {}
  AND NOT is_temporary
  AND engine NOT LIKE '%View'
ORDER BY name
"#,
            quote_literal(&target.database)
        )
    }

    fn fetch_views(&self, target: &SchemaTarget) -> String {
        format!(
            r#"
SELECT
    name AS label,
    database,
    database AS schema,
    engine AS detail,
    true AS isView,
    as_select AS definition,
    comment
FROM system.tables
WHERE database = {}
  AND engine LIKE '%View'
ORDER BY name
"#,
            quote_literal(&target.database)
        )
    }

    fn fetch_columns(&self, target: &TableTarget) -> String {
        format!(
            r#"
SELECT
    name AS label,
    database,
    database AS schema,
    table,
    type AS dataType,
    type AS detail,
    (startsWith(type, 'Nullable(') OR startsWith(type, 'LowCardinality(Nullable(')) AS isNullable,
    default_kind AS defaultKind,
    default_expression AS defaultExpression,
    is_in_partition_key AS isPartitionKey,
    is_in_sorting_key AS isSortingKey,
    is_in_primary_key AS isPrimaryKey,
    comment
FROM system.columns
WHERE database = {}
  AND table = {}
ORDER BY position
"#,
            quote_literal(&target.database),
            quote_literal(&target.table)
        )
    }

    fn search_tables(&self, params: &SearchTablesParams) -> String {
        format!(
            r#"
SELECT
    name AS label,
    database,
    database AS schema,
    engine AS detail,
    engine LIKE '%View' AS isView
FROM system.tables
WHERE database = currentDatabase()
  AND NOT is_temporary
  AND name ILIKE {}
ORDER BY name
LIMIT {}
"#,
            Self::contains_pattern(&params.search),
            params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT)
        )
    }

    fn search_columns(&self, params: &SearchColumnsParams) -> String {
        let scope = if params.tables.is_empty() {
            "database = currentDatabase()".to_string()
        } else {
            let scopes: Vec<String> = params.tables.iter().map(Self::table_scope).collect();
            format!("({})", scopes.join(" OR "))
        };

        format!(
            r#"
SELECT
    name AS label,
    database,
    database AS schema,
    table,
    type AS dataType,
    type AS detail,
    (startsWith(type, 'Nullable(') OR startsWith(type, 'LowCardinality(Nullable(')) AS isNullable
FROM system.columns
WHERE {}
  AND name ILIKE {}
ORDER BY table, position
LIMIT {}
"#,
            scope,
            Self::contains_pattern(&params.search),
            params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT)
        )
    }

    fn probe_database(&self, database: &str) -> String {
        format!("SHOW DATABASES LIKE {}", quote_literal(database))
    }

    fn describe_table(&self, target: &TableTarget) -> String {
        format!("DESCRIBE TABLE {}", Self::qualified(target))
    }

    fn fetch_records(&self, target: &TableTarget, limit: u32, offset: u32) -> String {
        format!(
            "SELECT * FROM {} LIMIT {} OFFSET {}",
            Self::qualified(target),
            limit,
            offset
        )
    }

    fn count_records(&self, target: &TableTarget) -> String {
        format!("SELECT count() AS total FROM {}", Self::qualified(target))
    }
}
