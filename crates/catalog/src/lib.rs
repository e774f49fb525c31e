// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQLTools ClickHouse - Query Catalog
//!
//! Pre-authored metadata queries used to discover what exists in a ClickHouse
//! server. Every builder is a pure function from a typed target to SQL text,
//! so callers can be tested without a live database.
//!
//! ## Queries
//!
//! | Builder | Source | Scope |
//! |---|---|---|
//! | [`QueryCatalog::fetch_tables`] | `system.tables` | one database, non-view engines |
//! | [`QueryCatalog::fetch_views`] | `system.tables` | one database, `*View` engines |
//! | [`QueryCatalog::fetch_columns`] | `system.columns` | one table |
//! | [`QueryCatalog::search_tables`] | `system.tables` | `currentDatabase()` |
//! | [`QueryCatalog::search_columns`] | `system.columns` | optional table list |
//!
//! Rows are aliased to tree descriptor field names (`label`, `database`,
//! `schema`, `detail`, ...). They never carry the node kind: ClickHouse lets
//! aliases shadow column names, so aliasing to `type` would rewrite the
//! `system.columns.type` column. Callers assign kinds themselves.
//!
//! ## Usage
//!
//! ```rust
//! use sqltools_clickhouse_catalog::{ClickHouseQueries, QueryCatalog, SchemaTarget};
//!
//! let sql = ClickHouseQueries.fetch_tables(&SchemaTarget::new("analytics"));
//! assert!(sql.contains("database = 'analytics'"));
//! ```

pub mod escape;
pub mod queries;
pub mod target;

// Re-exports
pub use escape::{escape_identifier, escape_like, quote_literal};
pub use queries::{ClickHouseQueries, QueryCatalog};
pub use target::{
    DEFAULT_SEARCH_LIMIT, SchemaTarget, SearchColumnsParams, SearchTablesParams, TableRef,
    TableTarget,
};
