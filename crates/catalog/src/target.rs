// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Typed inputs of the catalog query builders.

use serde::{Deserialize, Serialize};

/// Default row cap for search queries
pub const DEFAULT_SEARCH_LIMIT: u32 = 100;

/// A database whose tables or views are listed
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaTarget {
    pub database: String,
}

impl SchemaTarget {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
        }
    }
}

/// A fully qualified table (or view)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableTarget {
    pub database: String,
    pub table: String,
}

impl TableTarget {
    pub fn new(database: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            table: table.into(),
        }
    }
}

/// Table scoping for column search; `database` defaults to the current one
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    pub table: String,
}

impl TableRef {
    /// Table in the current database
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            database: None,
            table: table.into(),
        }
    }

    /// Builder method: pin the database
    pub fn in_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }
}

/// Parameters of [`crate::QueryCatalog::search_tables`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTablesParams {
    pub search: String,
    pub limit: Option<u32>,
}

impl SearchTablesParams {
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            limit: None,
        }
    }
}

/// Parameters of [`crate::QueryCatalog::search_columns`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchColumnsParams {
    pub search: String,
    /// Restrict matches to these tables; empty means every table
    pub tables: Vec<TableRef>,
    pub limit: Option<u32>,
}

impl SearchColumnsParams {
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            tables: Vec::new(),
            limit: None,
        }
    }

    /// Builder method: restrict to one more table
    pub fn with_table(mut self, table: TableRef) -> Self {
        self.tables.push(table);
        self
    }
}
