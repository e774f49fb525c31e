// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Autocomplete search

use crate::driver::ClickHouseDriver;
use crate::tree::decode_nodes;
use serde::{Deserialize, Serialize};
use sqltools_clickhouse_catalog::{SearchColumnsParams, SearchTablesParams, TableRef};
use sqltools_clickhouse_model::{ContextValue, SearchItem};

/// Extra scoping the host may pass along with a column search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraSearchParams {
    /// Only search columns of these tables
    #[serde(default)]
    pub tables: Vec<TableRef>,
    pub limit: Option<u32>,
}

impl ClickHouseDriver {
    pub(crate) async fn resolve_search(
        &self,
        item_type: ContextValue,
        search: &str,
        extra: ExtraSearchParams,
    ) -> Vec<SearchItem> {
        match item_type {
            ContextValue::Table => {
                let sql = self.queries().search_tables(&SearchTablesParams::new(search));
                let rows = self.fetch_rows(&sql).await;
                decode_nodes(ContextValue::Table, &rows)
                    .into_iter()
                    .map(|mut item| {
                        if item.is_view == Some(true) {
                            item.node_type = ContextValue::View;
                        }
                        item
                    })
                    .collect()
            }
            ContextValue::Column => {
                let params = SearchColumnsParams {
                    search: search.to_string(),
                    tables: extra.tables,
                    limit: extra.limit,
                };
                let rows = self.fetch_rows(&self.queries().search_columns(&params)).await;
                decode_nodes(ContextValue::Column, &rows)
            }
            ContextValue::Connection
            | ContextValue::ConnectedConnection
            | ContextValue::ResourceGroup
            | ContextValue::Database
            | ContextValue::Schema
            | ContextValue::View
            | ContextValue::MaterializedView
            | ContextValue::Function
            | ContextValue::NoChild => Vec::new(),
        }
    }
}
