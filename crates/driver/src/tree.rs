// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Schema tree resolution
//!
//! Maps "list the children of this node" to the right catalog query and
//! reinterprets its rows as typed child descriptors:
//!
//! | Node | Children |
//! |---|---|
//! | connection | "Tables" and "Views" groups, no query |
//! | table / view / materialized view | columns |
//! | group of tables | tables of the scoped database |
//! | group of views | views of the scoped database |
//! | anything else | none |
//!
//! A failed metadata query yields no children; the failure itself is only
//! logged by the normalizer.

use crate::driver::ClickHouseDriver;
use serde::{Deserialize, Serialize};
use sqltools_clickhouse_catalog::{SchemaTarget, TableTarget};
use sqltools_clickhouse_model::{ContextValue, Row, TreeNode};
use tracing::warn;

/// Engine reported by `system.tables` for materialized views
const MATERIALIZED_VIEW_ENGINE: &str = "MaterializedView";

/// A node to expand, with the node it was reached from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildrenRequest {
    pub item: TreeNode,
    #[serde(default)]
    pub parent: Option<TreeNode>,
}

impl ChildrenRequest {
    pub fn new(item: TreeNode) -> Self {
        Self { item, parent: None }
    }

    /// Builder method: set the parent node
    pub fn with_parent(mut self, parent: TreeNode) -> Self {
        self.parent = Some(parent);
        self
    }
}

impl ClickHouseDriver {
    pub(crate) async fn resolve_children(&self, request: &ChildrenRequest) -> Vec<TreeNode> {
        let item = &request.item;
        match item.node_type {
            ContextValue::Connection | ContextValue::ConnectedConnection => vec![
                TreeNode::resource_group("Tables", ContextValue::Table),
                TreeNode::resource_group("Views", ContextValue::View),
            ],
            ContextValue::Table | ContextValue::View | ContextValue::MaterializedView => {
                let target = TableTarget::new(self.scope_database(request), item.label.clone());
                let rows = self.fetch_rows(&self.queries().fetch_columns(&target)).await;
                decode_nodes(ContextValue::Column, &rows)
                    .into_iter()
                    .map(|column| column.with_child_type(ContextValue::NoChild))
                    .collect()
            }
            ContextValue::ResourceGroup => self.resolve_group_children(request).await,
            ContextValue::Database
            | ContextValue::Schema
            | ContextValue::Column
            | ContextValue::Function
            | ContextValue::NoChild => Vec::new(),
        }
    }

    async fn resolve_group_children(&self, request: &ChildrenRequest) -> Vec<TreeNode> {
        let target = SchemaTarget::new(self.scope_database(request));
        match request.item.child_type {
            Some(ContextValue::Table) => {
                let rows = self.fetch_rows(&self.queries().fetch_tables(&target)).await;
                decode_nodes(ContextValue::Table, &rows)
                    .into_iter()
                    .map(|table| table.with_child_type(ContextValue::Column))
                    .collect()
            }
            Some(ContextValue::View) => {
                let rows = self.fetch_rows(&self.queries().fetch_views(&target)).await;
                decode_nodes(ContextValue::View, &rows)
                    .into_iter()
                    .map(|mut view| {
                        if view.detail.as_deref() == Some(MATERIALIZED_VIEW_ENGINE) {
                            view.node_type = ContextValue::MaterializedView;
                        }
                        view.with_child_type(ContextValue::Column)
                    })
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    /// Database a request is scoped to: the item's, then the parent's, then
    /// the configured one.
    fn scope_database(&self, request: &ChildrenRequest) -> String {
        request
            .item
            .database_or_schema()
            .or_else(|| request.parent.as_ref().and_then(TreeNode::database_or_schema))
            .unwrap_or(self.config().credentials.database.as_str())
            .to_string()
    }
}

/// Reinterpret metadata rows as nodes of `kind`, skipping rows without a label
pub(crate) fn decode_nodes(kind: ContextValue, rows: &[Row]) -> Vec<TreeNode> {
    let nodes: Vec<TreeNode> = rows
        .iter()
        .filter_map(|row| TreeNode::from_row(kind, row))
        .collect();

    if nodes.len() < rows.len() {
        warn!(
            kind = %kind,
            skipped = rows.len() - nodes.len(),
            "Skipped metadata rows without a label"
        );
    }
    nodes
}
