// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Schema tree descriptors
//!
//! A [`TreeNode`] describes one node of the navigable schema tree
//! (connection → resource groups → tables/views → columns). Nodes are built
//! fresh per request and carry no identity across requests.

use crate::{Row, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContextValue {
    #[serde(rename = "connection")]
    Connection,
    #[serde(rename = "connectedConnection")]
    ConnectedConnection,
    /// Synthetic grouping node ("Tables", "Views")
    #[serde(rename = "connection.resource_group")]
    ResourceGroup,
    #[serde(rename = "connection.database")]
    Database,
    #[serde(rename = "connection.schema")]
    Schema,
    #[serde(rename = "connection.table")]
    Table,
    #[serde(rename = "connection.view")]
    View,
    #[serde(rename = "connection.materializedView")]
    MaterializedView,
    #[serde(rename = "connection.column")]
    Column,
    #[serde(rename = "connection.function")]
    Function,
    /// Leaf marker
    #[serde(rename = "NO_CHILD")]
    NoChild,
}

impl ContextValue {
    /// Tag used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextValue::Connection => "connection",
            ContextValue::ConnectedConnection => "connectedConnection",
            ContextValue::ResourceGroup => "connection.resource_group",
            ContextValue::Database => "connection.database",
            ContextValue::Schema => "connection.schema",
            ContextValue::Table => "connection.table",
            ContextValue::View => "connection.view",
            ContextValue::MaterializedView => "connection.materializedView",
            ContextValue::Column => "connection.column",
            ContextValue::Function => "connection.function",
            ContextValue::NoChild => "NO_CHILD",
        }
    }

    /// Parse a wire tag
    pub fn parse(tag: &str) -> Option<Self> {
        ALL_CONTEXT_VALUES.iter().copied().find(|v| v.as_str() == tag)
    }
}

const ALL_CONTEXT_VALUES: [ContextValue; 11] = [
    ContextValue::Connection,
    ContextValue::ConnectedConnection,
    ContextValue::ResourceGroup,
    ContextValue::Database,
    ContextValue::Schema,
    ContextValue::Table,
    ContextValue::View,
    ContextValue::MaterializedView,
    ContextValue::Column,
    ContextValue::Function,
    ContextValue::NoChild,
];

impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of the schema tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: ContextValue,
    /// For resource groups: the kind they expand into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_type: Option<ContextValue>,
    /// Icon hint for the host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Owning table, for columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_nullable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_view: Option<bool>,
    /// Row fields without a dedicated attribute
    #[serde(flatten)]
    pub extra: Row,
}

/// Result of an autocomplete search; same shape as tree children
pub type SearchItem = TreeNode;

impl TreeNode {
    /// Create a node with builder pattern
    pub fn new(label: impl Into<String>, node_type: ContextValue) -> Self {
        Self {
            label: label.into(),
            node_type,
            child_type: None,
            icon_id: None,
            database: None,
            schema: None,
            table: None,
            detail: None,
            data_type: None,
            is_nullable: None,
            is_view: None,
            extra: Row::new(),
        }
    }

    /// Synthetic group node expanding into `child_type`
    pub fn resource_group(label: impl Into<String>, child_type: ContextValue) -> Self {
        Self::new(label, ContextValue::ResourceGroup)
            .with_child_type(child_type)
            .with_icon("folder")
    }

    /// Builder method: set child type
    pub fn with_child_type(mut self, child_type: ContextValue) -> Self {
        self.child_type = Some(child_type);
        self
    }

    /// Builder method: set icon hint
    pub fn with_icon(mut self, icon_id: impl Into<String>) -> Self {
        self.icon_id = Some(icon_id.into());
        self
    }

    /// Builder method: set database
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Builder method: set schema
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Builder method: set owning table
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Reinterpret a metadata row as a node of kind `node_type`.
    ///
    /// Returns `None` when the row has no string `label`. Fields without a
    /// dedicated attribute are kept in [`TreeNode::extra`].
    pub fn from_row(node_type: ContextValue, row: &Row) -> Option<Self> {
        let mut extra = row.clone();
        let label = match extra.remove("label") {
            Some(Value::String(label)) => label,
            _ => return None,
        };

        let mut node = Self::new(label, node_type);
        node.child_type = take_string(&mut extra, "childType").and_then(|t| ContextValue::parse(&t));
        node.icon_id = take_string(&mut extra, "iconId");
        node.database = take_string(&mut extra, "database");
        node.schema = take_string(&mut extra, "schema");
        node.table = take_string(&mut extra, "table");
        node.detail = take_string(&mut extra, "detail");
        // `type` is the serialized node kind; a row's own `type` is its data type.
        let row_type = take_string(&mut extra, "type");
        node.data_type = take_string(&mut extra, "dataType").or(row_type);
        node.is_nullable = take_flag(&mut extra, "isNullable");
        node.is_view = take_flag(&mut extra, "isView");
        node.extra = extra;
        Some(node)
    }

    /// Database the node lives in, falling back to its schema
    pub fn database_or_schema(&self) -> Option<&str> {
        self.database.as_deref().or(self.schema.as_deref())
    }
}

fn take_string(row: &mut Row, key: &str) -> Option<String> {
    match row.remove(key)? {
        Value::String(s) => Some(s),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

// ClickHouse renders UInt8 predicates as numbers and Bool as true/false.
fn take_flag(row: &mut Row, key: &str) -> Option<bool> {
    match row.remove(key)? {
        Value::Bool(b) => Some(b),
        Value::Number(n) => Some(n.as_f64().is_some_and(|n| n != 0.0)),
        Value::String(s) => Some(matches!(s.as_str(), "1" | "true")),
        _ => None,
    }
}
