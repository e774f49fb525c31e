// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQLTools ClickHouse - Data Model
//!
//! Value types shared by the query catalog, the driver and its hosts:
//!
//! - [`ConnectionCredentials`]: where and as whom to connect
//! - [`ResultEnvelope`]: the canonical wrapped outcome of one SQL execution
//! - [`TreeNode`] / [`ContextValue`]: schema tree descriptors and their kinds
//! - [`StaticCompletion`]: keyword/function completion entries
//!
//! Rows are [`Row`]s, ordered maps from column name to [`Value`]. Column sets
//! differ per query, so no row shape is declared upfront.

pub mod completion;
pub mod credentials;
pub mod result;
pub mod tree;

pub use completion::{StaticCompletion, StaticCompletions};
pub use credentials::{ConnectionCredentials, Protocol};
pub use result::{QueryError, ResultEnvelope};
pub use tree::{ContextValue, SearchItem, TreeNode};

/// A single column value as returned by the server
pub type Value = serde_json::Value;

/// One result row; iteration order is the server's column order
pub type Row = serde_json::Map<String, Value>;
