// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQLTools ClickHouse - Driver
//!
//! Connection driver letting a generic SQL tooling host work with ClickHouse.
//!
//! ## Architecture
//!
//! ```text
//! host request ──► ClickHouseDriver ──► Gateway (one lazily opened Client)
//!                        │                    │
//!                        │              execute(sql) → rows | QueryError
//!                        │                    │
//!                        │◄──── normalize ────┘  (always one ResultEnvelope)
//!                        │
//!                        ├─ tree resolver:   node kind → catalog query → TreeNodes
//!                        └─ search resolver: item kind → catalog search → SearchItems
//! ```
//!
//! ## Error policy
//!
//! - Query failures are captured in the envelope's `error` and `messages`
//! - Tree and search resolution degrade to empty sequences
//! - Only [`ConnectionDriver::test_connection`] (and opening a handle) return
//!   a [`DriverError`]

pub mod client;
pub mod config;
pub mod driver;
pub mod error;
pub mod gateway;
#[cfg(feature = "http")]
pub mod http;
pub mod normalize;
pub mod search;
pub mod r#trait;
pub mod tree;

// Re-exports
pub use client::{Client, Connector};
pub use config::{ConfigError, DriverConfig, HttpClientConfig};
pub use driver::ClickHouseDriver;
pub use error::{DriverError, DriverResult};
pub use gateway::Gateway;
#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConnector};
pub use normalize::normalize;
pub use r#trait::{ConnectionDriver, QueryOptions};
pub use search::ExtraSearchParams;
pub use tree::ChildrenRequest;
