// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for sqltools-clickhouse
//!
//! This crate provides common testing components including:
//! - A scripted mock client that records every executed SQL text
//! - A connector counting how many handles were built
//! - Sample metadata rows shaped like the catalog queries' output

pub mod fixtures;
pub mod mock_client;

// Re-exports for convenience
pub use fixtures::{ClickHouseFixtures, row, rows};
pub use mock_client::{MockClient, MockConnector, mock_driver};
