// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for driver operations
//!
//! Query execution never fails with these: its failures are captured in the
//! result envelope. They surface from connection setup, the connectivity
//! self-test and configuration loading.

use crate::config::ConfigError;
use thiserror::Error;

/// Result type alias for driver operations
pub type DriverResult<T> = Result<T, DriverError>;

/// Errors that can occur during driver operations
#[derive(Debug, Error)]
pub enum DriverError {
    /// The client handle could not be constructed
    #[error("Failed to connect to ClickHouse: {0}")]
    Connection(String),

    /// The connectivity self-test rejected the configuration
    #[error("{0}")]
    Verification(String),

    /// Invalid driver configuration
    #[error("Invalid driver configuration: {0}")]
    Configuration(#[from] ConfigError),
}
