// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Static (connection-independent) completion entries.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A keyword or function completion offered without querying the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticCompletion {
    pub label: String,
    pub detail: Option<String>,
    pub documentation: Option<String>,
}

/// Completions keyed by label
pub type StaticCompletions = HashMap<String, StaticCompletion>;
