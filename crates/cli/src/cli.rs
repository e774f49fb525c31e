// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Command-line arguments.

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use sqltools_clickhouse_driver::DriverConfig;
use sqltools_clickhouse_model::{ConnectionCredentials, ContextValue, Protocol};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ch-sqltools", version, about = "Explore a ClickHouse server the way a SQL tooling host does")]
pub struct Cli {
    /// SQLTools connection settings file (JSON); overrides the connection flags
    #[arg(long, env = "CLICKHOUSE_SETTINGS")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Log every executed query
    #[arg(long)]
    pub log_queries: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct ConnectionArgs {
    #[arg(long, env = "CLICKHOUSE_HOST", default_value = "localhost")]
    pub host: String,

    #[arg(long, env = "CLICKHOUSE_PORT", default_value_t = 8123)]
    pub port: u16,

    #[arg(long, env = "CLICKHOUSE_DATABASE", default_value = "default")]
    pub database: String,

    #[arg(long, env = "CLICKHOUSE_USER", default_value = "default")]
    pub user: String,

    #[arg(long, env = "CLICKHOUSE_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    #[arg(long, env = "CLICKHOUSE_PROTOCOL", value_enum, default_value_t = ProtocolArg::Http)]
    pub protocol: ProtocolArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProtocolArg {
    Http,
    Https,
}

/// Node kinds accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Connection,
    Group,
    Database,
    Table,
    View,
    MaterializedView,
    Column,
    Function,
}

impl From<KindArg> for ContextValue {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Connection => ContextValue::Connection,
            KindArg::Group => ContextValue::ResourceGroup,
            KindArg::Database => ContextValue::Database,
            KindArg::Table => ContextValue::Table,
            KindArg::View => ContextValue::View,
            KindArg::MaterializedView => ContextValue::MaterializedView,
            KindArg::Column => ContextValue::Column,
            KindArg::Function => ContextValue::Function,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that the configured database exists
    Test,
    /// Run SQL and print the result envelope
    Query { sql: String },
    /// List the children of one tree node
    Children {
        #[arg(value_enum)]
        kind: KindArg,
        #[arg(long, default_value = "")]
        label: String,
        #[arg(long)]
        database: Option<String>,
        /// For groups: the kind they expand into
        #[arg(long, value_enum)]
        child_type: Option<KindArg>,
    },
    /// Print the connection's groups and their objects
    Tree,
    /// Search tables or columns by name fragment
    Search {
        #[arg(value_enum)]
        item_type: KindArg,
        fragment: String,
        /// Restrict a column search to this table (repeatable)
        #[arg(long = "table")]
        tables: Vec<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Print a page of a table's rows
    Records {
        table: String,
        #[arg(long)]
        database: Option<String>,
        #[arg(long, default_value_t = 50)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
}

impl Cli {
    /// Driver configuration from the settings file or the connection flags
    pub fn driver_config(&self) -> anyhow::Result<DriverConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let settings: serde_json::Value = serde_json::from_str(&text)
                    .with_context(|| format!("Failed to parse {}", path.display()))?;
                DriverConfig::from_settings(&settings)?
            }
            None => {
                let args = &self.connection;
                let protocol = match args.protocol {
                    ProtocolArg::Http => Protocol::Http,
                    ProtocolArg::Https => Protocol::Https,
                };
                let credentials = ConnectionCredentials::new(args.host.clone(), args.port)
                    .with_name("cli")
                    .with_database(args.database.clone())
                    .with_user(args.user.clone(), args.password.clone())
                    .with_protocol(protocol);
                DriverConfig::new(credentials)
            }
        };

        config.log_queries |= self.log_queries;
        Ok(config)
    }
}
