// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use crate::cli::Command;
use anyhow::bail;
use serde::Serialize;
use sqltools_clickhouse_catalog::{TableRef, TableTarget};
use sqltools_clickhouse_driver::{
    ChildrenRequest, ClickHouseDriver, ConnectionDriver, DriverConfig, ExtraSearchParams,
    QueryOptions,
};
use sqltools_clickhouse_model::{ContextValue, TreeNode};

#[derive(Serialize)]
struct GroupListing {
    group: TreeNode,
    children: Vec<TreeNode>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordsPage<T> {
    total: Option<u64>,
    pages: T,
}

/// Run one command against a fresh driver and print its JSON result
pub async fn run(config: DriverConfig, command: Command) -> anyhow::Result<()> {
    let driver = ClickHouseDriver::connect_http(config)?;
    let outcome = dispatch(&driver, command).await;
    driver.close().await;
    outcome
}

async fn dispatch(driver: &ClickHouseDriver, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Test => {
            driver.test_connection().await?;
            eprintln!("Connection to {} is OK", driver.conn_id());
            Ok(())
        }
        Command::Query { sql } => print_json(&driver.query(&sql, QueryOptions::default()).await),
        Command::Children {
            kind,
            label,
            database,
            child_type,
        } => {
            let mut item = TreeNode::new(label, kind.into());
            item.database = database;
            item.child_type = child_type.map(ContextValue::from);
            print_json(&driver.get_children_for_item(ChildrenRequest::new(item)).await)
        }
        Command::Tree => {
            let connection = TreeNode::new(driver.conn_id(), ContextValue::Connection);
            let mut listing = Vec::new();
            for group in driver
                .get_children_for_item(ChildrenRequest::new(connection.clone()))
                .await
            {
                let request = ChildrenRequest::new(group.clone()).with_parent(connection.clone());
                let children = driver.get_children_for_item(request).await;
                listing.push(GroupListing { group, children });
            }
            print_json(&listing)
        }
        Command::Search {
            item_type,
            fragment,
            tables,
            limit,
        } => {
            let extra = ExtraSearchParams {
                tables: tables.into_iter().map(TableRef::new).collect(),
                limit,
            };
            print_json(&driver.search_items(item_type.into(), &fragment, extra).await)
        }
        Command::Records {
            table,
            database,
            limit,
            offset,
        } => {
            let database =
                database.unwrap_or_else(|| driver.config().credentials.database.clone());
            let target = TableTarget::new(database, table);
            let pages = driver.show_records(&target, limit, offset).await;
            if let Some(error) = pages.iter().find_map(|page| page.error.as_ref()) {
                bail!("Failed to read {}.{}: {}", target.database, target.table, error);
            }
            let total = driver.count_records(&target).await;
            print_json(&RecordsPage { total, pages })
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
