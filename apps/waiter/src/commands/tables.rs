//! # Table Commands
//!
//! Listing, editing and closing active tables.
//!
//! ## Table Lifecycle
//! ```text
//! save_order ──► ┌──────────────┐ ── edit_table ──► draft (editing)
//!                │ Active table │                       │
//!                └──────┬───────┘ ◄── save_order ───────┘
//!                       │
//!                  close_table ──► confirm ──► history
//! ```

use serde::Serialize;
use tracing::{debug, info};

use mesa_core::{Money, TableData};

use crate::commands::order::{DraftView, RequestResponse};
use crate::error::ApiError;
use crate::state::{DbState, OrderState};

/// An active table with its totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub table_name: String,
    #[serde(flatten)]
    pub table: TableData,
    pub item_count: usize,
    pub total: Money,
}

impl TableView {
    fn new(table_name: &str, table: &TableData) -> Self {
        TableView {
            table_name: table_name.to_string(),
            table: table.clone(),
            item_count: table.item_count(),
            total: table.total(),
        }
    }
}

/// Lists the active tables in name order.
pub fn list_tables(orders: &OrderState) -> Vec<TableView> {
    debug!("list_tables command");
    orders.with_orders(|o| {
        o.tables()
            .iter()
            .map(|(name, table)| TableView::new(name, table))
            .collect()
    })
}

/// Loads a table into the draft for editing.
///
/// If the draft holds an unsaved new order, nothing happens until the
/// waiter confirms throwing it away.
pub async fn edit_table(
    orders: &OrderState,
    db: &DbState,
    table_name: String,
) -> Result<RequestResponse, ApiError> {
    debug!(table = %table_name, "edit_table command");

    let response = orders.with_orders_mut(|o| {
        let request = o.request_edit(&table_name)?;
        Ok::<RequestResponse, ApiError>(RequestResponse {
            request,
            draft: DraftView::from(&*o),
        })
    })?;

    db.persist(orders).await;
    Ok(response)
}

/// Asks to close a table. The table moves to history on `confirm`.
pub fn close_table(orders: &OrderState, table_name: String) -> Result<RequestResponse, ApiError> {
    debug!(table = %table_name, "close_table command");

    let response = orders.with_orders_mut(|o| {
        let request = o.request_close_table(&table_name)?;
        Ok::<RequestResponse, ApiError>(RequestResponse {
            request,
            draft: DraftView::from(&*o),
        })
    })?;

    info!(table = %table_name, "Close requested, waiting for confirmation");
    Ok(response)
}
