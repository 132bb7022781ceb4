//! # History Commands
//!
//! Read access to closed tables and the confirmed clear-all.

use tracing::{debug, info};

use mesa_core::{HistoricOrder, Request};

use crate::state::OrderState;

/// Gets the order history, most recent first.
pub fn get_history(orders: &OrderState) -> Vec<HistoricOrder> {
    debug!("get_history command");
    orders.with_orders(|o| o.history().to_vec())
}

/// Asks to clear the whole history. Runs on `confirm`.
pub fn clear_history(orders: &OrderState) -> Request {
    debug!("clear_history command");
    let request = orders.with_orders_mut(|o| o.request_clear_history());
    info!("Clear history requested, waiting for confirmation");
    request
}
