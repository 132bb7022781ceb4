//! # Confirmation Commands
//!
//! Destructive requests (`close_table`, `clear_history`, and `edit_table` or
//! `discard_draft` over an unsaved order) only register a pending action.
//! The view shows its prompt and answers with one of these two commands.

use chrono::Local;
use serde::Serialize;
use tracing::{debug, info};

use mesa_core::{Confirmed, PendingConfirmation};

use crate::commands::order::DraftView;
use crate::error::ApiError;
use crate::state::{DbState, OrderState};

/// Result of `confirm`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmResponse {
    pub confirmed: Confirmed,
    pub draft: DraftView,
}

/// Result of `cancel`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelResponse {
    /// What was dropped, if anything was pending.
    pub cancelled: Option<PendingConfirmation>,
    pub draft: DraftView,
}

/// Runs the pending action.
pub async fn confirm(orders: &OrderState, db: &DbState) -> Result<ConfirmResponse, ApiError> {
    debug!("confirm command");

    let response = orders.with_orders_mut(|o| {
        let confirmed = o.confirm(Local::now())?;
        Ok::<ConfirmResponse, ApiError>(ConfirmResponse {
            confirmed,
            draft: DraftView::from(&*o),
        })
    })?;

    info!(confirmed = ?response.confirmed, "Action confirmed");
    db.persist(orders).await;
    Ok(response)
}

/// Drops the pending action. Harmless when nothing is pending.
pub fn cancel(orders: &OrderState) -> CancelResponse {
    debug!("cancel command");
    orders.with_orders_mut(|o| CancelResponse {
        cancelled: o.cancel_confirmation(),
        draft: DraftView::from(&*o),
    })
}
