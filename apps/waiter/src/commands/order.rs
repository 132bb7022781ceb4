//! # Order Commands
//!
//! Building the draft and saving it to a table.
//!
//! ## Draft Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft Lifecycle                                      │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌────────────┐     ┌──────────┐     │
//! │  │  Empty   │────►│ Drafting │────►│ save_order │────►│  Table   │     │
//! │  │  Draft   │     │          │     │            │     │  opened  │     │
//! │  └──────────┘     └──────────┘     └─────┬──────┘     └──────────┘     │
//! │       ▲                │                 │ name taken                   │
//! │       │           add_item               ▼                              │
//! │       │           remove_item     ┌──────────────┐                      │
//! │       │           set_table_name  │  Conflict    │── resolve_conflict   │
//! │       │           set_requests    │  (merge or   │   (merge/replace)    │
//! │       │                │          │   replace?)  │── cancel_conflict    │
//! │       │                ▼          └──────────────┘                      │
//! │       └────────── discard_draft (asks first if items would be lost)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Local;
use serde::Serialize;
use tracing::{debug, info};

use mesa_core::validation::{validate_note, validate_table_name};
use mesa_core::{
    ConflictResolution, DraftOrder, Money, OrderManager, PendingConfirmation, Phase, Request,
    ResolveOutcome, SaveOutcome,
};

use crate::error::ApiError;
use crate::state::{DbState, MenuState, OrderState};

/// The draft as the order screen shows it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftView {
    #[serde(flatten)]
    pub draft: DraftOrder,
    pub item_count: usize,
    pub total: Money,
    pub phase: Phase,
    pub pending_confirmation: Option<PendingConfirmation>,
}

impl From<&OrderManager> for DraftView {
    fn from(orders: &OrderManager) -> Self {
        DraftView {
            draft: orders.draft().clone(),
            item_count: orders.draft().item_count(),
            total: orders.draft().total(),
            phase: orders.phase(),
            pending_confirmation: orders.pending_confirmation().cloned(),
        }
    }
}

/// Result of `save_order`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub outcome: SaveOutcome,
    pub draft: DraftView,
}

/// Result of `resolve_conflict`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    pub outcome: ResolveOutcome,
    pub draft: DraftView,
}

/// Result of a command that may need confirmation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestResponse {
    pub request: Request,
    pub draft: DraftView,
}

/// Gets the current draft.
pub fn get_draft(orders: &OrderState) -> DraftView {
    debug!("get_draft command");
    orders.with_orders(|o| DraftView::from(o))
}

/// Adds `quantity` lines of a dish to the draft.
///
/// ## Arguments
/// * `code` - Menu code
/// * `variation` - Required when the dish offers more than one variation
/// * `modification` - Free-text note shared by the new lines
/// * `quantity` - How many lines to add (default: 1)
pub async fn add_item(
    orders: &OrderState,
    menu: &MenuState,
    db: &DbState,
    code: String,
    variation: Option<String>,
    modification: Option<String>,
    quantity: Option<u32>,
) -> Result<DraftView, ApiError> {
    let quantity = quantity.unwrap_or(1);
    let modification = modification.unwrap_or_default();
    debug!(code = %code, quantity = %quantity, "add_item command");

    validate_note("modification", &modification)?;
    let dish = menu.menu().require(&code)?.with_variation(variation.as_deref())?;

    let view = orders.with_orders_mut(|o| {
        o.add_item(&dish, &modification, quantity)?;
        Ok::<DraftView, ApiError>(DraftView::from(&*o))
    })?;

    db.persist(orders).await;
    Ok(view)
}

/// Removes one line from the draft. Unknown ids are ignored.
pub async fn remove_item(
    orders: &OrderState,
    db: &DbState,
    id: String,
) -> Result<DraftView, ApiError> {
    debug!(id = %id, "remove_item command");

    let view = orders.with_orders_mut(|o| {
        o.remove_item(&id);
        DraftView::from(&*o)
    });

    db.persist(orders).await;
    Ok(view)
}

/// Sets the table-name input, stored verbatim.
pub async fn set_table_name(
    orders: &OrderState,
    db: &DbState,
    text: String,
) -> Result<DraftView, ApiError> {
    debug!(text = %text, "set_table_name command");
    validate_table_name(&text)?;

    let view = orders.with_orders_mut(|o| {
        o.set_table_name(text);
        DraftView::from(&*o)
    });

    db.persist(orders).await;
    Ok(view)
}

/// Sets the order-wide requests text, stored verbatim.
pub async fn set_requests(
    orders: &OrderState,
    db: &DbState,
    text: String,
) -> Result<DraftView, ApiError> {
    debug!("set_requests command");
    validate_note("requests", &text)?;

    let view = orders.with_orders_mut(|o| {
        o.set_requests(text);
        DraftView::from(&*o)
    });

    db.persist(orders).await;
    Ok(view)
}

/// Commits the draft to a table.
///
/// Never an error: empty orders, blank names, name conflicts and closed
/// edit targets all come back as a [`SaveOutcome`].
pub async fn save_order(orders: &OrderState, db: &DbState) -> Result<SaveResponse, ApiError> {
    debug!("save_order command");

    let response = orders.with_orders_mut(|o| {
        let outcome = o.save(Local::now());
        SaveResponse {
            outcome,
            draft: DraftView::from(&*o),
        }
    });

    match &response.outcome {
        SaveOutcome::Created { table_name } => info!(table = %table_name, "Table opened"),
        SaveOutcome::Updated { table_name } => info!(table = %table_name, "Table updated"),
        SaveOutcome::Conflict { table_name } => {
            info!(table = %table_name, "Table name in use, waiting for merge or replace")
        }
        SaveOutcome::EditTargetMissing { table_name } => {
            info!(table = %table_name, "Edited table was closed meanwhile, draft discarded")
        }
        SaveOutcome::Rejected { reason } => debug!(?reason, "Save rejected"),
    }

    db.persist(orders).await;
    Ok(response)
}

/// Settles a pending save conflict by merging or replacing.
pub async fn resolve_conflict(
    orders: &OrderState,
    db: &DbState,
    resolution: ConflictResolution,
) -> Result<ResolveResponse, ApiError> {
    debug!(?resolution, "resolve_conflict command");

    let response = orders.with_orders_mut(|o| {
        let outcome = o.resolve_conflict(resolution, Local::now())?;
        Ok::<ResolveResponse, ApiError>(ResolveResponse {
            outcome,
            draft: DraftView::from(&*o),
        })
    })?;

    info!(outcome = ?response.outcome, "Save conflict resolved");
    db.persist(orders).await;
    Ok(response)
}

/// Backs out of a pending save conflict, keeping the draft.
pub fn cancel_conflict(orders: &OrderState) -> DraftView {
    debug!("cancel_conflict command");
    orders.with_orders_mut(|o| {
        o.cancel_conflict();
        DraftView::from(&*o)
    })
}

/// Throws the draft away. Asks for confirmation if unsaved items would be lost.
pub async fn discard_draft(
    orders: &OrderState,
    db: &DbState,
) -> Result<RequestResponse, ApiError> {
    debug!("discard_draft command");

    let response = orders.with_orders_mut(|o| {
        let request = o.request_discard_draft();
        RequestResponse {
            request,
            draft: DraftView::from(&*o),
        }
    });

    db.persist(orders).await;
    Ok(response)
}
