//! # mesa-core: Pure Order Logic for Mesa
//!
//! This crate is the **heart** of Mesa, the waiter's order pad. It holds the
//! draft order, the active tables and the order history, and every rule that
//! moves an order between them. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Mesa Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Waiter UI (any frontend)                     │   │
//! │  │    Menu ──► Draft ──► Save / Merge ──► Tables ──► History       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON lines (stdin/stdout)              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    mesa-waiter commands                         │   │
//! │  │    add_item, save_order, resolve_conflict, close_table, etc.    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ mesa-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   draft   │  │  manager  │  │  schema   │  │   │
//! │  │   │   Dish    │  │  Draft-   │  │  Order-   │  │  stored   │  │   │
//! │  │   │ TableData │  │  Order    │  │  Manager  │  │  docs     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    mesa-db (Local Storage)                      │   │
//! │  │              SQLite key-value store, migrations                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Dish, OrderItem, TableData, HistoricOrder
//! - [`money`] - Money type in céntimos
//! - [`table_name`] - "5" → "Mesa 5" normalization
//! - [`draft`] - The order being built
//! - [`manager`] - Save, merge/replace, close, history
//! - [`menu`] - Read-only dish catalog
//! - [`schema`] - Lenient decoding of the stored documents
//! - [`validation`] - Input limits
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Local;
//! use mesa_core::{Menu, OrderManager, SaveOutcome};
//!
//! let menu = Menu::from_json(
//!     r#"[{"code": "A1", "name": "Arroz Chaufa", "price": 18.5, "category": "Arroces"}]"#,
//! ).unwrap();
//!
//! let mut orders = OrderManager::new();
//! orders.add_item(menu.require("A1").unwrap(), "sin cebolla", 2).unwrap();
//! orders.set_table_name("4");
//!
//! assert_eq!(orders.draft().total().to_string(), "37.00");
//! assert_eq!(
//!     orders.save(Local::now()),
//!     SaveOutcome::Created { table_name: "Mesa 4".into() }
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod draft;
pub mod error;
pub mod manager;
pub mod menu;
pub mod money;
pub mod schema;
pub mod table_name;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use draft::DraftOrder;
pub use error::{CoreError, CoreResult, ValidationError};
pub use manager::{
    ConflictResolution, Confirmed, Dirty, OrderManager, PendingConfirmation, Phase, Request,
    ResolveOutcome, SaveOutcome, SaveRejection,
};
pub use menu::Menu;
pub use money::Money;
pub use schema::OrderSnapshot;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Most copies of one dish added in a single step.
///
/// ## Business Reason
/// Catches a slipped finger (typing 100 instead of 10).
pub const MAX_ITEM_QUANTITY: u32 = 99;

/// Longest accepted table-name input, in characters.
pub const MAX_TABLE_NAME_LEN: usize = 60;

/// Longest accepted modification or requests text, in characters.
pub const MAX_NOTE_LEN: usize = 500;

/// Highest unit price accepted, in céntimos (1,000,000.00).
///
/// Keeps order totals far from `i64` overflow.
pub const MAX_DISH_PRICE_CENTS: i64 = 100_000_000;

/// Wall-clock format of `TableData::created_at` ("14:05").
pub const CREATED_AT_FORMAT: &str = "%H:%M";
