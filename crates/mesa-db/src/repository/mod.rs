//! # Repository Module
//!
//! Storage access for the waiter app.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Waiter command (save_order, close_table, ...)                         │
//! │       │                                                                 │
//! │       │  db.orders().save_changes(&orders, dirty)                      │
//! │       ▼                                                                 │
//! │  OrderSnapshotRepository                                               │
//! │  ├── load_all / load_tables / load_history / load_draft                │
//! │  └── save_tables / save_history / save_draft / save_changes            │
//! │       │                                                                 │
//! │       │  JSON text per key                                              │
//! │       ▼                                                                 │
//! │  StorageRepository                                                     │
//! │  └── get / set / remove / keys                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  local_storage table                                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`storage::StorageRepository`] - Raw key-value access
//! - [`orders::OrderSnapshotRepository`] - The three order documents

pub mod orders;
pub mod storage;
