//! # mesa-db: Local Storage for Mesa
//!
//! This crate persists the order state for the Mesa waiter app.
//! It uses SQLite as a small key-value store with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Mesa Data Flow                                 │
//! │                                                                         │
//! │  Waiter command (save_order)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     mesa-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │    │  (embedded)  │  │   │
//! │  │   │               │    │ StorageRepo    │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ OrderSnapshot- │    │ 001_local_   │  │   │
//! │  │   │               │    │   Repository   │    │  storage.sql │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <platform data dir>/mesa.db  (or MESA_DB_PATH)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Key-value and order-document repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mesa_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/mesa.db")).await?;
//!
//! let snapshot = db.orders().load_all().await?;
//! let mut orders = OrderManager::from_snapshot(snapshot);
//! // ... mutate ...
//! let dirty = orders.take_dirty();
//! db.orders().save_changes(&orders, dirty).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::orders::OrderSnapshotRepository;
pub use repository::storage::{StorageEntry, StorageRepository};
