//! # Database State
//!
//! Wraps the `Database` handle and the save-on-change hook.
//!
//! ## Save-on-change
//! ```text
//! command mutates OrderState
//!      │
//!      ▼
//! DbState::persist(&orders)
//!      │  take dirty flags + copy (under the lock)
//!      ▼
//! save_changes(copy, dirty) ──► error? log, re-mark dirty, keep going
//! ```
//!
//! A failed write never undoes the in-memory change; the flags are put back
//! so the next successful save catches up.

use tracing::{debug, error};

use mesa_db::{Database, DbResult};

use crate::state::OrderState;

/// Wrapper around `Database` for the waiter app.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }

    /// Writes whatever changed since the last call. Never fails the caller.
    pub async fn persist(&self, orders: &OrderState) {
        if let Err(e) = self.try_persist(orders).await {
            error!(error = %e, "Failed to persist order state; keeping in-memory state");
        }
    }

    /// Like [`DbState::persist`], but returns the storage error.
    pub async fn try_persist(&self, orders: &OrderState) -> DbResult<()> {
        let Some((copy, dirty)) = orders.take_changes() else {
            return Ok(());
        };

        debug!(
            draft = dirty.draft,
            tables = dirty.tables,
            history = dirty.history,
            "Persisting order state"
        );

        let result = self.db.orders().save_changes(&copy, dirty).await;
        if result.is_err() {
            orders.restore_dirty(dirty);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesa_db::DbConfig;

    #[tokio::test]
    async fn test_persist_writes_changes() {
        let db = DbState::new(Database::new(DbConfig::in_memory()).await.unwrap());
        let orders = OrderState::new();

        orders.with_orders_mut(|o| o.set_table_name("5"));
        db.try_persist(&orders).await.unwrap();

        let draft = db.inner().orders().load_draft().await.unwrap();
        assert_eq!(draft.table_name(), "5");
    }

    #[tokio::test]
    async fn test_failed_persist_keeps_changes_pending() {
        let db = DbState::new(Database::new(DbConfig::in_memory()).await.unwrap());
        let orders = OrderState::new();
        db.inner().close().await;

        orders.with_orders_mut(|o| o.set_table_name("5"));
        assert!(db.try_persist(&orders).await.is_err());

        // In-memory state untouched, flags back in place
        assert_eq!(orders.with_orders(|o| o.draft().table_name().to_string()), "5");
        assert!(orders.take_changes().is_some());
    }
}
