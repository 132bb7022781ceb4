//! # Order State
//!
//! The application-owned container around [`OrderManager`].
//!
//! ## Why Arc<Mutex<T>>?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order State Access                                   │
//! │                                                                         │
//! │  Command 1 (add_item)      Command 2 (save_order)                      │
//! │       │                         │                                       │
//! │       ▼                         │                                       │
//! │  Lock acquired ◄────────────────┤ Waiting...                            │
//! │  Modify draft                   │                                       │
//! │  Take dirty flags               │                                       │
//! │  Lock released ─────────────────┤                                       │
//! │                                 ▼                                       │
//! │                            Lock acquired                               │
//! │                            Save / conflict check                       │
//! │                            Lock released                               │
//! │                                                                         │
//! │  Every transition completes under the lock. The lock is never held    │
//! │  across an await: persistence works on a clone taken under the lock.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use mesa_core::{Dirty, OrderManager, OrderSnapshot};

/// Shared, lock-protected order state.
#[derive(Debug, Clone, Default)]
pub struct OrderState {
    orders: Arc<Mutex<OrderManager>>,
}

impl OrderState {
    /// Creates an empty order state.
    pub fn new() -> Self {
        OrderState::default()
    }

    /// Creates the state from what was loaded at startup.
    pub fn from_snapshot(snapshot: OrderSnapshot) -> Self {
        OrderState {
            orders: Arc::new(Mutex::new(OrderManager::from_snapshot(snapshot))),
        }
    }

    /// Executes a function with read access to the orders.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = order_state.with_orders(|o| o.tables().len());
    /// ```
    pub fn with_orders<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OrderManager) -> R,
    {
        let orders = self.orders.lock().expect("Order mutex poisoned");
        f(&orders)
    }

    /// Executes a function with write access to the orders.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// order_state.with_orders_mut(|o| o.add_item(&dish, "", 1))?;
    /// ```
    pub fn with_orders_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OrderManager) -> R,
    {
        let mut orders = self.orders.lock().expect("Order mutex poisoned");
        f(&mut orders)
    }

    /// Takes the dirty flags together with a copy of the state to write.
    /// Returns `None` when nothing changed.
    pub fn take_changes(&self) -> Option<(OrderManager, Dirty)> {
        self.with_orders_mut(|orders| {
            let dirty = orders.take_dirty();
            dirty.any().then(|| (orders.clone(), dirty))
        })
    }

    /// Re-marks documents whose save failed.
    pub fn restore_dirty(&self, dirty: Dirty) {
        self.with_orders_mut(|orders| orders.restore_dirty(dirty));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_changes_only_when_dirty() {
        let state = OrderState::new();
        assert!(state.take_changes().is_none());

        state.with_orders_mut(|o| o.set_table_name("5"));
        let (copy, dirty) = state.take_changes().unwrap();
        assert!(dirty.draft);
        assert_eq!(copy.draft().table_name(), "5");

        assert!(state.take_changes().is_none());
    }

    #[test]
    fn test_restore_dirty_makes_changes_visible_again() {
        let state = OrderState::new();
        state.with_orders_mut(|o| o.set_table_name("5"));
        let (_, dirty) = state.take_changes().unwrap();

        state.restore_dirty(dirty);
        assert!(state.take_changes().is_some());
    }

    #[test]
    fn test_clones_share_state() {
        let state = OrderState::new();
        let other = state.clone();
        other.with_orders_mut(|o| o.set_requests("sin sal"));
        assert_eq!(state.with_orders(|o| o.draft().requests().to_string()), "sin sal");
    }
}
