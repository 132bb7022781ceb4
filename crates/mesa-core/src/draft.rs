//! # Draft Order
//!
//! The order being built on the menu screen. Exactly one draft exists at a
//! time; the [`OrderManager`](crate::manager::OrderManager) owns it.
//!
//! ## Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft Operations                                     │
//! │                                                                         │
//! │  Waiter Action            Method                 Draft Change           │
//! │  ─────────────            ──────                 ────────────           │
//! │                                                                         │
//! │  Pick dish ×3 ──────────► add_item(d, "", 3) ──► 3 new lines, new ids   │
//! │                                                                         │
//! │  Swipe line away ───────► remove_item(id) ─────► that line only         │
//! │                                                                         │
//! │  Type "5" ──────────────► set_table_name("5") ─► stored verbatim        │
//! │                                                                         │
//! │  Edit Mesa 5 ───────────► begin_edit(..) ──────► order copied in,       │
//! │                                                  input shows "5"        │
//! │                                                                         │
//! │  Save / discard ────────► reset() ─────────────► empty                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::table_name::display_identifier;
use crate::types::{Dish, OrderItem, TableData};
use crate::validation::validate_quantity;

/// The in-progress order.
///
/// ## Invariants
/// - `is_editing` implies `editing_table_name` is set
/// - Line items are never merged: two adds of one dish are two lines
///
/// Serializes to the persisted `draftOrder` layout:
/// `{ order, tableName, requests, isEditing, editingTableName }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DraftOrder {
    order: Vec<OrderItem>,
    table_name: String,
    requests: String,
    is_editing: bool,
    editing_table_name: Option<String>,
}

impl DraftOrder {
    /// Creates an empty draft.
    pub fn new() -> Self {
        DraftOrder::default()
    }

    /// Rebuilds a draft from stored parts, enforcing the editing invariant.
    pub fn restore(
        order: Vec<OrderItem>,
        table_name: String,
        requests: String,
        editing_table_name: Option<String>,
    ) -> Self {
        DraftOrder {
            order,
            table_name,
            requests,
            is_editing: editing_table_name.is_some(),
            editing_table_name,
        }
    }

    /// Appends `quantity` copies of `dish`, each with its own id.
    ///
    /// A blank modification is stored as absent; otherwise it is trimmed and
    /// shared by all the new lines.
    ///
    /// ```rust
    /// use mesa_core::{DraftOrder, Dish, Money};
    ///
    /// let dish = Dish {
    ///     code: "A1".into(),
    ///     name: "Arroz Chaufa".into(),
    ///     price: Money::from_cents(1850),
    ///     category: "Arroces".into(),
    ///     items: None,
    ///     description: None,
    ///     ingredients: None,
    ///     variations: None,
    ///     keywords: None,
    /// };
    ///
    /// let mut draft = DraftOrder::new();
    /// draft.add_item(&dish, "  ", 2).unwrap();
    /// assert_eq!(draft.item_count(), 2);
    /// assert!(draft.order()[0].modification.is_none());
    /// assert_ne!(draft.order()[0].id, draft.order()[1].id);
    /// ```
    pub fn add_item(&mut self, dish: &Dish, modification: &str, quantity: u32) -> CoreResult<()> {
        validate_quantity(quantity)?;

        let note = Some(modification.trim())
            .filter(|m| !m.is_empty())
            .map(str::to_string);

        self.order.extend(
            (0..quantity).map(|_| OrderItem::new(dish.clone(), note.clone())),
        );
        Ok(())
    }

    /// Removes the line with this id. Returns whether a line was removed.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let initial_len = self.order.len();
        self.order.retain(|item| item.id != id);
        self.order.len() != initial_len
    }

    pub fn set_table_name(&mut self, text: impl Into<String>) {
        self.table_name = text.into();
    }

    pub fn set_requests(&mut self, text: impl Into<String>) {
        self.requests = text.into();
    }

    /// Clears everything, including the editing flags.
    pub fn reset(&mut self) {
        *self = DraftOrder::default();
    }

    /// Loads an active table for editing.
    ///
    /// The input box shows the identifier without its "Mesa " prefix; the
    /// canonical name is kept in `editing_table_name` and is what a save
    /// writes back to.
    pub fn begin_edit(&mut self, table_name: &str, table: &TableData) {
        self.order = table.order.clone();
        self.table_name = display_identifier(table_name).to_string();
        self.requests = table.requests.clone().unwrap_or_default();
        self.is_editing = true;
        self.editing_table_name = Some(table_name.to_string());
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn order(&self) -> &[OrderItem] {
        &self.order
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn requests(&self) -> &str {
        &self.requests
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn editing_table_name(&self) -> Option<&str> {
        self.editing_table_name.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.order.len()
    }

    /// Trimmed requests, or `None` when blank.
    pub fn trimmed_requests(&self) -> Option<String> {
        Some(self.requests.trim())
            .filter(|r| !r.is_empty())
            .map(str::to_string)
    }

    /// A trivial draft has no lines, no table name and no requests.
    /// Only non-trivial drafts are persisted.
    pub fn is_trivial(&self) -> bool {
        self.order.is_empty() && self.table_name.trim().is_empty() && self.requests.trim().is_empty()
    }

    /// Sum of the line prices.
    pub fn total(&self) -> Money {
        self.order.iter().map(OrderItem::price).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn dish(code: &str, cents: i64) -> Dish {
        Dish {
            code: code.to_string(),
            name: format!("Plato {}", code),
            price: Money::from_cents(cents),
            category: "Platos".to_string(),
            items: None,
            description: None,
            ingredients: None,
            variations: None,
            keywords: None,
        }
    }

    #[test]
    fn test_add_item_repeats_and_shares_note() {
        let mut draft = DraftOrder::new();
        draft.add_item(&dish("A1", 1800), "  sin ají ", 3).unwrap();

        assert_eq!(draft.item_count(), 3);
        assert!(draft
            .order()
            .iter()
            .all(|i| i.modification.as_deref() == Some("sin ají")));
        assert_eq!(draft.total().cents(), 5400);
    }

    #[test]
    fn test_add_item_zero_quantity_leaves_draft_untouched() {
        let mut draft = DraftOrder::new();
        let err = draft.add_item(&dish("A1", 1800), "", 0).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(draft.is_empty());
    }

    #[test]
    fn test_same_dish_twice_is_two_lines() {
        let mut draft = DraftOrder::new();
        draft.add_item(&dish("A1", 1800), "", 1).unwrap();
        draft.add_item(&dish("A1", 1800), "", 1).unwrap();
        assert_eq!(draft.item_count(), 2);
    }

    #[test]
    fn test_length_tracks_adds_minus_removes() {
        let mut draft = DraftOrder::new();
        draft.add_item(&dish("A1", 1000), "", 2).unwrap();
        draft.add_item(&dish("B1", 2000), "", 3).unwrap();

        let first = draft.order()[0].id.clone();
        let last = draft.order()[4].id.clone();
        assert!(draft.remove_item(&first));
        assert!(draft.remove_item(&last));
        assert!(!draft.remove_item(&first));
        assert!(!draft.remove_item("no-such-id"));

        assert_eq!(draft.item_count(), 5 - 2);
    }

    #[test]
    fn test_remove_only_touches_matching_line() {
        let mut draft = DraftOrder::new();
        draft.add_item(&dish("A1", 1000), "", 2).unwrap();
        let keep = draft.order()[1].clone();
        let drop = draft.order()[0].id.clone();

        draft.remove_item(&drop);
        assert_eq!(draft.order(), &[keep]);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut draft = DraftOrder::new();
        draft.add_item(&dish("A1", 1000), "", 1).unwrap();
        draft.set_table_name("5");
        draft.set_requests("rápido");

        draft.reset();
        let once = draft.clone();
        draft.reset();

        assert_eq!(draft, once);
        assert!(draft.is_trivial());
        assert!(!draft.is_editing());
    }

    #[test]
    fn test_begin_edit_strips_prefix_for_display() {
        let table = TableData {
            order: vec![OrderItem::new(dish("A1", 1000), None)],
            created_at: "12:00".to_string(),
            requests: Some("para llevar".to_string()),
        };

        let mut draft = DraftOrder::new();
        draft.begin_edit("Mesa 5", &table);

        assert_eq!(draft.table_name(), "5");
        assert_eq!(draft.editing_table_name(), Some("Mesa 5"));
        assert!(draft.is_editing());
        assert_eq!(draft.requests(), "para llevar");
        assert_eq!(draft.order(), table.order.as_slice());
    }

    #[test]
    fn test_trivial_ignores_whitespace() {
        let mut draft = DraftOrder::new();
        draft.set_table_name("   ");
        draft.set_requests("\n");
        assert!(draft.is_trivial());

        draft.set_requests("sin sal");
        assert!(!draft.is_trivial());
        assert_eq!(draft.trimmed_requests().as_deref(), Some("sin sal"));
    }

    #[test]
    fn test_restore_enforces_editing_invariant() {
        let draft = DraftOrder::restore(vec![], "5".into(), String::new(), None);
        assert!(!draft.is_editing());

        let draft = DraftOrder::restore(vec![], "5".into(), String::new(), Some("Mesa 5".into()));
        assert!(draft.is_editing());
    }

    #[test]
    fn test_persisted_layout() {
        let mut draft = DraftOrder::new();
        draft.set_table_name("7");
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["tableName"], "7");
        assert_eq!(value["requests"], "");
        assert_eq!(value["isEditing"], false);
        assert!(value["editingTableName"].is_null());
        assert!(value["order"].as_array().unwrap().is_empty());
    }
}
