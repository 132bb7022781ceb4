//! # Domain Types
//!
//! Core domain types used throughout Mesa.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Dish       │   │    OrderItem    │   │    TableData    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  code (key)     │──►│  Dish snapshot  │──►│  order          │       │
//! │  │  name           │   │  id (UUID)      │   │  created_at     │       │
//! │  │  price          │   │  modification   │   │  requests       │       │
//! │  │  category       │   └─────────────────┘   └────────┬────────┘       │
//! │  └─────────────────┘                                  │                │
//! │                                                       ▼                │
//! │                       ┌────────────────────────────────────────┐       │
//! │                       │            HistoricOrder               │       │
//! │                       │  TableData + table_name + completed_at │       │
//! │                       └────────────────────────────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! An `OrderItem` carries a full copy of the dish at the moment it was
//! ordered. Catalog changes never reach orders already taken.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Dish
// =============================================================================

/// An immutable menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    /// Menu code, unique within the catalog (e.g. "C12").
    pub code: String,

    /// Display name.
    pub name: String,

    /// Unit price.
    #[ts(type = "number")]
    pub price: Money,

    /// Menu section the dish is listed under.
    pub category: String,

    /// For combos: the individual dishes included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,

    /// Options the waiter must pick one of (e.g. portion size).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variations: Option<Vec<String>>,

    /// Extra search terms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

impl Dish {
    /// Whether the dish requires a variation choice before ordering.
    pub fn has_variations(&self) -> bool {
        self.variations.as_ref().is_some_and(|v| !v.is_empty())
    }

    /// Resolves the variation choice into the snapshot that gets ordered.
    ///
    /// ## Rules
    /// - Dish without variations: the choice is ignored, the dish is returned as-is
    /// - Exactly one variation and no choice: that variation is selected
    /// - Otherwise a known choice is required; the snapshot is named
    ///   `"Name (Choice)"`
    ///
    /// ```rust
    /// use mesa_core::{Dish, Money};
    ///
    /// let sopa = Dish {
    ///     code: "S01".into(),
    ///     name: "Sopa Wantan".into(),
    ///     price: Money::from_cents(1500),
    ///     category: "Sopas".into(),
    ///     items: None,
    ///     description: None,
    ///     ingredients: None,
    ///     variations: Some(vec!["Personal".into(), "Familiar".into()]),
    ///     keywords: None,
    /// };
    ///
    /// let chosen = sopa.with_variation(Some("Familiar")).unwrap();
    /// assert_eq!(chosen.name, "Sopa Wantan (Familiar)");
    /// assert!(sopa.with_variation(None).is_err());
    /// ```
    pub fn with_variation(&self, choice: Option<&str>) -> CoreResult<Dish> {
        let variations = match &self.variations {
            Some(v) if !v.is_empty() => v,
            _ => return Ok(self.clone()),
        };

        let choice = match choice.map(str::trim).filter(|c| !c.is_empty()) {
            Some(c) => c,
            None if variations.len() == 1 => variations[0].as_str(),
            None => {
                return Err(CoreError::VariationRequired {
                    code: self.code.clone(),
                })
            }
        };

        if !variations.iter().any(|v| v == choice) {
            return Err(CoreError::UnknownVariation {
                code: self.code.clone(),
                variation: choice.to_string(),
            });
        }

        let mut dish = self.clone();
        dish.name = format!("{} ({})", self.name, choice);
        Ok(dish)
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// One line of an order: a dish snapshot plus its own identity.
///
/// Adding the same dish twice yields two items with different `id`s,
/// so a note on one never leaks onto the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(flatten)]
    pub dish: Dish,

    /// Unique per line item.
    pub id: String,

    /// Free-text kitchen note ("sin ají").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modification: Option<String>,
}

impl OrderItem {
    /// Creates a new line item with a fresh id.
    pub fn new(dish: Dish, modification: Option<String>) -> Self {
        OrderItem {
            dish,
            id: Uuid::new_v4().to_string(),
            modification,
        }
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.dish.price
    }
}

// =============================================================================
// Table Data
// =============================================================================

/// An order assigned to a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TableData {
    pub order: Vec<OrderItem>,

    /// Local opening time for display, e.g. "14:30".
    pub created_at: String,

    /// Order-wide special requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests: Option<String>,
}

impl TableData {
    /// Sum of the item prices.
    pub fn total(&self) -> Money {
        self.order.iter().map(OrderItem::price).sum()
    }

    pub fn item_count(&self) -> usize {
        self.order.len()
    }
}

/// Active tables keyed by canonical table name.
pub type ActiveTables = BTreeMap<String, TableData>;

// =============================================================================
// Historic Order
// =============================================================================

/// A closed (or replaced) table, frozen at the moment it left the floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct HistoricOrder {
    #[serde(flatten)]
    pub table: TableData,

    pub table_name: String,

    /// When the table left the floor (RFC 3339, sortable).
    #[ts(as = "String")]
    pub completed_at: DateTime<Utc>,
}

impl HistoricOrder {
    /// Snapshots a table into a history entry.
    pub fn from_table(table_name: impl Into<String>, table: TableData, completed_at: DateTime<Utc>) -> Self {
        HistoricOrder {
            table,
            table_name: table_name.into(),
            completed_at,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
