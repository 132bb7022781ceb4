//! # Order Manager
//!
//! Owns the draft order, the active tables and the order history, and every
//! transition between them.
//!
//! ## Save State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌──────┐  add_item   ┌──────────┐   save()   ┌────────────────────┐  │
//! │   │ Idle │ ──────────► │ Drafting │ ─────────► │ name already used? │  │
//! │   └──────┘             └──────────┘            └─────────┬──────────┘  │
//! │      ▲                    ▲   │ empty / blank name       │             │
//! │      │                    │   └── Rejected (no change)   │             │
//! │      │                    │                     no ◄─────┴────► yes    │
//! │      │                    │                      │               │     │
//! │      │                    │                   Created            ▼     │
//! │      │                    │            ┌──────────────────────────┐    │
//! │      │                    └─ cancel ── │     ConflictPending      │    │
//! │      │                                 │  merge │ replace         │    │
//! │      │                                 └────────┬─────────────────┘    │
//! │      └───────────────── draft cleared ◄─────────┘                      │
//! │                                                                         │
//! │   Editing drafts skip the conflict check: they overwrite their own     │
//! │   table, or abort if it was closed in the meantime.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Confirmations
//! Destructive requests (close a table, clear history, throw away a draft)
//! only register a [`PendingConfirmation`]. Nothing changes until
//! [`OrderManager::confirm`] runs it. At most one confirmation is pending.
//!
//! ## Time
//! The manager never reads the clock. Every transition that stamps a time
//! takes `now` from the caller.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::draft::DraftOrder;
use crate::error::{CoreError, CoreResult};
use crate::schema::OrderSnapshot;
use crate::table_name::normalize;
use crate::types::{ActiveTables, Dish, HistoricOrder, TableData};
use crate::CREATED_AT_FORMAT;

// =============================================================================
// Outcomes
// =============================================================================

/// Where the manager is in the save flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum Phase {
    Idle,
    Drafting,
    #[serde(rename_all = "camelCase")]
    ConflictPending { table_name: String },
}

/// Why a save did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum SaveRejection {
    EmptyOrder,
    BlankTableName,
}

/// Result of [`OrderManager::save`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum SaveOutcome {
    /// New active table; draft cleared.
    #[serde(rename_all = "camelCase")]
    Created { table_name: String },
    /// Edited table overwritten in place; draft cleared.
    #[serde(rename_all = "camelCase")]
    Updated { table_name: String },
    /// The name is taken; waiting for merge/replace/cancel. Draft kept.
    #[serde(rename_all = "camelCase")]
    Conflict { table_name: String },
    /// The edited table no longer exists; draft discarded, nothing written.
    #[serde(rename_all = "camelCase")]
    EditTargetMissing { table_name: String },
    /// Precondition failed; nothing changed.
    Rejected { reason: SaveRejection },
}

/// How to settle a name collision on save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum ConflictResolution {
    /// Append the draft to the existing table.
    Merge,
    /// Send the existing table to history and start over with the draft.
    Replace,
}

/// Result of [`OrderManager::resolve_conflict`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ResolveOutcome {
    #[serde(rename_all = "camelCase")]
    Merged { table_name: String },
    #[serde(rename_all = "camelCase")]
    Replaced { table_name: String },
    /// The conflicting table was closed before resolution; saved as new.
    #[serde(rename_all = "camelCase")]
    Created { table_name: String },
}

/// A destructive action waiting for the waiter's confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum PendingConfirmation {
    /// Move a table to history.
    #[serde(rename_all = "camelCase")]
    CloseTable { table_name: String },
    /// Throw away the unsaved draft, then optionally start editing a table.
    #[serde(rename_all = "camelCase")]
    OverwriteDraft { then_edit: Option<String> },
    /// Empty the history.
    ClearHistory,
}

/// Result of [`OrderManager::confirm`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum Confirmed {
    #[serde(rename_all = "camelCase")]
    TableClosed { table_name: String },
    /// The table was already gone; nothing changed.
    #[serde(rename_all = "camelCase")]
    TableAlreadyClosed { table_name: String },
    DraftDiscarded,
    #[serde(rename_all = "camelCase")]
    EditStarted { table_name: String },
    HistoryCleared,
}

/// Result of a request that may need confirmation first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Request {
    /// Done immediately.
    Done,
    /// Registered; call `confirm` or `cancel_confirmation`.
    NeedsConfirmation { pending: PendingConfirmation },
}

/// Which persisted collections changed since the last [`OrderManager::take_dirty`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dirty {
    pub draft: bool,
    pub tables: bool,
    pub history: bool,
}

impl Dirty {
    pub fn any(&self) -> bool {
        self.draft || self.tables || self.history
    }
}

// =============================================================================
// Order Manager
// =============================================================================

/// The order/table state container.
///
/// ## Invariants
/// - Table names are canonical ([`normalize`]d) and unique
/// - History is most-recent-first and entries are never modified
/// - A pending conflict always names a table that existed when the save ran
#[derive(Debug, Clone, Default)]
pub struct OrderManager {
    draft: DraftOrder,
    tables: ActiveTables,
    history: Vec<HistoricOrder>,
    pending_conflict: Option<String>,
    pending_confirmation: Option<PendingConfirmation>,
    dirty: Dirty,
}

impl OrderManager {
    /// Creates an empty manager.
    pub fn new() -> Self {
        OrderManager::default()
    }

    /// Restores the manager from the collections loaded at startup.
    pub fn from_snapshot(snapshot: OrderSnapshot) -> Self {
        OrderManager {
            draft: snapshot.draft,
            tables: snapshot.tables,
            history: snapshot.history,
            ..OrderManager::default()
        }
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    pub fn draft(&self) -> &DraftOrder {
        &self.draft
    }

    pub fn tables(&self) -> &ActiveTables {
        &self.tables
    }

    pub fn table(&self, table_name: &str) -> Option<&TableData> {
        self.tables.get(table_name)
    }

    pub fn history(&self) -> &[HistoricOrder] {
        &self.history
    }

    pub fn pending_confirmation(&self) -> Option<&PendingConfirmation> {
        self.pending_confirmation.as_ref()
    }

    pub fn phase(&self) -> Phase {
        match &self.pending_conflict {
            Some(table_name) => Phase::ConflictPending {
                table_name: table_name.clone(),
            },
            None if self.draft.is_trivial() => Phase::Idle,
            None => Phase::Drafting,
        }
    }

    /// Returns and clears the dirty flags. The caller persists what changed.
    pub fn take_dirty(&mut self) -> Dirty {
        std::mem::take(&mut self.dirty)
    }

    /// Puts flags back after a failed save so the next save retries them.
    pub fn restore_dirty(&mut self, dirty: Dirty) {
        self.dirty.draft |= dirty.draft;
        self.dirty.tables |= dirty.tables;
        self.dirty.history |= dirty.history;
    }

    // -------------------------------------------------------------------------
    // Draft
    // -------------------------------------------------------------------------
    //
    // Any draft change abandons a pending conflict: the merge/replace choice
    // was made against the draft as it was.

    pub fn add_item(&mut self, dish: &Dish, modification: &str, quantity: u32) -> CoreResult<()> {
        self.draft.add_item(dish, modification, quantity)?;
        self.draft_changed();
        Ok(())
    }

    pub fn remove_item(&mut self, id: &str) -> bool {
        let removed = self.draft.remove_item(id);
        if removed {
            self.draft_changed();
        }
        removed
    }

    pub fn set_table_name(&mut self, text: impl Into<String>) {
        self.draft.set_table_name(text);
        self.draft_changed();
    }

    pub fn set_requests(&mut self, text: impl Into<String>) {
        self.draft.set_requests(text);
        self.draft_changed();
    }

    /// Clears the draft without asking. See [`OrderManager::request_discard_draft`]
    /// for the confirmed variant.
    pub fn reset_draft(&mut self) {
        self.pending_conflict = None;
        self.draft.reset();
        // Always flag it: the store must drop any leftover draft key
        self.dirty.draft = true;
    }

    fn draft_changed(&mut self) {
        self.pending_conflict = None;
        self.dirty.draft = true;
    }

    // -------------------------------------------------------------------------
    // Save / conflict resolution
    // -------------------------------------------------------------------------

    /// Commits the draft.
    ///
    /// ```rust
    /// use chrono::Local;
    /// use mesa_core::{Dish, Money, OrderManager, SaveOutcome};
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
    /// let mut orders = OrderManager::new();
    /// orders.add_item(&dish, "", 1).unwrap();
    /// orders.set_table_name("5");
    ///
    /// let outcome = orders.save(Local::now());
    /// assert_eq!(outcome, SaveOutcome::Created { table_name: "Mesa 5".into() });
    /// assert!(orders.draft().is_empty());
    /// ```
    pub fn save(&mut self, now: DateTime<Local>) -> SaveOutcome {
        if self.draft.is_empty() {
            return SaveOutcome::Rejected {
                reason: SaveRejection::EmptyOrder,
            };
        }
        if self.draft.table_name().trim().is_empty() {
            return SaveOutcome::Rejected {
                reason: SaveRejection::BlankTableName,
            };
        }

        if let Some(target) = self.draft.editing_table_name().map(str::to_string) {
            return self.save_edit(target);
        }

        let table_name = normalize(self.draft.table_name());
        if self.tables.contains_key(&table_name) {
            self.pending_conflict = Some(table_name.clone());
            return SaveOutcome::Conflict { table_name };
        }

        self.insert_from_draft(&table_name, now);
        self.reset_draft();
        SaveOutcome::Created { table_name }
    }

    fn save_edit(&mut self, target: String) -> SaveOutcome {
        let requests = self.draft.trimmed_requests();
        let order = self.draft.order().to_vec();

        match self.tables.get_mut(&target) {
            Some(table) => {
                table.order = order;
                table.requests = requests;
                self.dirty.tables = true;
                self.reset_draft();
                SaveOutcome::Updated { table_name: target }
            }
            None => {
                self.reset_draft();
                SaveOutcome::EditTargetMissing { table_name: target }
            }
        }
    }

    /// Settles a pending name collision.
    pub fn resolve_conflict(
        &mut self,
        resolution: ConflictResolution,
        now: DateTime<Local>,
    ) -> CoreResult<ResolveOutcome> {
        let table_name = self
            .pending_conflict
            .take()
            .ok_or(CoreError::NoPendingConflict)?;

        let outcome = match (resolution, self.tables.contains_key(&table_name)) {
            (_, false) => {
                self.insert_from_draft(&table_name, now);
                ResolveOutcome::Created { table_name }
            }
            (ConflictResolution::Merge, true) => {
                self.merge_into(&table_name);
                ResolveOutcome::Merged { table_name }
            }
            (ConflictResolution::Replace, true) => {
                self.archive_table(&table_name, now.with_timezone(&Utc));
                self.insert_from_draft(&table_name, now);
                ResolveOutcome::Replaced { table_name }
            }
        };

        self.reset_draft();
        Ok(outcome)
    }

    /// Backs out of a pending conflict, keeping the draft as it is.
    pub fn cancel_conflict(&mut self) -> bool {
        self.pending_conflict.take().is_some()
    }

    fn insert_from_draft(&mut self, table_name: &str, now: DateTime<Local>) {
        let table = TableData {
            order: self.draft.order().to_vec(),
            created_at: now.format(CREATED_AT_FORMAT).to_string(),
            requests: self.draft.trimmed_requests(),
        };
        self.tables.insert(table_name.to_string(), table);
        self.dirty.tables = true;
    }

    fn merge_into(&mut self, table_name: &str) {
        let draft_order = self.draft.order().to_vec();
        let draft_requests = self.draft.trimmed_requests();

        if let Some(table) = self.tables.get_mut(table_name) {
            table.order.extend(draft_order);
            table.requests = join_requests(table.requests.as_deref(), draft_requests.as_deref());
            self.dirty.tables = true;
        }
    }

    // -------------------------------------------------------------------------
    // Table lifecycle (unconfirmed primitives)
    // -------------------------------------------------------------------------

    /// Moves a table to the front of history. Returns false if it was not active.
    pub fn close_table(&mut self, table_name: &str, now: DateTime<Local>) -> bool {
        self.archive_table(table_name, now.with_timezone(&Utc))
    }

    /// Empties the history.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.dirty.history = true;
    }

    fn archive_table(&mut self, table_name: &str, completed_at: DateTime<Utc>) -> bool {
        let Some(table) = self.tables.remove(table_name) else {
            return false;
        };
        self.history
            .insert(0, HistoricOrder::from_table(table_name, table, completed_at));
        self.dirty.tables = true;
        self.dirty.history = true;
        true
    }

    /// Loads a table into the draft for editing, without asking.
    pub fn begin_edit(&mut self, table_name: &str) -> CoreResult<()> {
        let table = self
            .tables
            .get(table_name)
            .ok_or_else(|| CoreError::TableNotFound(table_name.to_string()))?;
        self.draft.begin_edit(table_name, table);
        self.draft_changed();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Confirmed requests
    // -------------------------------------------------------------------------

    /// Starts editing a table. An unsaved new order must be discarded first,
    /// so in that case the request waits for confirmation.
    pub fn request_edit(&mut self, table_name: &str) -> CoreResult<Request> {
        if !self.tables.contains_key(table_name) {
            return Err(CoreError::TableNotFound(table_name.to_string()));
        }

        if self.has_unsaved_new_order() {
            return Ok(self.ask(PendingConfirmation::OverwriteDraft {
                then_edit: Some(table_name.to_string()),
            }));
        }

        self.begin_edit(table_name)?;
        Ok(Request::Done)
    }

    /// Asks to close a table.
    pub fn request_close_table(&mut self, table_name: &str) -> CoreResult<Request> {
        if !self.tables.contains_key(table_name) {
            return Err(CoreError::TableNotFound(table_name.to_string()));
        }
        Ok(self.ask(PendingConfirmation::CloseTable {
            table_name: table_name.to_string(),
        }))
    }

    /// Asks to clear the history.
    pub fn request_clear_history(&mut self) -> Request {
        self.ask(PendingConfirmation::ClearHistory)
    }

    /// Throws the draft away; asks first if it holds an unsaved new order.
    pub fn request_discard_draft(&mut self) -> Request {
        if self.has_unsaved_new_order() {
            return self.ask(PendingConfirmation::OverwriteDraft { then_edit: None });
        }
        self.reset_draft();
        Request::Done
    }

    /// Runs the pending confirmation.
    pub fn confirm(&mut self, now: DateTime<Local>) -> CoreResult<Confirmed> {
        let pending = self
            .pending_confirmation
            .take()
            .ok_or(CoreError::NoPendingConfirmation)?;

        let confirmed = match pending {
            PendingConfirmation::CloseTable { table_name } => {
                if self.close_table(&table_name, now) {
                    Confirmed::TableClosed { table_name }
                } else {
                    Confirmed::TableAlreadyClosed { table_name }
                }
            }
            PendingConfirmation::ClearHistory => {
                self.clear_history();
                Confirmed::HistoryCleared
            }
            PendingConfirmation::OverwriteDraft { then_edit } => {
                self.reset_draft();
                match then_edit {
                    Some(table_name) if self.tables.contains_key(&table_name) => {
                        self.begin_edit(&table_name)?;
                        Confirmed::EditStarted { table_name }
                    }
                    _ => Confirmed::DraftDiscarded,
                }
            }
        };

        Ok(confirmed)
    }

    /// Drops the pending confirmation, if any.
    pub fn cancel_confirmation(&mut self) -> Option<PendingConfirmation> {
        self.pending_confirmation.take()
    }

    fn ask(&mut self, pending: PendingConfirmation) -> Request {
        self.pending_confirmation = Some(pending.clone());
        Request::NeedsConfirmation { pending }
    }

    fn has_unsaved_new_order(&self) -> bool {
        !self.draft.is_empty() && !self.draft.is_editing()
    }
}

/// Joins order-wide requests as `"existing; new"`, skipping absent parts.
/// Duplicates are kept.
fn join_requests(existing: Option<&str>, new: Option<&str>) -> Option<String> {
    let joined = [existing, new]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("; ");
    Some(joined).filter(|s| !s.is_empty())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use chrono::TimeZone;

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

    fn at(hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 1, hour, minute, 0).unwrap()
    }

    fn draft_for(orders: &mut OrderManager, table: &str, codes: &[&str], requests: &str) {
        for code in codes {
            orders.add_item(&dish(code, 1000), "", 1).unwrap();
        }
        orders.set_table_name(table);
        orders.set_requests(requests);
    }

    fn codes(table: &TableData) -> Vec<&str> {
        table.order.iter().map(|i| i.dish.code.as_str()).collect()
    }

    #[test]
    fn test_save_new_table_normalizes_and_clears_draft() {
        let mut orders = OrderManager::new();
        draft_for(&mut orders, "5", &["A1"], "  sin cebolla ");

        let outcome = orders.save(at(14, 30));

        assert_eq!(outcome, SaveOutcome::Created { table_name: "Mesa 5".into() });
        assert_eq!(orders.tables().len(), 1);
        let table = orders.table("Mesa 5").unwrap();
        assert_eq!(table.created_at, "14:30");
        assert_eq!(table.requests.as_deref(), Some("sin cebolla"));
        assert!(orders.draft().is_trivial());
        assert_eq!(orders.phase(), Phase::Idle);
    }

    #[test]
    fn test_save_rejections_leave_state_alone() {
        let mut orders = OrderManager::new();
        orders.set_table_name("5");
        assert_eq!(
            orders.save(at(12, 0)),
            SaveOutcome::Rejected { reason: SaveRejection::EmptyOrder }
        );

        orders.add_item(&dish("A1", 1000), "", 1).unwrap();
        orders.set_table_name("   ");
        assert_eq!(
            orders.save(at(12, 0)),
            SaveOutcome::Rejected { reason: SaveRejection::BlankTableName }
        );

        assert!(orders.tables().is_empty());
        assert_eq!(orders.draft().item_count(), 1);
    }

    #[test]
    fn test_collision_enters_conflict_and_keeps_draft() {
        let mut orders = OrderManager::new();
        draft_for(&mut orders, "5", &["A1"], "");
        orders.save(at(12, 0));

        draft_for(&mut orders, "Mesa 5", &["B1"], "");
        let outcome = orders.save(at(12, 30));

        assert_eq!(outcome, SaveOutcome::Conflict { table_name: "Mesa 5".into() });
        assert_eq!(orders.phase(), Phase::ConflictPending { table_name: "Mesa 5".into() });
        assert_eq!(orders.draft().item_count(), 1);
    }

    #[test]
    fn test_merge_appends_and_joins_requests() {
        let mut orders = OrderManager::new();
        draft_for(&mut orders, "5", &["A1", "A2"], "sin sal");
        orders.save(at(12, 0));

        draft_for(&mut orders, "5", &["B1"], "rápido");
        orders.save(at(12, 45));
        let outcome = orders.resolve_conflict(ConflictResolution::Merge, at(12, 46)).unwrap();

        assert_eq!(outcome, ResolveOutcome::Merged { table_name: "Mesa 5".into() });
        assert_eq!(orders.tables().len(), 1);
        let table = orders.table("Mesa 5").unwrap();
        assert_eq!(codes(table), vec!["A1", "A2", "B1"]);
        assert_eq!(table.requests.as_deref(), Some("sin sal; rápido"));
        assert_eq!(table.created_at, "12:00");
        assert!(orders.history().is_empty());
        assert_eq!(orders.phase(), Phase::Idle);
    }

    #[test]
    fn test_merge_requests_skip_absent_parts() {
        assert_eq!(join_requests(None, None), None);
        assert_eq!(join_requests(Some("a"), None).as_deref(), Some("a"));
        assert_eq!(join_requests(None, Some("b")).as_deref(), Some("b"));
        assert_eq!(join_requests(Some("a"), Some("a")).as_deref(), Some("a; a"));
    }

    #[test]
    fn test_replace_archives_previous_table() {
        let mut orders = OrderManager::new();
        draft_for(&mut orders, "5", &["A1"], "");
        orders.save(at(12, 0));
        let previous = orders.table("Mesa 5").unwrap().clone();

        draft_for(&mut orders, "5", &["B1", "B2"], "nuevo");
        orders.save(at(13, 0));
        let outcome = orders.resolve_conflict(ConflictResolution::Replace, at(13, 5)).unwrap();

        assert_eq!(outcome, ResolveOutcome::Replaced { table_name: "Mesa 5".into() });
        assert_eq!(orders.history().len(), 1);
        assert_eq!(orders.history()[0].table, previous);
        assert_eq!(orders.history()[0].table_name, "Mesa 5");
        assert_eq!(orders.history()[0].completed_at, at(13, 5).with_timezone(&Utc));

        let table = orders.table("Mesa 5").unwrap();
        assert_eq!(codes(table), vec!["B1", "B2"]);
        assert_eq!(table.created_at, "13:05");
        assert_eq!(table.requests.as_deref(), Some("nuevo"));
    }

    #[test]
    fn test_resolve_without_conflict_is_an_error() {
        let mut orders = OrderManager::new();
        let err = orders.resolve_conflict(ConflictResolution::Merge, at(12, 0)).unwrap_err();
        assert!(matches!(err, CoreError::NoPendingConflict));
    }

    #[test]
    fn test_cancel_conflict_keeps_draft() {
        let mut orders = OrderManager::new();
        draft_for(&mut orders, "5", &["A1"], "");
        orders.save(at(12, 0));
        draft_for(&mut orders, "5", &["B1"], "");
        orders.save(at(12, 1));

        assert!(orders.cancel_conflict());
        assert_eq!(orders.phase(), Phase::Drafting);
        assert_eq!(orders.draft().item_count(), 1);
    }

    #[test]
    fn test_draft_change_abandons_conflict() {
        let mut orders = OrderManager::new();
        draft_for(&mut orders, "5", &["A1"], "");
        orders.save(at(12, 0));
        draft_for(&mut orders, "5", &["B1"], "");
        orders.save(at(12, 1));

        orders.set_table_name("6");
        assert_eq!(orders.phase(), Phase::Drafting);
        assert_eq!(
            orders.save(at(12, 2)),
            SaveOutcome::Created { table_name: "Mesa 6".into() }
        );
    }

    #[test]
    fn test_edit_save_overwrites_order_and_requests_only() {
        let mut orders = OrderManager::new();
        draft_for(&mut orders, "5", &["A1"], "sin sal");
        orders.save(at(12, 0));

        orders.request_edit("Mesa 5").unwrap();
        assert_eq!(orders.draft().table_name(), "5");
        orders.add_item(&dish("B1", 500), "", 1).unwrap();
        orders.set_requests("");

        let outcome = orders.save(at(15, 0));

        assert_eq!(outcome, SaveOutcome::Updated { table_name: "Mesa 5".into() });
        let table = orders.table("Mesa 5").unwrap();
        assert_eq!(codes(table), vec!["A1", "B1"]);
        assert_eq!(table.requests, None);
        assert_eq!(table.created_at, "12:00");
        assert!(orders.draft().is_trivial());
    }

    #[test]
    fn test_edit_save_aborts_when_table_was_closed() {
        let mut orders = OrderManager::new();
        draft_for(&mut orders, "5", &["A1"], "");
        orders.save(at(12, 0));
        orders.request_edit("Mesa 5").unwrap();

        assert!(orders.close_table("Mesa 5", at(12, 30)));
        let outcome = orders.save(at(12, 31));

        assert_eq!(outcome, SaveOutcome::EditTargetMissing { table_name: "Mesa 5".into() });
        assert!(orders.tables().is_empty());
        assert!(orders.draft().is_trivial());
        assert_eq!(orders.history().len(), 1);
    }

    #[test]
    fn test_close_table_requires_confirmation() {
        let mut orders = OrderManager::new();
        draft_for(&mut orders, "5", &["A1"], "");
        orders.save(at(12, 0));

        let request = orders.request_close_table("Mesa 5").unwrap();
        assert!(matches!(request, Request::NeedsConfirmation { .. }));
        assert_eq!(orders.tables().len(), 1);

        let confirmed = orders.confirm(at(13, 0)).unwrap();
        assert_eq!(confirmed, Confirmed::TableClosed { table_name: "Mesa 5".into() });
        assert!(orders.tables().is_empty());
        assert_eq!(orders.history().len(), 1);
    }

    #[test]
    fn test_cancelled_close_changes_nothing() {
        let mut orders = OrderManager::new();
        draft_for(&mut orders, "5", &["A1"], "");
        orders.save(at(12, 0));

        orders.request_close_table("Mesa 5").unwrap();
        assert!(orders.cancel_confirmation().is_some());
        assert!(matches!(orders.confirm(at(13, 0)), Err(CoreError::NoPendingConfirmation)));
        assert_eq!(orders.tables().len(), 1);
    }

    #[test]
    fn test_repeated_closes_keep_history_most_recent_first() {
        let mut orders = OrderManager::new();
        for table in ["1", "2", "3"] {
            draft_for(&mut orders, table, &["A1"], "");
            orders.save(at(12, 0));
        }

        orders.close_table("Mesa 2", at(13, 0));
        orders.close_table("Mesa 1", at(13, 10));
        orders.close_table("Mesa 3", at(13, 20));

        let names: Vec<&str> = orders.history().iter().map(|h| h.table_name.as_str()).collect();
        assert_eq!(names, vec!["Mesa 3", "Mesa 1", "Mesa 2"]);
        assert!(orders.tables().is_empty());
    }

    #[test]
    fn test_close_unknown_table_is_an_error() {
        let mut orders = OrderManager::new();
        assert!(matches!(
            orders.request_close_table("Mesa 9"),
            Err(CoreError::TableNotFound(_))
        ));
        assert!(!orders.close_table("Mesa 9", at(12, 0)));
    }

    #[test]
    fn test_clear_history_after_confirmation() {
        let mut orders = OrderManager::new();
        for table in ["1", "2"] {
            draft_for(&mut orders, table, &["A1"], "");
            orders.save(at(12, 0));
            orders.close_table(&format!("Mesa {}", table), at(12, 5));
        }
        assert_eq!(orders.history().len(), 2);

        orders.request_clear_history();
        assert_eq!(orders.history().len(), 2);
        assert_eq!(orders.confirm(at(12, 10)).unwrap(), Confirmed::HistoryCleared);
        assert!(orders.history().is_empty());
    }

    #[test]
    fn test_edit_over_unsaved_order_asks_first() {
        let mut orders = OrderManager::new();
        draft_for(&mut orders, "5", &["A1"], "");
        orders.save(at(12, 0));
        draft_for(&mut orders, "7", &["B1"], "");

        let request = orders.request_edit("Mesa 5").unwrap();
        assert_eq!(
            request,
            Request::NeedsConfirmation {
                pending: PendingConfirmation::OverwriteDraft {
                    then_edit: Some("Mesa 5".into())
                }
            }
        );
        assert_eq!(orders.draft().table_name(), "7");

        let confirmed = orders.confirm(at(12, 5)).unwrap();
        assert_eq!(confirmed, Confirmed::EditStarted { table_name: "Mesa 5".into() });
        assert!(orders.draft().is_editing());
        assert_eq!(codes(orders.table("Mesa 5").unwrap()), vec!["A1"]);
        assert_eq!(orders.draft().order()[0].dish.code, "A1");
    }

    #[test]
    fn test_edit_while_editing_switches_without_asking() {
        let mut orders = OrderManager::new();
        for table in ["1", "2"] {
            draft_for(&mut orders, table, &["A1"], "");
            orders.save(at(12, 0));
        }
        orders.request_edit("Mesa 1").unwrap();
        assert_eq!(orders.request_edit("Mesa 2").unwrap(), Request::Done);
        assert_eq!(orders.draft().editing_table_name(), Some("Mesa 2"));
    }

    #[test]
    fn test_discard_draft() {
        let mut orders = OrderManager::new();
        orders.set_table_name("5");
        assert_eq!(orders.request_discard_draft(), Request::Done);
        assert!(orders.draft().is_trivial());

        draft_for(&mut orders, "5", &["A1"], "");
        assert!(matches!(
            orders.request_discard_draft(),
            Request::NeedsConfirmation { .. }
        ));
        assert_eq!(orders.confirm(at(12, 0)).unwrap(), Confirmed::DraftDiscarded);
        assert!(orders.draft().is_trivial());
    }

    #[test]
    fn test_dirty_flags_track_changes() {
        let mut orders = OrderManager::new();
        assert!(!orders.take_dirty().any());

        draft_for(&mut orders, "5", &["A1"], "");
        assert_eq!(
            orders.take_dirty(),
            Dirty { draft: true, tables: false, history: false }
        );

        orders.save(at(12, 0));
        assert_eq!(
            orders.take_dirty(),
            Dirty { draft: true, tables: true, history: false }
        );

        orders.close_table("Mesa 5", at(12, 5));
        assert_eq!(
            orders.take_dirty(),
            Dirty { draft: false, tables: true, history: true }
        );
    }

    #[test]
    fn test_restore_dirty_merges_flags() {
        let mut orders = OrderManager::new();
        orders.set_table_name("5");
        let dirty = orders.take_dirty();

        orders.clear_history();
        orders.restore_dirty(dirty);

        assert_eq!(
            orders.take_dirty(),
            Dirty { draft: true, tables: false, history: true }
        );
    }

    #[test]
    fn test_reset_twice_equals_once() {
        let mut orders = OrderManager::new();
        draft_for(&mut orders, "5", &["A1"], "x");

        orders.reset_draft();
        let once = orders.draft().clone();
        orders.reset_draft();

        assert_eq!(orders.draft(), &once);
        assert!(orders.draft().is_trivial());
        assert!(orders.take_dirty().draft);
    }
}
