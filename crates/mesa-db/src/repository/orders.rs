//! # Order Snapshot Repository
//!
//! Loads and saves the three order documents through the key-value store.
//!
//! ## Load / Save Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  LOAD (startup)                                                        │
//! │                                                                         │
//! │  storage.get("activeTables") ──► JSON text                             │
//! │       │                                                                 │
//! │       ├── not valid JSON? ──► warn!, treat as absent                    │
//! │       ▼                                                                 │
//! │  mesa_core::schema::decode_tables ──► ActiveTables + issues            │
//! │       │                                                                 │
//! │       └── each issue ──► warn!                                         │
//! │                                                                         │
//! │  SAVE (after every state change)                                       │
//! │                                                                         │
//! │  Dirty { draft, tables, history }                                      │
//! │       │                                                                 │
//! │       ├── tables  ──► set("activeTables", ...)                         │
//! │       ├── history ──► set("orderHistory", ...)                         │
//! │       └── draft   ──► trivial? remove("draftOrder")                    │
//! │                                  : set("draftOrder", ...)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde_json::Value;
use tracing::{debug, warn};

use mesa_core::schema::{
    decode_draft, decode_history, decode_tables, Decoded, ACTIVE_TABLES_KEY, DRAFT_ORDER_KEY,
    ORDER_HISTORY_KEY,
};
use mesa_core::{ActiveTables, Dirty, DraftOrder, HistoricOrder, OrderManager, OrderSnapshot};

use crate::error::DbResult;
use crate::repository::storage::StorageRepository;

/// Repository for the `activeTables`, `orderHistory` and `draftOrder` documents.
#[derive(Debug, Clone)]
pub struct OrderSnapshotRepository {
    storage: StorageRepository,
}

impl OrderSnapshotRepository {
    /// Creates a new OrderSnapshotRepository.
    pub fn new(storage: StorageRepository) -> Self {
        OrderSnapshotRepository { storage }
    }

    // -------------------------------------------------------------------------
    // Load
    // -------------------------------------------------------------------------

    pub async fn load_tables(&self) -> DbResult<ActiveTables> {
        let doc = self.read_document(ACTIVE_TABLES_KEY).await?;
        Ok(report(ACTIVE_TABLES_KEY, decode_tables(doc.as_ref())))
    }

    pub async fn load_history(&self) -> DbResult<Vec<HistoricOrder>> {
        let doc = self.read_document(ORDER_HISTORY_KEY).await?;
        Ok(report(ORDER_HISTORY_KEY, decode_history(doc.as_ref())))
    }

    pub async fn load_draft(&self) -> DbResult<DraftOrder> {
        let doc = self.read_document(DRAFT_ORDER_KEY).await?;
        Ok(report(DRAFT_ORDER_KEY, decode_draft(doc.as_ref())))
    }

    /// Loads all three documents. Bad stored data never fails the load;
    /// only storage errors do.
    pub async fn load_all(&self) -> DbResult<OrderSnapshot> {
        let snapshot = OrderSnapshot {
            tables: self.load_tables().await?,
            history: self.load_history().await?,
            draft: self.load_draft().await?,
        };

        debug!(
            tables = snapshot.tables.len(),
            history = snapshot.history.len(),
            draft_items = snapshot.draft.item_count(),
            "Order snapshot loaded"
        );

        Ok(snapshot)
    }

    /// Reads and parses one document. Unparseable text counts as absent.
    async fn read_document(&self, key: &str) -> DbResult<Option<Value>> {
        let Some(text) = self.storage.get(key).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&text) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key = %key, error = %e, "Stored document is not valid JSON, ignoring it");
                Ok(None)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Save
    // -------------------------------------------------------------------------

    pub async fn save_tables(&self, tables: &ActiveTables) -> DbResult<()> {
        let json = serde_json::to_string(tables)?;
        self.storage.set(ACTIVE_TABLES_KEY, &json).await
    }

    pub async fn save_history(&self, history: &[HistoricOrder]) -> DbResult<()> {
        let json = serde_json::to_string(history)?;
        self.storage.set(ORDER_HISTORY_KEY, &json).await
    }

    /// Writes the draft, or removes the key when the draft is trivial.
    pub async fn save_draft(&self, draft: &DraftOrder) -> DbResult<()> {
        if draft.is_trivial() {
            self.storage.remove(DRAFT_ORDER_KEY).await?;
            return Ok(());
        }

        let json = serde_json::to_string(draft)?;
        self.storage.set(DRAFT_ORDER_KEY, &json).await
    }

    /// Writes whichever documents `dirty` marks as changed.
    ///
    /// Each document is attempted even if an earlier one failed; the first
    /// error is returned.
    pub async fn save_changes(&self, orders: &OrderManager, dirty: Dirty) -> DbResult<()> {
        let mut first_error = None;

        if dirty.tables {
            if let Err(e) = self.save_tables(orders.tables()).await {
                first_error.get_or_insert(e);
            }
        }
        if dirty.history {
            if let Err(e) = self.save_history(orders.history()).await {
                first_error.get_or_insert(e);
            }
        }
        if dirty.draft {
            if let Err(e) = self.save_draft(orders.draft()).await {
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Logs every schema issue and returns the decoded value.
fn report<T>(key: &str, decoded: Decoded<T>) -> T {
    for issue in &decoded.issues {
        warn!(key = %key, path = %issue.path, "Dropped stored data: {}", issue.detail);
    }
    decoded.value
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::{Local, TimeZone};
    use mesa_core::{Dish, Money, SaveOutcome};

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

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_empty_store_loads_defaults() {
        let db = db().await;
        let snapshot = db.orders().load_all().await.unwrap();

        assert!(snapshot.tables.is_empty());
        assert!(snapshot.history.is_empty());
        assert!(snapshot.draft.is_trivial());
    }

    #[tokio::test]
    async fn test_round_trip_through_manager() {
        let db = db().await;
        let repo = db.orders();
        let noon = Local.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();

        let mut orders = OrderManager::new();
        orders.add_item(&dish("A1", 1850), "sin sal", 2).unwrap();
        orders.set_table_name("5");
        assert_eq!(
            orders.save(noon),
            SaveOutcome::Created { table_name: "Mesa 5".into() }
        );
        orders.add_item(&dish("B1", 900), "", 1).unwrap();
        orders.set_table_name("6");
        orders.save(noon);
        orders.close_table("Mesa 6", noon);
        orders.add_item(&dish("C1", 500), "", 1).unwrap();

        repo.save_changes(&orders, orders.clone().take_dirty()).await.unwrap();

        let restored = OrderManager::from_snapshot(repo.load_all().await.unwrap());
        assert_eq!(restored.tables(), orders.tables());
        assert_eq!(restored.history(), orders.history());
        assert_eq!(restored.draft(), orders.draft());
    }

    #[tokio::test]
    async fn test_trivial_draft_removes_key() {
        let db = db().await;
        let repo = db.orders();

        let mut draft = DraftOrder::new();
        draft.set_table_name("5");
        repo.save_draft(&draft).await.unwrap();
        assert!(db.storage().get(DRAFT_ORDER_KEY).await.unwrap().is_some());

        draft.reset();
        repo.save_draft(&draft).await.unwrap();
        assert!(db.storage().get(DRAFT_ORDER_KEY).await.unwrap().is_none());

        // Resetting again leaves the key absent
        repo.save_draft(&draft).await.unwrap();
        assert!(db.storage().get(DRAFT_ORDER_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_documents_fall_back() {
        let db = db().await;
        let storage = db.storage();
        storage.set(ACTIVE_TABLES_KEY, "{not json").await.unwrap();
        storage.set(ORDER_HISTORY_KEY, r#"{"oops": true}"#).await.unwrap();
        storage.set(DRAFT_ORDER_KEY, "42").await.unwrap();

        let snapshot = db.orders().load_all().await.unwrap();

        assert!(snapshot.tables.is_empty());
        assert!(snapshot.history.is_empty());
        assert!(snapshot.draft.is_trivial());
    }

    #[tokio::test]
    async fn test_partial_tables_keep_good_entries() {
        let db = db().await;
        db.storage()
            .set(
                ACTIVE_TABLES_KEY,
                r#"{
                    "Mesa 1": {"order": [], "createdAt": "12:00"},
                    "Mesa 2": "garbage"
                }"#,
            )
            .await
            .unwrap();

        let tables = db.orders().load_tables().await.unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables["Mesa 1"].created_at, "12:00");
    }

    #[tokio::test]
    async fn test_save_changes_only_writes_dirty_documents() {
        let db = db().await;
        let repo = db.orders();

        let mut orders = OrderManager::new();
        orders.set_table_name("5");
        let dirty = orders.take_dirty();
        repo.save_changes(&orders, dirty).await.unwrap();

        assert_eq!(db.storage().keys().await.unwrap(), vec![DRAFT_ORDER_KEY.to_string()]);
    }
}
