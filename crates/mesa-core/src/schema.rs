//! # Stored Document Schema
//!
//! Decodes the loosely-typed JSON documents read from local storage into
//! strict types. Nothing here fails: bad data degrades to documented
//! defaults and is reported as a [`SchemaIssue`] for the caller to log.
//!
//! ## Fallback Rules
//! ```text
//! ┌──────────────────┬────────────────────────────────┬──────────────────────────┐
//! │ Document         │ Problem                        │ Result                   │
//! ├──────────────────┼────────────────────────────────┼──────────────────────────┤
//! │ any              │ key absent                     │ empty default, no issue  │
//! │ activeTables     │ not an object                  │ {}                       │
//! │   entry          │ not an object                  │ entry dropped            │
//! │   .order         │ missing / not an array         │ []                       │
//! │   .createdAt     │ missing / not a string         │ ""                       │
//! │   .requests      │ blank / not a string           │ absent                   │
//! │ orderHistory     │ not an array                   │ []                       │
//! │   entry          │ no tableName or completedAt    │ entry dropped            │
//! │ draftOrder       │ not an object / order missing  │ empty draft              │
//! │   .tableName     │ not a string                   │ ""                       │
//! │   .requests      │ not a string                   │ ""                       │
//! │   .isEditing     │ true without editingTableName  │ not editing              │
//! │ order item       │ does not decode                │ item dropped             │
//! │   .price         │ negative or above the maximum  │ item dropped             │
//! └──────────────────┴────────────────────────────────┴──────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::draft::DraftOrder;
use crate::types::{ActiveTables, HistoricOrder, OrderItem, TableData};
use crate::validation::validate_price;

/// Storage key of the active tables document.
pub const ACTIVE_TABLES_KEY: &str = "activeTables";
/// Storage key of the order history document.
pub const ORDER_HISTORY_KEY: &str = "orderHistory";
/// Storage key of the draft order document.
pub const DRAFT_ORDER_KEY: &str = "draftOrder";

/// Something in a stored document that had to be dropped or defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    /// Location, e.g. `activeTables["Mesa 4"].order[2]`.
    pub path: String,
    pub detail: String,
}

impl SchemaIssue {
    fn new(path: impl Into<String>, detail: impl Into<String>) -> Self {
        SchemaIssue {
            path: path.into(),
            detail: detail.into(),
        }
    }
}

/// A decoded value plus everything that was wrong with its source.
#[derive(Debug, Clone)]
pub struct Decoded<T> {
    pub value: T,
    pub issues: Vec<SchemaIssue>,
}

impl<T> Decoded<T> {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// The three persisted collections, as loaded at startup.
#[derive(Debug, Clone, Default)]
pub struct OrderSnapshot {
    pub tables: ActiveTables,
    pub history: Vec<HistoricOrder>,
    pub draft: DraftOrder,
}

// =============================================================================
// Documents
// =============================================================================

/// Decodes the `activeTables` document.
pub fn decode_tables(doc: Option<&Value>) -> Decoded<ActiveTables> {
    let mut issues = Vec::new();
    let mut tables = ActiveTables::new();

    match doc {
        None => {}
        Some(Value::Object(map)) => {
            for (name, entry) in map {
                let path = format!("{}[{:?}]", ACTIVE_TABLES_KEY, name);
                match entry.as_object() {
                    Some(obj) => {
                        tables.insert(name.clone(), decode_table_data(obj, &path, &mut issues));
                    }
                    None => issues.push(SchemaIssue::new(path, "entry is not an object, dropped")),
                }
            }
        }
        Some(_) => issues.push(SchemaIssue::new(
            ACTIVE_TABLES_KEY,
            "document is not an object, using no tables",
        )),
    }

    Decoded { value: tables, issues }
}

/// Decodes the `orderHistory` document, keeping the stored order.
pub fn decode_history(doc: Option<&Value>) -> Decoded<Vec<HistoricOrder>> {
    let mut issues = Vec::new();
    let mut history = Vec::new();

    match doc {
        None => {}
        Some(Value::Array(entries)) => {
            for (idx, entry) in entries.iter().enumerate() {
                let path = format!("{}[{}]", ORDER_HISTORY_KEY, idx);
                if let Some(h) = decode_historic_order(entry, &path, &mut issues) {
                    history.push(h);
                }
            }
        }
        Some(_) => issues.push(SchemaIssue::new(
            ORDER_HISTORY_KEY,
            "document is not an array, using empty history",
        )),
    }

    Decoded { value: history, issues }
}

/// Decodes the `draftOrder` document.
pub fn decode_draft(doc: Option<&Value>) -> Decoded<DraftOrder> {
    let mut issues = Vec::new();

    let obj = match doc {
        None => {
            return Decoded {
                value: DraftOrder::new(),
                issues,
            }
        }
        Some(Value::Object(obj)) if obj.get("order").is_some_and(Value::is_array) => obj,
        Some(_) => {
            issues.push(SchemaIssue::new(
                DRAFT_ORDER_KEY,
                "document is not a draft with an order array, using empty draft",
            ));
            return Decoded {
                value: DraftOrder::new(),
                issues,
            };
        }
    };

    let order = decode_order(obj.get("order"), &format!("{}.order", DRAFT_ORDER_KEY), &mut issues);
    let table_name = string_or_default(obj, "tableName", DRAFT_ORDER_KEY, &mut issues);
    let requests = string_or_default(obj, "requests", DRAFT_ORDER_KEY, &mut issues);

    let is_editing = obj.get("isEditing").and_then(Value::as_bool).unwrap_or(false);
    let editing_table_name = obj
        .get("editingTableName")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let editing_table_name = match (is_editing, editing_table_name) {
        (true, Some(name)) => Some(name),
        (true, None) => {
            issues.push(SchemaIssue::new(
                format!("{}.isEditing", DRAFT_ORDER_KEY),
                "editing without a table name, treated as a new order",
            ));
            None
        }
        (false, _) => None,
    };

    Decoded {
        value: DraftOrder::restore(order, table_name, requests, editing_table_name),
        issues,
    }
}

// =============================================================================
// Parts
// =============================================================================

fn decode_table_data(obj: &Map<String, Value>, path: &str, issues: &mut Vec<SchemaIssue>) -> TableData {
    let order = match obj.get("order") {
        Some(v @ Value::Array(_)) => decode_order(Some(v), &format!("{}.order", path), issues),
        _ => {
            issues.push(SchemaIssue::new(format!("{}.order", path), "missing, using empty order"));
            Vec::new()
        }
    };

    let created_at = match obj.get("createdAt").and_then(Value::as_str) {
        Some(s) => s.to_string(),
        None => {
            issues.push(SchemaIssue::new(format!("{}.createdAt", path), "missing, using blank time"));
            String::new()
        }
    };

    let requests = match obj.get("requests") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()).filter(|s| !s.trim().is_empty()),
        Some(_) => {
            issues.push(SchemaIssue::new(format!("{}.requests", path), "not a string, dropped"));
            None
        }
    };

    TableData {
        order,
        created_at,
        requests,
    }
}

fn decode_historic_order(entry: &Value, path: &str, issues: &mut Vec<SchemaIssue>) -> Option<HistoricOrder> {
    let Some(obj) = entry.as_object() else {
        issues.push(SchemaIssue::new(path, "entry is not an object, dropped"));
        return None;
    };

    let Some(table_name) = obj.get("tableName").and_then(Value::as_str) else {
        issues.push(SchemaIssue::new(path, "entry has no tableName, dropped"));
        return None;
    };

    let completed_at = obj
        .get("completedAt")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc));
    let Some(completed_at) = completed_at else {
        issues.push(SchemaIssue::new(path, "entry has no valid completedAt, dropped"));
        return None;
    };

    let table = decode_table_data(obj, path, issues);
    Some(HistoricOrder::from_table(table_name, table, completed_at))
}

fn decode_order(doc: Option<&Value>, path: &str, issues: &mut Vec<SchemaIssue>) -> Vec<OrderItem> {
    let Some(items) = doc.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| {
            let decoded = serde_json::from_value::<OrderItem>(item.clone())
                .map_err(|e| e.to_string())
                .and_then(|item| {
                    validate_price("price", item.dish.price)
                        .map(|_| item)
                        .map_err(|e| e.to_string())
                });
            match decoded {
                Ok(item) => Some(item),
                Err(e) => {
                    issues.push(SchemaIssue::new(format!("{}[{}]", path, idx), format!("dropped: {}", e)));
                    None
                }
            }
        })
        .collect()
}

fn string_or_default(
    obj: &Map<String, Value>,
    field: &str,
    path: &str,
    issues: &mut Vec<SchemaIssue>,
) -> String {
    match obj.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            issues.push(SchemaIssue::new(format!("{}.{}", path, field), "not a string, using blank"));
            String::new()
        }
    }
}
