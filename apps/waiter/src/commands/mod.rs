//! # Commands Module
//!
//! One function per user intent. The IPC shell decodes a request line and
//! calls exactly one of these.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs           ◄─── You are here (exports)
//! ├── order.rs         ◄─── Draft building, save, merge/replace
//! ├── tables.rs        ◄─── List, edit, close active tables
//! ├── history.rs       ◄─── Closed tables, clear-all
//! ├── confirmation.rs  ◄─── confirm / cancel pending actions
//! ├── menu.rs          ◄─── Dish catalog
//! └── config.rs        ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  View                                                                   │
//! │  ────                                                                   │
//! │  {"cmd": "add_item", "code": "A1", "variation": "Pollo"}               │
//! │         │                                                               │
//! │         │ (stdin line)                                                  │
//! │         ▼                                                               │
//! │  ipc::dispatch                                                          │
//! │  ─────────────                                                          │
//! │  commands::order::add_item(                                             │
//! │      &ctx.orders,   ◄── Injected state                                  │
//! │      &ctx.menu,                                                         │
//! │      &ctx.db,                                                           │
//! │      code, variation, modification, quantity  ◄── From the request      │
//! │  ) -> Result<DraftView, ApiError>                                       │
//! │         │                                                               │
//! │         │ (stdout line)                                                 │
//! │         ▼                                                               │
//! │  {"ok": true, "data": {...draft...}}                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the orders
//! fn get_draft(orders: &OrderState)
//!
//! // Mutates orders, so also saves
//! async fn set_requests(orders: &OrderState, db: &DbState, ...)
//!
//! // Needs the catalog too
//! async fn add_item(orders: &OrderState, menu: &MenuState, db: &DbState, ...)
//! ```

pub mod config;
pub mod confirmation;
pub mod history;
pub mod menu;
pub mod order;
pub mod tables;
