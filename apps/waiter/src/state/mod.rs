//! # State Module
//!
//! Application state for the waiter app.
//!
//! ## Why Multiple State Types?
//! Instead of a single `AppState` struct containing everything, each concern
//! gets its own type and each command takes only the ones it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 ipc::Context (built in lib.rs)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │     ┌───────────────┬────────┴────────┬──────────────────┐             │
//! │     ▼               ▼                 ▼                  ▼              │
//! │  ┌──────────┐  ┌──────────┐  ┌──────────────┐  ┌──────────────────┐    │
//! │  │OrderState│  │ DbState  │  │  MenuState   │  │   ConfigState    │    │
//! │  │          │  │          │  │              │  │                  │    │
//! │  │ Arc<     │  │ Database │  │ Menu         │  │ restaurant_name  │    │
//! │  │  Mutex<  │  │ + save-  │  │ (read-only)  │  │ currency_symbol  │    │
//! │  │  Order-  │  │ on-change│  │              │  │ db/menu paths    │    │
//! │  │  Manager>│  │          │  │              │  │                  │    │
//! │  └──────────┘  └──────────┘  └──────────────┘  └──────────────────┘    │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • OrderState: Arc<Mutex<T>>, one transition at a time                 │
//! │  • DbState: Database has an internal connection pool                   │
//! │  • MenuState, ConfigState: read-only after initialization              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod menu;
mod orders;

pub use config::ConfigState;
pub use db::DbState;
pub use menu::MenuState;
pub use orders::OrderState;
