//! # Mesa Waiter Entry Point
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Mesa Waiter                                    │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                        View layer                                │  │
//! │  │  • Dish picker          • Table list                             │  │
//! │  │  • Order summary        • Confirmation prompts                   │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                    one JSON line per request                           │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Rust Backend (this crate)                     │  │
//! │  │                                                                  │  │
//! │  │  main.rs ────► Starts the runtime                                │  │
//! │  │  lib.rs ─────► Logging, config, database, state                  │  │
//! │  │  ipc.rs ─────► stdin/stdout loop                                 │  │
//! │  │  commands/ ──► add_item, save_order, close_table, confirm        │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                         SQLite Database                          │  │
//! │  │  mesa.db (local file, WAL mode)                                  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

#[tokio::main]
async fn main() {
    // The actual setup is in lib.rs for better testability
    if let Err(err) = mesa_waiter_lib::run().await {
        eprintln!("mesa-waiter: {}", err);
        std::process::exit(1);
    }
}
