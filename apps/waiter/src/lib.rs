//! # Mesa Waiter Library
//!
//! Core library for the Mesa waiter app.
//! This is the main entry point that loads the stored orders and serves
//! commands over stdin/stdout.
//!
//! ## Module Organization
//! ```text
//! mesa_waiter_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── ipc.rs          ◄─── JSON-lines request/response loop
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── orders.rs   ◄─── Shared order manager
//! │   ├── db.rs       ◄─── Database state + save-on-change
//! │   ├── menu.rs     ◄─── Dish catalog
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── order.rs    ◄─── Draft and save commands
//! │   ├── tables.rs   ◄─── Active table commands
//! │   ├── history.rs  ◄─── Order history commands
//! │   └── ...
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State Management (Multiple State Types)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │  OrderState  │ │   DbState    │ │  MenuState   │ │ ConfigState  │   │
//! │  │              │ │              │ │              │ │              │   │
//! │  │ • Draft      │ │ • SQLite     │ │ • Dishes     │ │ • Name       │   │
//! │  │ • Tables     │ │ • Persist    │ │ • Variations │ │ • Currency   │   │
//! │  │ • History    │ │   on change  │ │              │ │ • Paths      │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  Each command only requests the state it needs.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod ipc;
pub mod state;

use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ipc::Context;
use mesa_db::{Database, DbConfig};
use state::{ConfigState, DbState, MenuState, OrderState};

/// Runs the waiter app until stdin closes.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │     • Default: INFO, can be overridden with RUST_LOG                    │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • Defaults, then MESA_* environment variables                       │
/// │                                                                         │
/// │  3. Connect to Database ──────────────────────────────────────────────► │
/// │     • SQLite with WAL mode, pending migrations applied                  │
/// │                                                                         │
/// │  4. Restore Orders ───────────────────────────────────────────────────► │
/// │     • activeTables, orderHistory, draftOrder                            │
/// │     • Malformed entries dropped with a warning                          │
/// │                                                                         │
/// │  5. Load Menu ────────────────────────────────────────────────────────► │
/// │                                                                         │
/// │  6. Serve stdin ──► stdout ───────────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Mesa waiter");

    let config = ConfigState::from_env();

    let db_path = get_database_path(&config)?;
    info!(?db_path, "Database path determined");

    let db = Database::new(DbConfig::new(db_path)).await?;
    info!("Database connected and migrations applied");

    let snapshot = db.orders().load_all().await?;
    info!(
        tables = snapshot.tables.len(),
        history = snapshot.history.len(),
        "Orders restored"
    );

    let menu = MenuState::load(config.menu_path.as_deref())?;

    let ctx = Context {
        orders: OrderState::from_snapshot(snapshot),
        db: DbState::new(db),
        menu,
        config,
    };

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    ipc::serve(&ctx, stdin, tokio::io::stdout()).await?;

    ctx.db.inner().close().await;
    info!("Mesa waiter stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr; stdout carries responses.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=mesa=trace` - Show trace for mesa crates only
/// - Default: `info,mesa=debug,sqlx=warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mesa=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Determines the database file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.mesa.waiter/mesa.db`
/// - **Windows**: `%APPDATA%\mesa\waiter\data\mesa.db`
/// - **Linux**: `~/.local/share/waiter/mesa.db`
///
/// `MESA_DB_PATH` (via [`ConfigState`]) takes precedence.
fn get_database_path(config: &ConfigState) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(path) = &config.db_path {
        return Ok(path.clone());
    }

    let proj_dirs = ProjectDirs::from("com", "mesa", "waiter")
        .ok_or("Could not determine app data directory")?;

    Ok(proj_dirs.data_dir().join("mesa.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_override() {
        let config = ConfigState {
            db_path: Some(PathBuf::from("/tmp/mesa-test.db")),
            ..ConfigState::default()
        };
        assert_eq!(
            get_database_path(&config).unwrap(),
            PathBuf::from("/tmp/mesa-test.db")
        );
    }
}
