//! # JSON-Lines Shell
//!
//! The view layer talks to the waiter over stdin/stdout: one JSON request
//! per line in, one JSON response per line out.
//!
//! ## Wire Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Request / Response                                   │
//! │                                                                         │
//! │  stdin   {"id": 7, "cmd": "close_table", "tableName": "Mesa 5"}         │
//! │             │                                                           │
//! │             ▼                                                           │
//! │          handle_line ──► Command ──► dispatch ──► commands::*           │
//! │             │                                                           │
//! │             ▼                                                           │
//! │  stdout  {"id": 7, "ok": true, "data": {...}}                           │
//! │     or   {"id": 7, "ok": false, "error": {"code": "...", "message": ..}}│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `id` is optional and echoed back untouched, so no command argument may be
//! called `id` (line items are addressed as `itemId`). Argument names are
//! camelCase, command names snake_case.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use mesa_core::ConflictResolution;

use crate::commands;
use crate::error::ApiError;
use crate::state::{ConfigState, DbState, MenuState, OrderState};

/// Everything a command may ask for.
#[derive(Clone)]
pub struct Context {
    pub orders: OrderState,
    pub db: DbState,
    pub menu: MenuState,
    pub config: ConfigState,
}

/// One decoded request line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    GetDraft,
    AddItem {
        code: String,
        #[serde(default)]
        variation: Option<String>,
        #[serde(default)]
        modification: Option<String>,
        #[serde(default)]
        quantity: Option<u32>,
    },
    #[serde(rename_all = "camelCase")]
    RemoveItem {
        item_id: String,
    },
    SetTableName {
        text: String,
    },
    SetRequests {
        text: String,
    },
    SaveOrder,
    ResolveConflict {
        resolution: ConflictResolution,
    },
    CancelConflict,
    DiscardDraft,
    ListTables,
    #[serde(rename_all = "camelCase")]
    EditTable {
        table_name: String,
    },
    #[serde(rename_all = "camelCase")]
    CloseTable {
        table_name: String,
    },
    GetHistory,
    ClearHistory,
    Confirm,
    Cancel,
    GetMenu,
    GetDish {
        code: String,
    },
    GetConfig,
}

/// One response line.
#[derive(Debug, Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl Response {
    fn from_result(id: Option<Value>, result: Result<Value, ApiError>) -> Self {
        match result {
            Ok(data) => Response {
                id,
                ok: true,
                data: Some(data),
                error: None,
            },
            Err(error) => Response {
                id,
                ok: false,
                data: None,
                error: Some(error),
            },
        }
    }
}

fn data<T: Serialize>(value: T) -> Result<Value, ApiError> {
    Ok(serde_json::to_value(value)?)
}

/// Runs one command against the shared state.
pub async fn dispatch(ctx: &Context, command: Command) -> Result<Value, ApiError> {
    use commands::{config, confirmation, history, menu, order, tables};

    match command {
        Command::GetDraft => data(order::get_draft(&ctx.orders)),
        Command::AddItem {
            code,
            variation,
            modification,
            quantity,
        } => data(
            order::add_item(
                &ctx.orders,
                &ctx.menu,
                &ctx.db,
                code,
                variation,
                modification,
                quantity,
            )
            .await?,
        ),
        Command::RemoveItem { item_id } => {
            data(order::remove_item(&ctx.orders, &ctx.db, item_id).await?)
        }
        Command::SetTableName { text } => {
            data(order::set_table_name(&ctx.orders, &ctx.db, text).await?)
        }
        Command::SetRequests { text } => {
            data(order::set_requests(&ctx.orders, &ctx.db, text).await?)
        }
        Command::SaveOrder => data(order::save_order(&ctx.orders, &ctx.db).await?),
        Command::ResolveConflict { resolution } => {
            data(order::resolve_conflict(&ctx.orders, &ctx.db, resolution).await?)
        }
        Command::CancelConflict => data(order::cancel_conflict(&ctx.orders)),
        Command::DiscardDraft => data(order::discard_draft(&ctx.orders, &ctx.db).await?),
        Command::ListTables => data(tables::list_tables(&ctx.orders)),
        Command::EditTable { table_name } => {
            data(tables::edit_table(&ctx.orders, &ctx.db, table_name).await?)
        }
        Command::CloseTable { table_name } => data(tables::close_table(&ctx.orders, table_name)?),
        Command::GetHistory => data(history::get_history(&ctx.orders)),
        Command::ClearHistory => data(history::clear_history(&ctx.orders)),
        Command::Confirm => data(confirmation::confirm(&ctx.orders, &ctx.db).await?),
        Command::Cancel => data(confirmation::cancel(&ctx.orders)),
        Command::GetMenu => data(menu::get_menu(&ctx.menu)),
        Command::GetDish { code } => data(menu::get_dish(&ctx.menu, code)?),
        Command::GetConfig => data(config::get_config(&ctx.config)),
    }
}

/// Decodes and runs one request line.
///
/// Never fails: unreadable lines come back as a `BAD_REQUEST` response.
pub async fn handle_line(ctx: &Context, line: &str) -> Response {
    let mut value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "Unreadable request line");
            return Response::from_result(
                None,
                Err(ApiError::bad_request(format!("Invalid JSON: {}", err))),
            );
        }
    };

    let id = value.as_object_mut().and_then(|map| map.remove("id"));

    let result = match serde_json::from_value::<Command>(value) {
        Ok(command) => {
            debug!(?command, "Dispatching");
            dispatch(ctx, command).await
        }
        Err(err) => Err(ApiError::bad_request(format!("Invalid command: {}", err))),
    };

    Response::from_result(id, result)
}

/// Serves request lines from `reader` until end of input.
///
/// Blank lines are skipped. Each response is flushed as soon as it is written.
pub async fn serve<R, W>(ctx: &Context, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(ctx, &line).await;
        let mut encoded = serde_json::to_vec(&response)?;
        encoded.push(b'\n');

        writer.write_all(&encoded).await?;
        writer.flush().await?;
    }

    debug!("Input closed");
    Ok(())
}
