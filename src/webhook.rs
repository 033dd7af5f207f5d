//! Entry point: turns a raw payload into a [`ProcessingReport`], either from
//! the HTTP webhook route or from the CLI.

use crate::dispatcher::ChangeDispatcher;
use crate::models::change::ChangeEvent;
use crate::models::outcome::{EMPTY_PAYLOAD, ProcessingReport};
use axum::{Json, Router, body::Bytes, extract::State, http::StatusCode, routing::post};
use serde_json::Value;
use std::sync::Arc;
use tracing::{Instrument, error, info, warn};
use uuid::Uuid;

pub const CHANGES_ROUTE: &str = "/kb-sync/changes";

struct AppState {
    dispatcher: ChangeDispatcher,
}

pub fn router(dispatcher: ChangeDispatcher) -> Router {
    Router::new()
        .route(CHANGES_ROUTE, post(receive_changes))
        .with_state(Arc::new(AppState { dispatcher }))
}

#[tracing::instrument(skip_all, fields(invocation = %Uuid::new_v4()))]
async fn receive_changes(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> (StatusCode, Json<ProcessingReport>) {
    info!("received change batch ({} bytes)", body.len());

    let report = match parse_payload(&body) {
        Ok(payload) => process_payload(&state.dispatcher, payload).await,
        Err(report) => report,
    };

    let status = if report.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(report))
}

/// Parses raw bytes as JSON. A blank body reads as `null`.
pub fn parse_payload(body: &[u8]) -> Result<Value, ProcessingReport> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "payload is not valid JSON");
        ProcessingReport::error(format!("Invalid payload: {e}"))
    })
}

/// Runs one batch of change records through the dispatcher.
///
/// Never fails: an empty or malformed payload, and even a panic while
/// dispatching, all end up as an error report.
pub async fn process_payload(dispatcher: &ChangeDispatcher, payload: Value) -> ProcessingReport {
    let items = match payload {
        Value::Null => return ProcessingReport::error(EMPTY_PAYLOAD),
        Value::Array(items) if items.is_empty() => return ProcessingReport::error(EMPTY_PAYLOAD),
        Value::Array(items) => items,
        other => {
            warn!("payload is not a list");
            return ProcessingReport::error(format!(
                "Invalid payload: expected a list of change records, got {}",
                json_kind(&other)
            ));
        }
    };

    let changes = read_changes(items);
    let dispatcher = dispatcher.clone();
    let task = tokio::spawn(async move { dispatcher.dispatch(&changes).await }.in_current_span());

    match task.await {
        Ok(results) => {
            info!(results = results.len(), "change batch processed");
            ProcessingReport::processed(results)
        }
        Err(error) => {
            error!(%error, "change processing aborted");
            ProcessingReport::error(error.to_string())
        }
    }
}

/// Items that are not objects, or whose title or status is not text, are
/// dropped like records without a title.
fn read_changes(items: Vec<Value>) -> Vec<ChangeEvent> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let change: Result<ChangeEvent, _> = serde_path_to_error::deserialize(item);
            match change {
                Ok(change) => Some(change),
                Err(error) => {
                    warn!(index, %error, "ignoring unreadable change record");
                    None
                }
            }
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
