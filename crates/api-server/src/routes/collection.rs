//! Collection endpoints
//!
//! One endpoint per collection kind (/api/tasks, /api/notes). GET returns
//! the full stored array; POST replaces it wholesale. The handlers are
//! shared between the two kinds, with typed record validation on the way
//! in.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use beedoo_core::note::Note;
use beedoo_core::storage::{CollectionKind, CollectionStore};
use beedoo_core::task::Task;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CollectionQuery {
    /// `?export=1` requests an attachment-style response
    #[serde(default)]
    pub export: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub message: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn internal_error(e: beedoo_core::Error) -> HandlerError {
    tracing::error!(error = %e, "collection request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Internal server error".to_string(),
            message: Some(e.to_string()),
        }),
    )
}

/// GET handler shared by both collections.
async fn get_collection(
    state: AppState,
    kind: CollectionKind,
    query: CollectionQuery,
) -> Result<Response, HandlerError> {
    let records = state.gateway().read(kind).await.map_err(internal_error)?;

    let mut response = Json(records).into_response();
    if query.export.as_deref() == Some("1") {
        let disposition = format!("attachment; filename=\"{}-backup.json\"", kind.name());
        if let Ok(value) = disposition.parse() {
            response
                .headers_mut()
                .insert(header::CONTENT_DISPOSITION, value);
        }
    }
    Ok(response)
}

/// POST handler shared by both collections; `records` arrive already
/// validated against the kind's record type.
async fn replace_collection(
    state: AppState,
    kind: CollectionKind,
    records: Vec<Value>,
) -> Result<Json<SaveResponse>, HandlerError> {
    let count = records.len();
    state
        .gateway()
        .write(kind, &records)
        .await
        .map_err(internal_error)?;

    Ok(Json(SaveResponse {
        message: format!("{} saved successfully", kind.label()),
        count,
    }))
}

async fn get_tasks(
    State(state): State<AppState>,
    Query(query): Query<CollectionQuery>,
) -> Result<Response, HandlerError> {
    get_collection(state, CollectionKind::Tasks, query).await
}

async fn post_tasks(
    State(state): State<AppState>,
    Json(tasks): Json<Vec<Task>>,
) -> Result<Json<SaveResponse>, HandlerError> {
    let records = tasks
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| internal_error(e.into()))?;
    replace_collection(state, CollectionKind::Tasks, records).await
}

async fn get_notes(
    State(state): State<AppState>,
    Query(query): Query<CollectionQuery>,
) -> Result<Response, HandlerError> {
    get_collection(state, CollectionKind::Notes, query).await
}

async fn post_notes(
    State(state): State<AppState>,
    Json(notes): Json<Vec<Note>>,
) -> Result<Json<SaveResponse>, HandlerError> {
    let records = notes
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| internal_error(e.into()))?;
    replace_collection(state, CollectionKind::Notes, records).await
}

/// Methods other than GET/POST (and the CORS-handled OPTIONS) get a JSON
/// 405 body.
async fn method_not_allowed() -> HandlerError {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            error: "Method not allowed".to_string(),
            message: None,
        }),
    )
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/tasks",
            get(get_tasks).post(post_tasks).fallback(method_not_allowed),
        )
        .route(
            "/api/notes",
            get(get_notes).post(post_notes).fallback(method_not_allowed),
        )
}
