use crate::{error::AppError, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use core_types::{Document, DocumentCreate};
use serde_json::{json, Value};
use std::sync::Arc;

/// # GET /
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Docboard API" }))
}

/// # GET /api/documents
/// Fetches all documents ordered by position.
pub async fn list_documents(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Document>>, AppError> {
    let documents = state.documents.list().await?;
    Ok(Json(documents))
}

/// # POST /api/documents
pub async fn create_document(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DocumentCreate>,
) -> Result<(StatusCode, Json<Document>), AppError> {
    let document = state.documents.create(payload).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// # PUT /api/documents/batch
/// Reorders documents by type. Unknown types are ignored.
pub async fn batch_update_documents(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Vec<DocumentCreate>>,
) -> Result<Json<Vec<Document>>, AppError> {
    let documents = state.documents.batch_update(payload).await?;
    Ok(Json(documents))
}

/// # PUT /api/documents/:id
pub async fn update_document(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DocumentCreate>,
) -> Result<Json<Document>, AppError> {
    let document = state.documents.update(id, payload).await?;
    Ok(Json(document))
}

/// # DELETE /api/documents/:id
pub async fn delete_document(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, AppError> {
    state.documents.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
