use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::GatewayError;
use crate::models::ContentType;
use crate::state::AppState;
use crate::store::{ContentSummary, ExportFormat, StoredContent};

// Malformed ids and query strings get the same JSON error body as other 400s
fn content_id(path: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, GatewayError> {
    path.map(|Path(id)| id)
        .map_err(|e| GatewayError::validation(e.body_text()))
}

fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, GatewayError> {
    query
        .map(|Query(q)| q)
        .map_err(|e| GatewayError::validation(e.body_text()))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub content_type: Option<ContentType>,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ExportFormat,
}

pub async fn list_contents_handler(
    State(state): State<Arc<AppState>>,
    list_query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<ContentSummary>>, GatewayError> {
    let list_query = query_params(list_query)?;
    Ok(Json(state.store.list(list_query.content_type)))
}

pub async fn get_content_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<StoredContent>, GatewayError> {
    state.store.get(content_id(id)?).map(Json)
}

pub async fn delete_content_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, GatewayError> {
    let id = content_id(id)?;
    state.store.delete(id)?;
    tracing::info!(%id, "content deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn export_content_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<Uuid>, PathRejection>,
    export_query: Result<Query<ExportQuery>, QueryRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let id = content_id(id)?;
    let export_query = query_params(export_query)?;
    let export_format = export_query.format;
    let body = state.store.export(id, export_format)?;
    let disposition = format!(
        "attachment; filename=\"content-{}.{}\"",
        id,
        export_format.extension()
    );

    Ok((
        [
            (header::CONTENT_TYPE, export_format.mime().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
