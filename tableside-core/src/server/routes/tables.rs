use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::db;
use crate::models::{CreateTableInput, DiningTable, UpdateTableInput};
use crate::server::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub available: bool,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<DiningTable>>, ApiError> {
    let conn = state.db.lock().unwrap();
    let tables = db::tables::list(&conn, query.available)?;
    Ok(Json(tables))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DiningTable>, ApiError> {
    let conn = state.db.lock().unwrap();
    let table = db::tables::get(&conn, &id)?;
    Ok(Json(table))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateTableInput>,
) -> Result<Json<DiningTable>, ApiError> {
    let conn = state.db.lock().unwrap();
    let table = db::tables::create(&conn, input)?;
    Ok(Json(table))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(mut input): Json<UpdateTableInput>,
) -> Result<Json<DiningTable>, ApiError> {
    input.id = id;
    let conn = state.db.lock().unwrap();
    let table = db::tables::update(&conn, input)?;
    Ok(Json(table))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<()>, ApiError> {
    let conn = state.db.lock().unwrap();
    db::tables::delete(&conn, &id)?;
    Ok(Json(()))
}
