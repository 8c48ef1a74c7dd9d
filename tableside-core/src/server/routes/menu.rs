use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::db;
use crate::models::{CreateMenuItemInput, MenuItem, UpdateMenuItemInput};
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
) -> Result<Json<Vec<MenuItem>>, ApiError> {
    let conn = state.db.lock().unwrap();
    let items = db::menu_items::list(&conn, query.available)?;
    Ok(Json(items))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MenuItem>, ApiError> {
    let conn = state.db.lock().unwrap();
    let item = db::menu_items::get(&conn, &id)?;
    Ok(Json(item))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateMenuItemInput>,
) -> Result<Json<MenuItem>, ApiError> {
    let conn = state.db.lock().unwrap();
    let item = db::menu_items::create(&conn, input)?;
    Ok(Json(item))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(mut input): Json<UpdateMenuItemInput>,
) -> Result<Json<MenuItem>, ApiError> {
    input.id = id;
    let conn = state.db.lock().unwrap();
    let item = db::menu_items::update(&conn, input)?;
    Ok(Json(item))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<()>, ApiError> {
    let conn = state.db.lock().unwrap();
    db::menu_items::delete(&conn, &id)?;
    Ok(Json(()))
}
