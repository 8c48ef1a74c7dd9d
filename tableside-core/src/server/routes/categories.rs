use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::db;
use crate::models::{Category, CreateCategoryInput};
use crate::server::error::ApiError;
use crate::state::AppState;

pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Category>>, ApiError> {
    let conn = state.db.lock().unwrap();
    let categories = db::categories::list(&conn)?;
    Ok(Json(categories))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Category>, ApiError> {
    let conn = state.db.lock().unwrap();
    let category = db::categories::get(&conn, &id)?;
    Ok(Json(category))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateCategoryInput>,
) -> Result<Json<Category>, ApiError> {
    let conn = state.db.lock().unwrap();
    let category = db::categories::create(&conn, input)?;
    Ok(Json(category))
}
