use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::db;
use crate::models::DashboardStats;
use crate::server::error::ApiError;
use crate::state::AppState;

pub async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<DashboardStats>, ApiError> {
    let conn = state.db.lock().unwrap();
    let stats = db::orders::dashboard_stats(&conn)?;
    Ok(Json(stats))
}
