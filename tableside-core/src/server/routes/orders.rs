use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::db;
use crate::models::{CreateOrderInput, Order, OrderDetails, OrderItemInput, OrderStatus};
use crate::server::error::ApiError;
use crate::state::AppState;

pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Order>>, ApiError> {
    let conn = state.db.lock().unwrap();
    let orders = db::orders::list(&conn)?;
    Ok(Json(orders))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<OrderDetails>, ApiError> {
    let conn = state.db.lock().unwrap();
    let details = db::orders::get_details(&conn, &id)?;
    Ok(Json(details))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateOrderInput>,
) -> Result<Json<Order>, ApiError> {
    let mut conn = state.db.lock().unwrap();
    let order = db::orders::create(&mut conn, input)?;
    Ok(Json(order))
}

pub async fn add_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(input): Json<OrderItemInput>,
) -> Result<Json<Order>, ApiError> {
    let mut conn = state.db.lock().unwrap();
    let order = db::orders::add_item(&mut conn, &id, input)?;
    Ok(Json(order))
}

#[derive(Deserialize)]
pub struct UpdateStatusInput {
    pub status: OrderStatus,
}

pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(input): Json<UpdateStatusInput>,
) -> Result<Json<Order>, ApiError> {
    let mut conn = state.db.lock().unwrap();
    let order = db::orders::update_status(&mut conn, &id, input.status)?;
    Ok(Json(order))
}
