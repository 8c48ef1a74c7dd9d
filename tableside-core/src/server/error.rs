use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::TablesideError;

pub struct ApiError(pub TablesideError);

impl From<TablesideError> for ApiError {
    fn from(err: TablesideError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            TablesideError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            TablesideError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            TablesideError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            TablesideError::Database(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {}", e))
            }
            TablesideError::Serialization(e) => {
                (StatusCode::BAD_REQUEST, format!("Serialization error: {}", e))
            }
            TablesideError::Launch(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Launch error: {}", msg))
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
