use rusqlite::Connection;
use std::sync::Mutex;

/// Shared handle to the restaurant database. Handlers lock the connection
/// for the duration of each request.
pub struct AppState {
    pub db: Mutex<Connection>,
}

impl AppState {
    pub fn new(db: Connection) -> Self {
        Self { db: Mutex::new(db) }
    }
}
