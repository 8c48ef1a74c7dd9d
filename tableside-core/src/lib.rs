pub mod models;
pub mod error;
pub mod state;
pub mod db;
pub mod launch;

#[cfg(feature = "server")]
pub mod server;

use rusqlite::Connection;
use std::sync::Arc;

/// Database location: `TABLESIDE_DB` override, else the platform data dir.
pub fn get_db_path() -> std::path::PathBuf {
    if let Ok(path) = std::env::var("TABLESIDE_DB") {
        if !path.is_empty() {
            return std::path::PathBuf::from(path);
        }
    }

    let app_dir = dirs::data_local_dir()
        .expect("Could not determine app data directory")
        .join("tableside");

    std::fs::create_dir_all(&app_dir).expect("Could not create app data directory");

    app_dir.join("tableside.db")
}

pub fn init_state() -> Arc<state::AppState> {
    let db_path = get_db_path();
    let conn = Connection::open(&db_path).expect("Failed to open database");
    db::initialize_database(&conn).expect("Failed to initialize database schema");
    db::seed::ensure_sample_data(&conn).expect("Failed to seed sample data");
    Arc::new(state::AppState::new(conn))
}
