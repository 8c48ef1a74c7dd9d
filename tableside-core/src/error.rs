use std::fmt;

#[derive(Debug)]
pub enum TablesideError {
    Database(rusqlite::Error),
    Serialization(serde_json::Error),
    Validation(String),
    Conflict(String),
    NotFound(String),
    Launch(String),
}

impl fmt::Display for TablesideError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TablesideError::Database(e) => write!(f, "Database error: {}", e),
            TablesideError::Serialization(e) => write!(f, "Serialization error: {}", e),
            TablesideError::Validation(msg) => write!(f, "Validation error: {}", msg),
            TablesideError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            TablesideError::NotFound(msg) => write!(f, "Not found: {}", msg),
            TablesideError::Launch(msg) => write!(f, "Launch error: {}", msg),
        }
    }
}

impl std::error::Error for TablesideError {}

impl From<rusqlite::Error> for TablesideError {
    fn from(err: rusqlite::Error) -> Self {
        TablesideError::Database(err)
    }
}

impl From<serde_json::Error> for TablesideError {
    fn from(err: serde_json::Error) -> Self {
        TablesideError::Serialization(err)
    }
}

impl From<TablesideError> for String {
    fn from(err: TablesideError) -> Self {
        err.to_string()
    }
}

pub type Result<T> = std::result::Result<T, TablesideError>;
