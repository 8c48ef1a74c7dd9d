//! Listener configuration for the server binary.
//!
//! The port comes from the `PORT` environment variable with an empty value
//! treated the same as an unset one. The value is carried into the bind
//! address verbatim; a malformed port fails at bind time rather than here.

pub const PORT_VAR: &str = "PORT";
pub const DEFAULT_PORT: &str = "8000";
pub const BIND_HOST: &str = "0.0.0.0";

/// Effective listen port: `PORT` if set and non-empty, else `8000`.
pub fn effective_port() -> String {
    port_or_default(std::env::var(PORT_VAR).ok())
}

pub fn port_or_default(value: Option<String>) -> String {
    match value {
        Some(p) if !p.is_empty() => p,
        _ => DEFAULT_PORT.to_string(),
    }
}

/// Wildcard bind address for the given port.
pub fn bind_address(port: &str) -> String {
    format!("{}:{}", BIND_HOST, port)
}
