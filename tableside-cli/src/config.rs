use std::path::PathBuf;

/// Discover the server URL.
/// Priority: --port flag > PORT env > ~/.tableside/server.port file > default 8000
pub fn discover_server_url(port_override: Option<u16>) -> String {
    let port = port_override
        .map(|p| p.to_string())
        .or_else(read_port_env)
        .or_else(read_port_file)
        .unwrap_or_else(|| "8000".to_string());

    format!("http://127.0.0.1:{}", port)
}

fn read_port_env() -> Option<String> {
    match std::env::var("PORT") {
        Ok(p) if !p.is_empty() => Some(p),
        _ => None,
    }
}

fn read_port_file() -> Option<String> {
    let path = port_file_path()?;
    let contents = std::fs::read_to_string(path).ok()?;
    let port = contents.trim();
    if port.is_empty() {
        None
    } else {
        Some(port.to_string())
    }
}

fn port_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tableside").join("server.port"))
}
