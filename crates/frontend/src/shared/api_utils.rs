//! Helpers for talking to the backend API.

/// Port the backend binds to; the WASM bundle itself may be served from a
/// different dev-server port during development.
const BACKEND_PORT: u16 = 3000;

/// Base URL of the backend, derived from the current window location.
/// Empty when no window is available.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, BACKEND_PORT)
}

/// Full URL for an API path like "/api/d100/metrics"
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}
