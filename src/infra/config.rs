//! Centralized configuration (environment variables + defaults).

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DB_PATH: &str = "data/db.json";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image-preview";
pub const DEFAULT_GENAI_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Path of the JSON data file (`KALA_DB_PATH`, `~` expanded).
pub fn db_path() -> PathBuf {
    let raw = non_empty_var("KALA_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
    PathBuf::from(shellexpand::tilde(&raw).into_owned())
}

/// Listen address for the API server (`KALA_BIND_ADDR`).
pub fn bind_addr() -> String {
    non_empty_var("KALA_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
}

/// Generative AI key: `GEMINI_API_KEY`, falling back to `GOOGLE_API_KEY`.
pub fn genai_api_key() -> Option<String> {
    non_empty_var("GEMINI_API_KEY").or_else(|| non_empty_var("GOOGLE_API_KEY"))
}

pub fn text_model() -> String {
    non_empty_var("GEMINI_TEXT_MODEL").unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string())
}

pub fn image_model() -> String {
    non_empty_var("GEMINI_IMAGE_MODEL").unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string())
}

/// Client-side timeout for one AI round trip (`GENAI_TIMEOUT_SECS`). Invalid values use the default.
pub fn genai_timeout() -> Duration {
    let secs = non_empty_var("GENAI_TIMEOUT_SECS")
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|s| *s > 0)
        .unwrap_or(DEFAULT_GENAI_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

/// Idle time after which a session is dropped (`KALA_SESSION_TTL_SECS`).
pub fn session_ttl() -> Duration {
    let secs = non_empty_var("KALA_SESSION_TTL_SECS")
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|s| *s > 0)
        .unwrap_or(DEFAULT_SESSION_TTL_SECS);
    Duration::from_secs(secs)
}

/// Upper bound on concurrent sessions (`KALA_MAX_SESSIONS`).
pub fn max_sessions() -> usize {
    non_empty_var("KALA_MAX_SESSIONS")
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_MAX_SESSIONS)
}
