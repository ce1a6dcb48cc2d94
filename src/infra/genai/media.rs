//! `data:` URI handling for inline images.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::GenAiError;

/// A decoded-enough view of inline media: MIME type plus base64 payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineMedia {
    pub mime_type: String,
    pub data: String,
}

impl InlineMedia {
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: STANDARD.encode(bytes),
        }
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

pub fn is_remote(uri: &str) -> bool {
    let lower = uri.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Parses `data:<mimetype>;base64,<encoded_data>` and checks the payload decodes.
pub fn parse_data_uri(uri: &str) -> Result<InlineMedia, GenAiError> {
    let rest = uri
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| GenAiError::InvalidMedia("expected a data: URI".to_string()))?;
    let (meta, data) = rest
        .split_once(',')
        .ok_or_else(|| GenAiError::InvalidMedia("data URI has no payload".to_string()))?;
    let mime_type = meta
        .strip_suffix(";base64")
        .ok_or_else(|| GenAiError::InvalidMedia("data URI must be base64 encoded".to_string()))?;
    if mime_type.is_empty() || !mime_type.contains('/') {
        return Err(GenAiError::InvalidMedia(format!(
            "data URI has no MIME type ('{}')",
            mime_type
        )));
    }
    if data.is_empty() {
        return Err(GenAiError::InvalidMedia("data URI payload is empty".to_string()));
    }
    STANDARD
        .decode(data)
        .map_err(|e| GenAiError::InvalidMedia(format!("bad base64 payload: {}", e)))?;

    Ok(InlineMedia {
        mime_type: mime_type.to_string(),
        data: data.to_string(),
    })
}

/// Accepts a `data:` URI with a valid payload, or an `http(s)` URL.
///
/// Only use this for URIs the server already trusts (stored product images).
/// Images uploaded by a client go through [`check_uploaded_media`].
pub fn check_media_uri(uri: &str) -> Result<(), GenAiError> {
    if is_remote(uri) {
        return Ok(());
    }
    parse_data_uri(uri).map(|_| ())
}

/// Accepts only a `data:` URI; client uploads never make the server fetch a URL.
pub fn check_uploaded_media(uri: &str) -> Result<(), GenAiError> {
    parse_data_uri(uri).map(|_| ())
}
