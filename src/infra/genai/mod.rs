//! Generative AI provider seam.
//!
//! Flows talk to a [`GenerativeModel`]; [`GeminiClient`] is the production
//! implementation and tests substitute a stub.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod client;
pub mod media;

pub use client::GeminiClient;

#[derive(Debug, Clone, Error)]
pub enum GenAiError {
    #[error("missing api key: set GEMINI_API_KEY or GOOGLE_API_KEY")]
    MissingApiKey,
    #[error("network error: {0}")]
    Transport(String),
    #[error("timeout")]
    Timeout,
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("rate limited")]
    RateLimited,
    #[error("invalid api key")]
    InvalidApiKey,
    #[error("json error: {0}")]
    Serde(String),
    #[error("provider returned no content: {0}")]
    EmptyResponse(String),
    #[error("invalid media: {0}")]
    InvalidMedia(String),
}

/// One piece of a prompt or of a response.
///
/// Media is always carried as a URI: a `data:` URI, or an `http(s)` URL that
/// the client fetches and inlines before sending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    Text(String),
    Media { uri: String },
}

impl Part {
    pub fn text(s: impl Into<String>) -> Self {
        Part::Text(s.into())
    }

    pub fn media(uri: impl Into<String>) -> Self {
        Part::Media { uri: uri.into() }
    }
}

/// What the caller expects back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Text,
    /// A JSON object; the caller deserializes it.
    Json,
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Name of the flow issuing the request, for logs.
    pub flow: &'static str,
    pub system: Option<String>,
    pub parts: Vec<Part>,
    pub format: ResponseFormat,
}

impl GenerateRequest {
    pub fn new(flow: &'static str, parts: Vec<Part>) -> Self {
        Self {
            flow,
            system: None,
            parts,
            format: ResponseFormat::Text,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateResponse {
    pub parts: Vec<Part>,
}

impl GenerateResponse {
    /// All text parts joined, or `None` if the response carried no text.
    pub fn text(&self) -> Option<String> {
        let texts: Vec<&str> = self
            .parts
            .iter()
            .filter_map(|p| match p {
                Part::Text(t) => Some(t.as_str()),
                Part::Media { .. } => None,
            })
            .collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }

    pub fn first_media(&self) -> Option<&str> {
        self.parts.iter().find_map(|p| match p {
            Part::Media { uri } => Some(uri.as_str()),
            Part::Text(_) => None,
        })
    }
}

#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, GenAiError>;
}
