//! Gemini `generateContent` REST client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::media::{is_remote, parse_data_uri, InlineMedia};
use super::{GenAiError, GenerateRequest, GenerateResponse, GenerativeModel, Part, ResponseFormat};
use crate::infra::config;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Largest remote image the client will download and inline.
pub const DEFAULT_MAX_MEDIA_BYTES: usize = 10 * 1024 * 1024;

// --- Wire types ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<WirePart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<WireBlob>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireBlob {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl From<InlineMedia> for WirePart {
    fn from(m: InlineMedia) -> Self {
        WirePart {
            text: None,
            inline_data: Some(WireBlob {
                mime_type: m.mime_type,
                data: m.data,
            }),
        }
    }
}

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    text_model: String,
    image_model: String,
    max_media_bytes: usize,
}

impl GeminiClient {
    /// Builds a client from `GEMINI_API_KEY`/`GOOGLE_API_KEY` and the model settings.
    pub fn from_env() -> Result<Self, GenAiError> {
        let api_key = config::genai_api_key().ok_or(GenAiError::MissingApiKey)?;
        Self::new(
            api_key,
            config::text_model(),
            config::image_model(),
            config::genai_timeout(),
        )
    }

    pub fn new(
        api_key: String,
        text_model: String,
        image_model: String,
        timeout: Duration,
    ) -> Result<Self, GenAiError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("kalaconnect/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GenAiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            api_key,
            text_model,
            image_model,
            max_media_bytes: DEFAULT_MAX_MEDIA_BYTES,
        })
    }

    pub fn with_max_media_bytes(mut self, max: usize) -> Self {
        self.max_media_bytes = max;
        self
    }

    fn model_for(&self, format: ResponseFormat) -> &str {
        match format {
            ResponseFormat::Image => &self.image_model,
            ResponseFormat::Text | ResponseFormat::Json => &self.text_model,
        }
    }

    /// Turns a media URI into inline data, downloading `http(s)` URLs.
    async fn inline_media(&self, uri: &str) -> Result<InlineMedia, GenAiError> {
        if !is_remote(uri) {
            return parse_data_uri(uri);
        }

        let mut res = self.http.get(uri).send().await.map_err(map_reqwest_error)?;
        if !res.status().is_success() {
            return Err(GenAiError::InvalidMedia(format!(
                "fetching {} returned {}",
                uri,
                res.status()
            )));
        }
        let too_large = || {
            GenAiError::InvalidMedia(format!(
                "{} is larger than {} bytes",
                uri, self.max_media_bytes
            ))
        };
        if res.content_length().is_some_and(|len| len > self.max_media_bytes as u64) {
            return Err(too_large());
        }
        let mime_type = res
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
            .filter(|v| v.starts_with("image/"))
            .unwrap_or_else(|| "image/jpeg".to_string());

        // Content-Length may be absent or wrong; bound what is actually read.
        let mut bytes = Vec::new();
        while let Some(chunk) = res.chunk().await.map_err(map_reqwest_error)? {
            if bytes.len() + chunk.len() > self.max_media_bytes {
                return Err(too_large());
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(InlineMedia::from_bytes(mime_type, &bytes))
    }

    async fn build_request(&self, request: &GenerateRequest) -> Result<GeminiRequest, GenAiError> {
        let mut parts = Vec::with_capacity(request.parts.len());
        for part in &request.parts {
            match part {
                Part::Text(t) => parts.push(WirePart {
                    text: Some(t.clone()),
                    inline_data: None,
                }),
                Part::Media { uri } => parts.push(self.inline_media(uri).await?.into()),
            }
        }

        let generation_config = match request.format {
            ResponseFormat::Text => None,
            ResponseFormat::Json => Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_modalities: None,
            }),
            ResponseFormat::Image => Some(GenerationConfig {
                response_mime_type: None,
                response_modalities: Some(vec!["IMAGE".to_string()]),
            }),
        };

        Ok(GeminiRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            system_instruction: request.system.as_ref().map(|s| Content {
                role: None,
                parts: vec![WirePart {
                    text: Some(s.clone()),
                    inline_data: None,
                }],
            }),
            generation_config,
        })
    }

    async fn send_request(
        &self,
        model: &str,
        body: &GeminiRequest,
    ) -> Result<GeminiResponse, GenAiError> {
        let url = format!("{}/models/{}:generateContent", GEMINI_API_BASE, model);
        let res = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        match res.status() {
            s if s.is_success() => res
                .json::<GeminiResponse>()
                .await
                .map_err(|e| GenAiError::Serde(e.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(GenAiError::InvalidApiKey),
            StatusCode::TOO_MANY_REQUESTS => Err(GenAiError::RateLimited),
            s => {
                let status = s.as_u16();
                let body = res.text().await.unwrap_or_default();
                Err(GenAiError::Http { status, body })
            }
        }
    }
}

fn into_response(raw: GeminiResponse) -> Result<GenerateResponse, GenAiError> {
    if let Some(reason) = raw.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(GenAiError::EmptyResponse(format!("prompt blocked: {}", reason)));
    }

    let candidate = raw
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GenAiError::EmptyResponse("no candidates".to_string()))?;

    let finish_reason = candidate.finish_reason;
    let parts: Vec<Part> = candidate
        .content
        .unwrap_or_default()
        .parts
        .into_iter()
        .filter_map(|p| {
            if let Some(blob) = p.inline_data {
                Some(Part::media(
                    InlineMedia {
                        mime_type: blob.mime_type,
                        data: blob.data,
                    }
                    .to_data_uri(),
                ))
            } else {
                p.text.map(Part::Text)
            }
        })
        .collect();

    if parts.is_empty() {
        return Err(GenAiError::EmptyResponse(format!(
            "finish reason {}",
            finish_reason.as_deref().unwrap_or("unknown")
        )));
    }
    Ok(GenerateResponse { parts })
}

fn map_reqwest_error(e: reqwest::Error) -> GenAiError {
    if e.is_timeout() {
        GenAiError::Timeout
    } else {
        GenAiError::Transport(e.to_string())
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, GenAiError> {
        let model = self.model_for(request.format).to_string();
        let body = self.build_request(&request).await?;
        debug!(flow = request.flow, model = %model, parts = body.contents[0].parts.len(), "Calling Gemini");

        let raw = self.send_request(&model, &body).await.inspect_err(|e| {
            warn!(flow = request.flow, model = %model, error = %e, "Gemini call failed");
        })?;
        into_response(raw)
    }
}
