//! Flows: one named wrapper per AI prompt.
//!
//! Each flow owns its typed input and output, renders its prompt, makes a
//! single call to the [`GenerativeModel`] and maps the reply onto the output.
//! There are no retries; any failure is returned to the caller as is.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::infra::genai::{GenAiError, GenerateRequest, GenerativeModel, ResponseFormat};

pub mod chatbot;
pub mod marketing_content;
pub mod product_description;
pub mod visualize_room;

pub use chatbot::{ChatbotInput, ChatbotOutput};
pub use marketing_content::{MarketingContentInput, MarketingContentOutput};
pub use product_description::{ProductDescriptionInput, ProductDescriptionOutput};
pub use visualize_room::{VisualizeRoomInput, VisualizeRoomOutput};

#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Model(#[from] GenAiError),
    #[error("{flow}: {message}")]
    MissingOutput { flow: &'static str, message: String },
    #[error("{flow}: could not parse model output: {message}")]
    Parse { flow: &'static str, message: String },
}

/// Sends a text request and returns the trimmed reply text.
pub(crate) async fn generate_text(
    model: &dyn GenerativeModel,
    request: GenerateRequest,
) -> Result<String, FlowError> {
    let flow = request.flow;
    let response = model.generate(request).await?;
    response
        .text()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| FlowError::MissingOutput {
            flow,
            message: "model returned no text".to_string(),
        })
}

/// Sends a request in JSON mode and deserializes the reply into `T`.
pub(crate) async fn generate_json<T: DeserializeOwned>(
    model: &dyn GenerativeModel,
    request: GenerateRequest,
) -> Result<T, FlowError> {
    let flow = request.flow;
    let text = generate_text(model, request.with_format(ResponseFormat::Json)).await?;
    let json_str = extract_json(&text);
    serde_json::from_str(json_str).map_err(|e| {
        tracing::error!(
            flow,
            json_error = %e,
            preview = %json_str.chars().take(300).collect::<String>(),
            "Failed to parse JSON output"
        );
        FlowError::Parse {
            flow,
            message: e.to_string(),
        }
    })
}

/// Extract JSON from a string that might contain markdown code blocks
pub(crate) fn extract_json(text: &str) -> &str {
    let text = text.trim();

    if let Some(start) = text.find("```json") {
        let content_start = start + 7;
        if let Some(end) = text[content_start..].find("```") {
            return text[content_start..content_start + end].trim();
        }
    }

    if let Some(start) = text.find("```") {
        let content_start = start + 3;
        // Skip past any language identifier on the same line
        let content_start = text[content_start..]
            .find('\n')
            .map(|i| content_start + i + 1)
            .unwrap_or(content_start);
        if let Some(end) = text[content_start..].find("```") {
            return text[content_start..content_start + end].trim();
        }
    }

    text
}
