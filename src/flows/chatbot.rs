//! Onboarding help for artisans joining the platform.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{generate_text, FlowError};
use crate::domain::model::{FieldChecks, FieldError, Validate};
use crate::infra::genai::{GenerateRequest, GenerativeModel, Part};

pub const FLOW_NAME: &str = "getChatbotAssistance";

/// Greeting the chat window opens with.
pub const GREETING: &str = "Hello! How can I help you get started with KalaConnect today?";

const SYSTEM_PROMPT: &str = "You are a chatbot designed to help artisans onboard to the KalaConnect platform.";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatbotInput {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatbotOutput {
    pub response: String,
}

impl Validate for ChatbotInput {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        FieldChecks::new()
            .not_blank("query", &self.query, "Please type a question.")
            .finish()
    }
}

pub fn render_prompt(input: &ChatbotInput) -> String {
    format!(
        "Answer the following question about the platform:\n\n{}",
        input.query
    )
}

pub async fn run(model: &dyn GenerativeModel, input: &ChatbotInput) -> Result<ChatbotOutput, FlowError> {
    let request = GenerateRequest::new(FLOW_NAME, vec![Part::text(render_prompt(input))])
        .with_system(SYSTEM_PROMPT);
    let response = generate_text(model, request).await?;
    Ok(ChatbotOutput { response })
}
