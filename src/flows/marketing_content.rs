//! Social media post and email campaign for one product.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{generate_json, FlowError};
use crate::domain::model::{FieldChecks, FieldError, Validate};
use crate::infra::genai::{GenerateRequest, GenerativeModel, Part};

pub const FLOW_NAME: &str = "createMarketingContent";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarketingContentInput {
    pub product_name: String,
    pub product_description: String,
    pub artisan_name: String,
    pub culture_heritage: String,
    pub target_audience: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarketingContentOutput {
    pub social_media_post: String,
    pub email_campaign: String,
}

impl Validate for MarketingContentInput {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        FieldChecks::new()
            .min_len("productName", &self.product_name, 1, "Please select a product.")
            .min_len("productDescription", &self.product_description, 10, "Description must be at least 10 characters.")
            .min_len("artisanName", &self.artisan_name, 2, "Artisan name is required.")
            .min_len("cultureHeritage", &self.culture_heritage, 10, "Cultural heritage is required.")
            .min_len("targetAudience", &self.target_audience, 5, "Target audience is required.")
            .finish()
    }
}

pub fn render_prompt(input: &MarketingContentInput) -> String {
    format!(
        "You are a marketing expert specializing in promoting handcrafted products from Indian artisans.\n\
         \n\
         Generate a social media post and an email campaign to promote the artisan's product.\n\
         Respond with a JSON object with exactly two string fields: \"socialMediaPost\" and \"emailCampaign\".\n\
         \n\
         Product Name: {}\n\
         Product Description: {}\n\
         Artisan Name: {}\n\
         Cultural Heritage: {}\n\
         Target Audience: {}",
        input.product_name,
        input.product_description,
        input.artisan_name,
        input.culture_heritage,
        input.target_audience,
    )
}

pub async fn run(
    model: &dyn GenerativeModel,
    input: &MarketingContentInput,
) -> Result<MarketingContentOutput, FlowError> {
    let request = GenerateRequest::new(FLOW_NAME, vec![Part::text(render_prompt(input))]);
    generate_json(model, request).await
}
