//! Culturally grounded product description from a photo and craft details.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{generate_text, FlowError};
use crate::domain::model::{FieldChecks, FieldError, Validate};
use crate::infra::genai::media::check_uploaded_media;
use crate::infra::genai::{GenerateRequest, GenerativeModel, Part};

pub const FLOW_NAME: &str = "generateProductDescription";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDescriptionInput {
    /// Product photo as `data:<mimetype>;base64,<data>`.
    pub product_image_uri: String,
    pub product_name: String,
    pub artisan_culture: String,
    pub craft_techniques: String,
    pub product_materials: String,
    pub product_dimensions: String,
    pub product_region: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDescriptionOutput {
    pub product_description: String,
}

impl Validate for ProductDescriptionInput {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        FieldChecks::new()
            .min_len("productName", &self.product_name, 3, "Product name must be at least 3 characters.")
            .min_len("artisanCulture", &self.artisan_culture, 3, "Cultural context is required.")
            .min_len("craftTechniques", &self.craft_techniques, 3, "Please describe the techniques used.")
            .min_len("productMaterials", &self.product_materials, 3, "Please list the materials.")
            .min_len("productDimensions", &self.product_dimensions, 2, "Dimensions are required.")
            .min_len("productRegion", &self.product_region, 2, "Region is required.")
            .check(
                "productImageUri",
                check_uploaded_media(&self.product_image_uri).is_ok(),
                "Product image is required.",
            )
            .finish()
    }
}

pub fn render_prompt(input: &ProductDescriptionInput) -> String {
    format!(
        "You are a marketing expert specializing in crafting product descriptions for culturally significant artisanal products.\n\
         \n\
         Given the following information about a product, create a compelling and culturally relevant product description.\n\
         The description should highlight the unique aspects of the product, its cultural significance, and the artisan's craftsmanship.\n\
         Reply with the description text only.\n\
         \n\
         Product Name: {}\n\
         Artisan Culture: {}\n\
         Craft Techniques: {}\n\
         Product Materials: {}\n\
         Product Dimensions: {}\n\
         Product Region: {}\n\
         Product Image: (attached)",
        input.product_name,
        input.artisan_culture,
        input.craft_techniques,
        input.product_materials,
        input.product_dimensions,
        input.product_region,
    )
}

pub async fn run(
    model: &dyn GenerativeModel,
    input: &ProductDescriptionInput,
) -> Result<ProductDescriptionOutput, FlowError> {
    let request = GenerateRequest::new(
        FLOW_NAME,
        vec![
            Part::text(render_prompt(input)),
            Part::media(input.product_image_uri.clone()),
        ],
    );
    let product_description = generate_text(model, request).await?;
    Ok(ProductDescriptionOutput { product_description })
}
