//! Places a product photo into a photo of the buyer's room.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::FlowError;
use crate::infra::genai::media::check_media_uri;
use crate::infra::genai::{GenerateRequest, GenerativeModel, Part, ResponseFormat};

pub const FLOW_NAME: &str = "visualizeProductInRoom";

pub const INSTRUCTION: &str = "Place the product from the first image into the room from the second image. \
The product should be placed in a natural and realistic position. \
Maintain the original art style of both the product and the room. Do not add any extra objects.";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisualizeRoomInput {
    pub product_image_uri: String,
    pub room_image_uri: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisualizeRoomOutput {
    /// The composed image as a data URI.
    pub generated_image_uri: String,
}

pub async fn run(
    model: &dyn GenerativeModel,
    input: &VisualizeRoomInput,
) -> Result<VisualizeRoomOutput, FlowError> {
    check_media_uri(&input.product_image_uri)?;
    check_media_uri(&input.room_image_uri)?;

    let request = GenerateRequest::new(
        FLOW_NAME,
        vec![
            Part::media(input.product_image_uri.clone()),
            Part::media(input.room_image_uri.clone()),
            Part::text(INSTRUCTION),
        ],
    )
    .with_format(ResponseFormat::Image);

    let response = model.generate(request).await?;
    let uri = response.first_media().ok_or_else(|| FlowError::MissingOutput {
        flow: FLOW_NAME,
        message: "Image generation failed to produce an output.".to_string(),
    })?;
    Ok(VisualizeRoomOutput {
        generated_image_uri: uri.to_string(),
    })
}
