//! Vision pipeline: pharmacist-style image description

use crate::gemini::{Content, GeminiClient, GenerateRequest, Part};
use base64::{engine::general_purpose, Engine as _};
use chat_core::prompt::IMAGE_DESCRIPTION_PROMPT;
use chat_core::{ChatError, ImagePayload};

/// Default multimodal model for image descriptions.
pub const DEFAULT_VISION_MODEL: &str = "gemini-1.5-flash";

/// Vision model describing uploaded images
pub struct VisionModel {
    client: GeminiClient,
    model_name: String,
}

impl VisionModel {
    /// Create a new vision model
    pub fn new(client: GeminiClient, model_name: String) -> Self {
        Self { client, model_name }
    }

    /// Create a vision model against the default multimodal model
    pub fn with_default_model(client: GeminiClient) -> Self {
        Self::new(client, DEFAULT_VISION_MODEL.to_string())
    }

    /// Describe an uploaded image in a pharmacist's voice.
    ///
    /// Generation parameters are left unset so the service defaults
    /// apply; timeout and retry come from the shared client.
    pub async fn describe_image(&self, image: &ImagePayload) -> Result<String, ChatError> {
        let request = build_request(image);
        tracing::debug!(
            model = %self.model_name,
            mime = %image.mime_type,
            bytes = image.bytes.len(),
            "submitting image query"
        );
        self.client.generate(&self.model_name, &request).await
    }
}

fn build_request(image: &ImagePayload) -> GenerateRequest {
    let image_b64 = general_purpose::STANDARD.encode(&image.bytes);
    GenerateRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![
                Part::text(IMAGE_DESCRIPTION_PROMPT),
                Part::inline_image(image.mime_type.clone(), image_b64),
            ],
        }],
        system_instruction: None,
        generation_config: None,
    }
}
