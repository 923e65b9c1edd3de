//! Text pipeline: drug-cessation guidance

use crate::gemini::{
    Content, GeminiClient, GenerateRequest, GenerationConfig, Part, SystemInstruction,
};
use chat_core::prompt::DRUG_INFO_SYSTEM_PROMPT;
use chat_core::{normalized_drug_name, ChatError};

/// Default chat model for text queries.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-1.5-pro";

/// Sampling temperature for guidance answers.
const TEMPERATURE: f32 = 0.7;
/// Cap on generated tokens per answer.
const MAX_OUTPUT_TOKENS: u32 = 300;

/// Text model answering drug-cessation queries
pub struct TextModel {
    client: GeminiClient,
    model_name: String,
}

impl TextModel {
    /// Create a new text model
    pub fn new(client: GeminiClient, model_name: String) -> Self {
        Self { client, model_name }
    }

    /// Create a text model against the default chat model
    pub fn with_default_model(client: GeminiClient) -> Self {
        Self::new(client, DEFAULT_TEXT_MODEL.to_string())
    }

    /// Answer a drug-name query.
    ///
    /// The answer covers withdrawal symptoms, supportive medications,
    /// lifestyle guidance, and a pointer to professional care, and is
    /// returned exactly as the model produced it. Empty input fails
    /// validation before any request is sent.
    pub async fn drug_guidance(&self, drug_name: &str) -> Result<String, ChatError> {
        let drug_name = normalized_drug_name(drug_name)?;
        let request = build_request(&drug_name);
        tracing::debug!(model = %self.model_name, drug = %drug_name, "submitting text query");
        self.client.generate(&self.model_name, &request).await
    }
}

/// Build the fixed two-role request for a drug name. Construction is
/// deterministic: the system instruction never varies and the user turn
/// carries the raw drug name.
fn build_request(drug_name: &str) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![Part::text(drug_name)],
        }],
        system_instruction: Some(SystemInstruction {
            parts: vec![Part::text(DRUG_INFO_SYSTEM_PROMPT)],
        }),
        generation_config: Some(GenerationConfig {
            temperature: Some(TEMPERATURE),
            max_output_tokens: Some(MAX_OUTPUT_TOKENS),
        }),
    }
}
