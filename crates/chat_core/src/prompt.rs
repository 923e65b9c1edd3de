//! Fixed prompt templates for both pipelines
//!
//! The templates never vary per request: the text pipeline substitutes
//! the raw drug name as the user turn under a constant system
//! instruction, and the vision pipeline sends a constant instruction
//! alongside the image bytes.

/// System instruction for drug-cessation queries. The model is asked
/// for four sections: withdrawal symptoms, supportive medications,
/// lifestyle guidance, and a pointer to professional care.
pub const DRUG_INFO_SYSTEM_PROMPT: &str = "You are a chatbot designed to provide comprehensive information about quitting drugs. For each drug, provide the following:\n\
1. Common withdrawal symptoms.\n\
2. Medications that can help manage withdrawal.\n\
3. Exercises and lifestyle changes to support recovery.\n\
4. Encourage consulting healthcare professionals for personalized advice.";

/// Instruction paired with an uploaded image in the vision pipeline.
pub const IMAGE_DESCRIPTION_PROMPT: &str =
    "describe the image as if you are a professional pharmacist";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_names_all_four_sections() {
        assert!(DRUG_INFO_SYSTEM_PROMPT.contains("withdrawal symptoms"));
        assert!(DRUG_INFO_SYSTEM_PROMPT.contains("Medications"));
        assert!(DRUG_INFO_SYSTEM_PROMPT.contains("Exercises and lifestyle changes"));
        assert!(DRUG_INFO_SYSTEM_PROMPT.contains("consulting healthcare professionals"));
    }

    #[test]
    fn test_image_prompt_is_pharmacist_voiced() {
        assert!(IMAGE_DESCRIPTION_PROMPT.contains("professional pharmacist"));
    }
}
