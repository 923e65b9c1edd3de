//! Wire types for the REST dispatcher
//!
//! The WASM frontend keeps a hand-written mirror of these shapes (this
//! crate pulls native-only image decoding); this module is the native
//! side of the contract.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat/text`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextQueryRequest {
    pub drug_name: String,
}

/// Body of `POST /api/chat/image`. Image bytes travel base64-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageQueryRequest {
    pub file_name: String,
    pub data_b64: String,
}

/// Successful answer from either pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
}

/// Error body rendered in place of an answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
