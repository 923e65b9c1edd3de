//! LLM bridge for the hosted Gemini API
//!
//! Provides the HTTP client for Google's `generateContent` endpoint and
//! the two request pipelines built on it: a text model for
//! drug-cessation guidance and a vision model for pharmacist-style
//! image description.
//!
//! Copyright (c) 2025 Pharmachat Contributors

pub mod gemini;
pub mod text;
pub mod vision;

pub use gemini::{GeminiClient, GeminiConfig};
pub use text::TextModel;
pub use vision::VisionModel;
