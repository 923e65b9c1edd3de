//! Core domain for the pharmachat service
//!
//! This crate provides the shared vocabulary of the two chat pipelines:
//! the fixed prompt templates, input validation, environment-backed
//! configuration, and the error taxonomy. It contains no network code.

pub mod api;
pub mod config;
pub mod error;
pub mod prompt;
pub mod types;

pub use config::AppConfig;
pub use error::ChatError;
pub use types::{normalized_drug_name, ImagePayload};
