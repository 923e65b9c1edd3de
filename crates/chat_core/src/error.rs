//! Error taxonomy shared by the pipelines and their surfaces

use thiserror::Error;

/// Errors produced while answering a chat request.
///
/// Every variant is terminal for the request that produced it; nothing
/// is recovered into a partial answer.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Missing or rejected credential. Surfaces on the first external
    /// call, not at startup.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Input rejected before any external call was made. Never retried.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Network, timeout, or upstream service failure.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        /// True for failures where another attempt may succeed
        /// (timeouts, connection errors, 429 and 5xx responses).
        retryable: bool,
    },
}

impl ChatError {
    /// Shorthand for a transport failure.
    pub fn transport(message: impl Into<String>, retryable: bool) -> Self {
        Self::Transport {
            message: message.into(),
            retryable,
        }
    }

    /// Whether a retry may succeed where this attempt failed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport {
                retryable: true,
                ..
            }
        )
    }
}
