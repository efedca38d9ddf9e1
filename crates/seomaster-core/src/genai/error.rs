use thiserror::Error;

/// Errors that can occur while talking to the generation endpoint.
#[derive(Debug, Error)]
pub enum GenAiError {
    #[error("Missing API key. Set SEOMASTER_API_KEY or GEMINI_API_KEY.")]
    MissingApiKey,

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Rate limited. Try again later.")]
    RateLimited,

    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for GenAiError {
    fn from(err: reqwest::Error) -> Self {
        GenAiError::Network(err.to_string())
    }
}
