use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Please upload an image first.")]
    MissingImage,
    #[error("Invalid image data format.")]
    InvalidImageData,
    #[error("Failed to read image: {0}")]
    ImageReadError(String),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("API response did not match the expected format.")]
    FormatMismatch,
    /// Wraps any failure of a generation round-trip; this is what the user sees.
    #[error("Failed to generate prompts: {0}")]
    GenerationFailed(String),
    #[error("A generation is already in progress.")]
    GenerationInProgress,
    #[error("Clipboard error: {0}")]
    ClipboardError(String),
    #[error("Server error: {0}")]
    ServerError(String),
}

impl PromptError {
    pub fn generation_failed(inner: PromptError) -> Self {
        match inner {
            PromptError::GenerationFailed(_) => inner,
            other => PromptError::GenerationFailed(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for PromptError {
    fn from(e: reqwest::Error) -> Self {
        PromptError::RequestError(e.to_string())
    }
}

impl From<serde_json::Error> for PromptError {
    fn from(e: serde_json::Error) -> Self {
        PromptError::ResponseError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PromptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            PromptError::MissingImage.to_string(),
            "Please upload an image first."
        );
        assert_eq!(
            PromptError::InvalidImageData.to_string(),
            "Invalid image data format."
        );
    }

    #[test]
    fn test_generation_failed_wraps_once() {
        let err = PromptError::generation_failed(PromptError::FormatMismatch);
        assert_eq!(
            err.to_string(),
            "Failed to generate prompts: API response did not match the expected format."
        );

        let twice = PromptError::generation_failed(err);
        assert!(!twice.to_string().contains("Failed to generate prompts: Failed"));
    }
}
