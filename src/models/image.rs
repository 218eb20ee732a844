use crate::error::{PromptError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An image encoded inline as `data:<mime>;base64,<payload>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataUrl(String);

impl DataUrl {
    pub fn encode(mime: &str, bytes: &[u8]) -> Self {
        DataUrl(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
    }

    /// Wraps a string without validating it; malformed values are caught
    /// by [`DataUrl::base64_payload`] before any request is built.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        DataUrl(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn mime(&self) -> Option<&str> {
        let header = self.0.strip_prefix("data:")?.split(',').next()?;
        header.split(';').next().filter(|m| !m.is_empty())
    }

    /// The part after the first comma. Empty or missing payloads are rejected.
    pub fn base64_payload(&self) -> Result<&str> {
        match self.0.split(',').nth(1) {
            Some(payload) if !payload.is_empty() => Ok(payload),
            _ => Err(PromptError::InvalidImageData),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
