pub mod client;
pub mod instructions;

use crate::{error::Result, models::PromptPair};
use async_trait::async_trait;

pub use client::{parse_prompt_pair, GeminiClient};

/// Turns a bare base64 image payload into a prompt pair.
#[async_trait]
pub trait PromptGenerator: Send + Sync {
    async fn generate(&self, image_base64: &str) -> Result<PromptPair>;
}
