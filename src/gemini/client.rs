use crate::{
    config::GeminiConfig,
    error::{PromptError, Result},
    gemini::{instructions::*, PromptGenerator},
    logger,
    models::{
        ApiErrorEnvelope, Content, GenerateContentRequest, GenerateContentResponse,
        GenerationConfig, Part, PromptPair,
    },
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    pub fn build_request(image_base64: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part::text(SYSTEM_INSTRUCTION)],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::text(USER_INSTRUCTION),
                    Part::inline(IMAGE_MIME_TYPE, image_base64),
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: RESPONSE_MIME_TYPE.to_string(),
                response_schema: response_schema(),
            },
        }
    }

    async fn request_text(&self, image_base64: &str) -> Result<String> {
        let payload = Self::build_request(image_base64);

        log::info!("Invoking model: {}", self.config.model);
        log::debug!("Inline image payload: {} base64 chars", image_base64.len());

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        if let Some(reason) = parsed.finish_reason() {
            log::debug!("Finish reason: {}", reason);
        }

        parsed
            .text()
            .ok_or_else(|| PromptError::ResponseError("Response contained no text".into()))
    }
}

#[async_trait]
impl PromptGenerator for GeminiClient {
    async fn generate(&self, image_base64: &str) -> Result<PromptPair> {
        let _timer = logger::timer("gemini generateContent");

        let result = match self.request_text(image_base64).await {
            Ok(text) => parse_prompt_pair(&text),
            Err(e) => Err(e),
        };

        result.map_err(|e| {
            log::error!("Error calling Gemini API: {}", e);
            PromptError::generation_failed(e)
        })
    }
}

/// Parses the model's JSON text. Both fields must be present, strings and
/// non-empty; anything less is rejected rather than returned partially.
pub fn parse_prompt_pair(text: &str) -> Result<PromptPair> {
    let value: Value = serde_json::from_str(text.trim())?;

    let field = |name: &str| {
        value
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(String::from)
    };

    match (field(ENGLISH_FIELD), field(VIETNAMESE_FIELD)) {
        (Some(english_prompt), Some(vietnamese_prompt)) => Ok(PromptPair {
            english_prompt,
            vietnamese_prompt,
        }),
        _ => Err(PromptError::FormatMismatch),
    }
}

fn api_error(status: StatusCode, body: &str) -> PromptError {
    let message = serde_json::from_str::<ApiErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            } else {
                trimmed.chars().take(500).collect()
            }
        });

    PromptError::ApiError {
        status: status.as_u16(),
        message,
    }
}
