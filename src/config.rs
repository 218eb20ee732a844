use crate::error::{PromptError, Result};
use std::env;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        GeminiConfig {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// API key with everything but the first four characters hidden.
    pub fn masked_key(&self) -> String {
        let visible: String = self.api_key.chars().take(4).collect();
        format!("{}***", visible)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub json_logs: bool,
    pub gemini: GeminiConfig,
}

impl Config {
    pub fn new(gemini: GeminiConfig) -> Self {
        Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_upload_bytes: 20 * 1024 * 1024,
            json_logs: false,
            gemini,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. `API_KEY` is mandatory.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                PromptError::ConfigError("API_KEY environment variable not set.".into())
            })?;

        let mut gemini = GeminiConfig::new(api_key.trim());
        if let Some(model) = lookup("GEMINI_MODEL").filter(|m| !m.is_empty()) {
            gemini = gemini.with_model(model);
        }
        if let Some(base_url) = lookup("GEMINI_BASE_URL").filter(|u| !u.is_empty()) {
            gemini = gemini.with_base_url(base_url);
        }

        let mut config = Config::new(gemini);
        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT").and_then(|p| p.parse().ok()) {
            config.port = port;
        }
        if let Some(mb) = lookup("MAX_UPLOAD_MB").and_then(|m| m.parse::<usize>().ok()) {
            config.max_upload_bytes = mb * 1024 * 1024;
        }
        config.json_logs = lookup("LOG_FORMAT").map_or(false, |f| f == "json");

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
