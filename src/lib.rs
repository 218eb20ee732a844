pub mod app;
pub mod clipboard;
pub mod config;
pub mod display;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
#[cfg(feature = "server")]
pub mod server;
pub mod upload;

pub use app::{Controller, View};
pub use clipboard::{ClipboardSink, SystemClipboard};
pub use config::{Config, GeminiConfig};
pub use error::{PromptError, Result};
pub use gemini::{GeminiClient, PromptGenerator};
pub use models::*;
pub use upload::ImageFile;
