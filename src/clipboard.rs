use crate::error::{PromptError, Result};
use crate::models::PromptLanguage;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// How long a card shows its "copied" state.
pub const COPY_CONFIRMATION: Duration = Duration::from_secs(2);

pub trait ClipboardSink: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// The host's clipboard. One arboard instance is opened on first use and
/// kept for the life of the process; on X11 and Wayland the copied text is
/// only served while that instance is alive.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Mutex<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| PromptError::ClipboardError("clipboard lock poisoned".into()))?;
        if guard.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| PromptError::ClipboardError(e.to_string()))?;
            *guard = Some(clipboard);
        }
        guard
            .as_mut()
            .ok_or_else(|| PromptError::ClipboardError("clipboard unavailable".into()))?
            .set_text(text.to_string())
            .map_err(|e| PromptError::ClipboardError(e.to_string()))
    }
}

/// Per-card copy confirmation. Independent of the generation state.
#[derive(Debug, Default, Clone)]
pub struct CopyIndicators {
    english: Option<Instant>,
    vietnamese: Option<Instant>,
}

impl CopyIndicators {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, language: PromptLanguage) -> &mut Option<Instant> {
        match language {
            PromptLanguage::English => &mut self.english,
            PromptLanguage::Vietnamese => &mut self.vietnamese,
        }
    }

    pub fn mark_copied(&mut self, language: PromptLanguage, at: Instant) {
        *self.slot(language) = Some(at);
    }

    pub fn is_copied(&self, language: PromptLanguage, now: Instant) -> bool {
        let copied_at = match language {
            PromptLanguage::English => self.english,
            PromptLanguage::Vietnamese => self.vietnamese,
        };
        copied_at.map_or(false, |at| now.saturating_duration_since(at) < COPY_CONFIRMATION)
    }

    pub fn clear(&mut self) {
        self.english = None;
        self.vietnamese = None;
    }
}

/// Copies `text` and, on success only, lights the card's indicator.
/// Empty text is ignored. The write runs on the blocking pool; the
/// indicator lock is taken only after it returns.
pub async fn copy_card(
    sink: Arc<dyn ClipboardSink>,
    indicators: &tokio::sync::Mutex<CopyIndicators>,
    language: PromptLanguage,
    text: String,
) -> Result<bool> {
    if text.is_empty() {
        return Ok(false);
    }
    tokio::task::spawn_blocking(move || sink.write_text(&text))
        .await
        .map_err(|e| PromptError::ClipboardError(e.to_string()))??;
    indicators.lock().await.mark_copied(language, Instant::now());
    Ok(true)
}
