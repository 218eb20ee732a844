#![allow(dead_code)]

use async_trait::async_trait;
use loopprompt::{ClipboardSink, PromptError, PromptGenerator, PromptPair, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Notify;

/// Generator with a canned outcome that counts its calls.
pub struct FakeGenerator {
    outcome: std::result::Result<PromptPair, String>,
    calls: AtomicUsize,
    payloads: Mutex<Vec<String>>,
    gate: Option<Notify>,
}

impl FakeGenerator {
    pub fn succeeding(pair: PromptPair) -> Self {
        Self {
            outcome: Ok(pair),
            calls: AtomicUsize::new(0),
            payloads: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            ..Self::succeeding(cat_prompts())
        }
    }

    /// Holds every call until [`FakeGenerator::release`] is called.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Notify::new());
        self
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn payloads(&self) -> Vec<String> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl PromptGenerator for FakeGenerator {
    async fn generate(&self, image_base64: &str) -> Result<PromptPair> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.payloads.lock().unwrap().push(image_base64.to_string());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.outcome {
            Ok(pair) => Ok(pair.clone()),
            Err(message) => Err(PromptError::generation_failed(PromptError::RequestError(
                message.clone(),
            ))),
        }
    }
}

#[derive(Default)]
pub struct RecordingClipboard {
    pub written: Mutex<Vec<String>>,
}

impl ClipboardSink for RecordingClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        self.written.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

pub fn cat_prompts() -> PromptPair {
    PromptPair::new("A cat blinks slowly.", "Con mèo chớp mắt chậm rãi.")
}
