use crate::{
    app::state::{reduce, Action, AppState, Effect, GenerationToken, Phase},
    clipboard::{copy_card, ClipboardSink, CopyIndicators},
    error::{PromptError, Result},
    gemini::PromptGenerator,
    models::{DataUrl, PromptLanguage, PromptPair},
    upload::{self, ImageFile},
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

/// Everything the display needs, captured at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct View {
    pub phase: Phase,
    pub image: Option<DataUrl>,
    pub prompts: Option<PromptPair>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub can_generate: bool,
    pub copied_english: bool,
    pub copied_vietnamese: bool,
}

impl View {
    pub fn from_state(state: &AppState, copies: &CopyIndicators, now: Instant) -> Self {
        Self {
            phase: state.phase(),
            image: state.image.clone(),
            prompts: state.prompts.clone(),
            is_loading: state.is_loading,
            error: state.error.clone(),
            can_generate: state.can_generate(),
            copied_english: copies.is_copied(PromptLanguage::English, now),
            copied_vietnamese: copies.is_copied(PromptLanguage::Vietnamese, now),
        }
    }

    pub fn is_copied(&self, language: PromptLanguage) -> bool {
        match language {
            PromptLanguage::English => self.copied_english,
            PromptLanguage::Vietnamese => self.copied_vietnamese,
        }
    }
}

pub struct Controller {
    state: Arc<Mutex<AppState>>,
    copies: Mutex<CopyIndicators>,
    generator: Arc<dyn PromptGenerator>,
    clipboard: Arc<dyn ClipboardSink>,
}

impl Controller {
    pub fn new(generator: Arc<dyn PromptGenerator>, clipboard: Arc<dyn ClipboardSink>) -> Self {
        Self {
            state: Arc::new(Mutex::new(AppState::new())),
            copies: Mutex::new(CopyIndicators::new()),
            generator,
            clipboard,
        }
    }

    pub async fn snapshot(&self) -> AppState {
        self.state.lock().await.clone()
    }

    pub async fn view(&self) -> View {
        let state = self.state.lock().await;
        let copies = self.copies.lock().await;
        View::from_state(&state, &copies, Instant::now())
    }

    async fn dispatch(&self, action: Action) -> Effect {
        let mut state = self.state.lock().await;
        reduce(&mut state, action)
    }

    /// Accepts a picked or dropped batch; only the first file is used.
    pub async fn upload(&self, files: Vec<ImageFile>) -> Result<()> {
        match upload::pick_first(files) {
            Some(file) => self.upload_file(file).await,
            None => {
                log::debug!("Upload contained no files");
                Ok(())
            }
        }
    }

    pub async fn upload_file(&self, file: ImageFile) -> Result<()> {
        match upload::read_as_data_url(&file) {
            Ok(data_url) => {
                log::info!(
                    "Image uploaded: {} ({} bytes)",
                    file.name.as_deref().unwrap_or("<unnamed>"),
                    file.bytes.len()
                );
                self.upload_data_url(data_url).await;
                Ok(())
            }
            Err(e) => {
                self.reject_upload(&e).await;
                Err(e)
            }
        }
    }

    /// Records an upload that never produced image data. The current image
    /// is kept; any shown result is cleared in favor of the error.
    pub async fn reject_upload(&self, error: &PromptError) {
        log::warn!("Image could not be read: {}", error);
        self.dispatch(Action::ImageRejected(error.to_string())).await;
        self.copies.lock().await.clear();
    }

    pub async fn upload_data_url(&self, data_url: DataUrl) {
        self.dispatch(Action::ImageUploaded(data_url)).await;
        self.copies.lock().await.clear();
    }

    /// Runs one generation. The request runs on its own task, so the
    /// attempt still settles when the caller stops waiting for it. The
    /// state lock is released while the request is in flight.
    pub async fn generate(&self) -> Result<PromptPair> {
        let (token, payload) = {
            let mut state = self.state.lock().await;
            let was_loading = state.is_loading;
            match reduce(&mut state, Action::GenerateRequested) {
                Effect::Generate { token, payload } => (token, payload),
                _ if was_loading => return Err(PromptError::GenerationInProgress),
                _ if state.image.is_none() => return Err(PromptError::MissingImage),
                _ => return Err(PromptError::InvalidImageData),
            }
        };

        log::info!("Generation {:?} started", token);
        let generator = self.generator.clone();
        let state = self.state.clone();
        let round_trip = tokio::spawn(async move {
            let result = generator.generate(&payload).await;
            settle(&state, token, &result).await;
            result
        });

        match round_trip.await {
            Ok(result) => result,
            Err(e) => {
                log::error!("Generation {:?} task aborted: {}", token, e);
                let result = Err(PromptError::generation_failed(PromptError::ResponseError(
                    e.to_string(),
                )));
                settle(&self.state, token, &result).await;
                result
            }
        }
    }

    /// Copies one card's text. The clipboard write runs on the blocking
    /// pool and no lock is held while it does.
    pub async fn copy(&self, language: PromptLanguage) -> Result<bool> {
        let text = {
            let state = self.state.lock().await;
            match &state.prompts {
                Some(prompts) => prompts.get(language).to_string(),
                None => return Ok(false),
            }
        };

        copy_card(self.clipboard.clone(), &self.copies, language, text)
            .await
            .map_err(|e| {
                log::error!("Copy of {} prompt failed: {}", language, e);
                e
            })
    }
}

async fn settle(state: &Mutex<AppState>, token: GenerationToken, result: &Result<PromptPair>) {
    let action = match result {
        Ok(prompts) => Action::GenerationSucceeded {
            token,
            prompts: prompts.clone(),
        },
        Err(e) => Action::GenerationFailed {
            token,
            message: e.to_string(),
        },
    };

    let effect = {
        let mut state = state.lock().await;
        reduce(&mut state, action)
    };
    if effect == Effect::Discarded {
        log::warn!("Generation {:?} settled after a newer upload; result dropped", token);
    } else if result.is_ok() {
        log::info!("Generation {:?} succeeded", token);
    }
}
