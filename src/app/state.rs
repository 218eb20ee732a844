use crate::error::PromptError;
use crate::models::{DataUrl, PromptPair};
use serde::Serialize;

/// Identifies one generation attempt. Completions carrying an older token
/// than the state's are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct GenerationToken(u64);

impl GenerationToken {
    fn next(self) -> Self {
        GenerationToken(self.0.wrapping_add(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Ready,
    Generating,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub image: Option<DataUrl>,
    pub prompts: Option<PromptPair>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub generation: GenerationToken,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Generating
        } else if self.prompts.is_some() {
            Phase::Succeeded
        } else if self.error.is_some() {
            Phase::Failed
        } else if self.image.is_some() {
            Phase::Ready
        } else {
            Phase::Idle
        }
    }

    pub fn can_generate(&self) -> bool {
        self.image.is_some() && !self.is_loading
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    ImageUploaded(DataUrl),
    ImageRejected(String),
    GenerateRequested,
    GenerationSucceeded {
        token: GenerationToken,
        prompts: PromptPair,
    },
    GenerationFailed {
        token: GenerationToken,
        message: String,
    },
}

/// Work the caller must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Generate {
        token: GenerationToken,
        payload: String,
    },
    /// A completion arrived for a superseded attempt and was dropped.
    Discarded,
}

pub fn reduce(state: &mut AppState, action: Action) -> Effect {
    match action {
        Action::ImageUploaded(image) => {
            if state.is_loading {
                log::info!("New image uploaded while generating; in-flight result will be dropped");
            }
            state.image = Some(image);
            state.prompts = None;
            state.error = None;
            state.is_loading = false;
            state.generation = state.generation.next();
            Effect::None
        }
        Action::ImageRejected(message) => {
            // The image stays; the banner replaces any shown result.
            state.prompts = None;
            state.error = Some(message);
            Effect::None
        }
        Action::GenerateRequested => {
            if state.is_loading {
                return Effect::None;
            }
            let Some(image) = state.image.as_ref() else {
                state.error = Some(PromptError::MissingImage.to_string());
                return Effect::None;
            };

            state.prompts = None;
            match image.base64_payload() {
                Ok(payload) => {
                    let payload = payload.to_string();
                    state.generation = state.generation.next();
                    state.is_loading = true;
                    state.error = None;
                    Effect::Generate {
                        token: state.generation,
                        payload,
                    }
                }
                Err(e) => {
                    state.error = Some(e.to_string());
                    Effect::None
                }
            }
        }
        Action::GenerationSucceeded { token, prompts } => {
            if !is_current(state, token) {
                return Effect::Discarded;
            }
            state.prompts = Some(prompts);
            state.error = None;
            state.is_loading = false;
            Effect::None
        }
        Action::GenerationFailed { token, message } => {
            if !is_current(state, token) {
                return Effect::Discarded;
            }
            state.prompts = None;
            state.error = Some(message);
            state.is_loading = false;
            Effect::None
        }
    }
}

fn is_current(state: &AppState, token: GenerationToken) -> bool {
    state.is_loading && state.generation == token
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> DataUrl {
        DataUrl::encode("image/png", b"png bytes")
    }

    fn pair() -> PromptPair {
        PromptPair::new("A cat blinks slowly.", "Con mèo chớp mắt chậm rãi.")
    }

    fn start(state: &mut AppState) -> GenerationToken {
        match reduce(state, Action::GenerateRequested) {
            Effect::Generate { token, .. } => token,
            other => panic!("expected generation to start, got {:?}", other),
        }
    }

    #[test]
    fn test_idle_to_ready() {
        let mut state = AppState::new();
        assert_eq!(state.phase(), Phase::Idle);
        assert!(!state.can_generate());

        reduce(&mut state, Action::ImageUploaded(image()));
        assert_eq!(state.phase(), Phase::Ready);
        assert!(state.can_generate());
    }

    #[test]
    fn test_generate_without_image() {
        let mut state = AppState::new();
        let effect = reduce(&mut state, Action::GenerateRequested);

        assert_eq!(effect, Effect::None);
        assert_eq!(state.error.as_deref(), Some("Please upload an image first."));
        assert!(!state.is_loading);
    }

    #[test]
    fn test_generate_strips_data_url_prefix() {
        let mut state = AppState::new();
        reduce(&mut state, Action::ImageUploaded(image()));

        match reduce(&mut state, Action::GenerateRequested) {
            Effect::Generate { payload, .. } => assert_eq!(payload, "cG5nIGJ5dGVz"),
            other => panic!("unexpected effect {:?}", other),
        }
        assert_eq!(state.phase(), Phase::Generating);
        assert!(!state.can_generate());
    }

    #[test]
    fn test_malformed_image_data() {
        let mut state = AppState::new();
        reduce(
            &mut state,
            Action::ImageUploaded(DataUrl::from_raw("data:image/png;base64,")),
        );

        assert_eq!(reduce(&mut state, Action::GenerateRequested), Effect::None);
        assert_eq!(state.error.as_deref(), Some("Invalid image data format."));
        assert!(!state.is_loading);
        assert_eq!(state.phase(), Phase::Failed);
    }

    #[test]
    fn test_second_request_while_loading_is_noop() {
        let mut state = AppState::new();
        reduce(&mut state, Action::ImageUploaded(image()));
        let token = start(&mut state);

        assert_eq!(reduce(&mut state, Action::GenerateRequested), Effect::None);
        assert_eq!(state.generation, token);
        assert!(state.is_loading);
    }

    #[test]
    fn test_success_and_failure_settle() {
        let mut state = AppState::new();
        reduce(&mut state, Action::ImageUploaded(image()));

        let token = start(&mut state);
        reduce(
            &mut state,
            Action::GenerationSucceeded {
                token,
                prompts: pair(),
            },
        );
        assert_eq!(state.phase(), Phase::Succeeded);
        assert_eq!(state.prompts, Some(pair()));
        assert!(state.error.is_none());

        let token = start(&mut state);
        assert!(state.prompts.is_none());
        reduce(
            &mut state,
            Action::GenerationFailed {
                token,
                message: "Failed to generate prompts: boom".into(),
            },
        );
        assert_eq!(state.phase(), Phase::Failed);
        assert!(state.prompts.is_none());
        assert!(!state.is_loading);
    }

    #[test]
    fn test_upload_mid_generation_drops_stale_result() {
        let mut state = AppState::new();
        reduce(&mut state, Action::ImageUploaded(image()));
        let stale = start(&mut state);

        let second = DataUrl::encode("image/jpeg", b"second");
        reduce(&mut state, Action::ImageUploaded(second.clone()));
        assert_eq!(state.phase(), Phase::Ready);

        let effect = reduce(
            &mut state,
            Action::GenerationSucceeded {
                token: stale,
                prompts: pair(),
            },
        );
        assert_eq!(effect, Effect::Discarded);
        assert!(state.prompts.is_none());
        assert_eq!(state.image, Some(second));
    }

    #[test]
    fn test_upload_clears_result_and_error() {
        let mut state = AppState::new();
        reduce(&mut state, Action::GenerateRequested);
        assert!(state.error.is_some());

        reduce(&mut state, Action::ImageUploaded(image()));
        assert!(state.error.is_none());
        assert!(state.prompts.is_none());
    }

    #[test]
    fn test_rejected_image_keeps_previous() {
        let mut state = AppState::new();
        reduce(&mut state, Action::ImageUploaded(image()));
        reduce(
            &mut state,
            Action::ImageRejected("Failed to read image: broken.png is empty".into()),
        );

        assert_eq!(state.image, Some(image()));
        assert!(state.error.as_deref().unwrap().starts_with("Failed to read image"));
        assert!(state.can_generate());
    }

    #[test]
    fn test_rejected_image_replaces_result_with_error() {
        let mut state = AppState::new();
        reduce(&mut state, Action::ImageUploaded(image()));
        let token = start(&mut state);
        reduce(
            &mut state,
            Action::GenerationSucceeded {
                token,
                prompts: pair(),
            },
        );

        reduce(
            &mut state,
            Action::ImageRejected("Failed to read image: broken.png is empty".into()),
        );

        assert!(state.prompts.is_none());
        assert_eq!(state.phase(), Phase::Failed);
        assert_eq!(state.image, Some(image()));
    }
}
