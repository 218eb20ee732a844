pub mod controller;
pub mod state;

pub use controller::{Controller, View};
pub use state::{reduce, Action, AppState, Effect, GenerationToken, Phase};
