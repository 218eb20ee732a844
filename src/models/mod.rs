pub mod gemini;
pub mod image;
pub mod prompt;

pub use gemini::*;
pub use image::*;
pub use prompt::*;
