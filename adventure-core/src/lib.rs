pub mod models;
pub mod prompt;
pub mod extract;
pub mod generator;
pub mod service;

pub use generator::TextGenerator;
pub use models::{Suggestion, SuggestionParams, SuggestionRequest};
pub use service::{ExtractionPolicy, SuggestionService};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("No JSON found in model output: {0}")]
    Extraction(String),
    #[error("Model call failed: {0}")]
    Upstream(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
