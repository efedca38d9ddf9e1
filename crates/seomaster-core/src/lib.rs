pub mod analysis;
pub mod config;
pub mod genai;
pub mod module;

pub use analysis::{AnalysisResult, AnalysisRunner, GenerationError};
pub use config::Config;
pub use genai::{Citation, GenAiError, GeminiClient, GenerativeModel};
pub use module::{AnalysisModule, FieldSpec, InputValues};
