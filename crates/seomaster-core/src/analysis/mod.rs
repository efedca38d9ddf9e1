pub mod prompts;
mod result;
mod runner;

pub use result::AnalysisResult;
pub use runner::{AnalysisRunner, GenerationError};
