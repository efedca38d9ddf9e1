mod error;
mod gemini;

pub use error::GenAiError;
pub use gemini::GeminiClient;

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

/// A web source the model's answer relied on. Identity is `uri`; `title`
/// is display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,
    pub uri: String,
}

/// One incremental unit of a streamed generation response. A chunk may
/// carry a text delta, citation metadata, both, or neither.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateChunk {
    /// Text delta to append to the transcript, if any.
    pub text: Option<String>,
    /// Citation candidates attached to this chunk. May repeat entries
    /// already seen in earlier chunks.
    pub citations: Vec<Citation>,
}

/// A provider-neutral generation request: prompt content plus the
/// configuration bundle (system instruction, search grounding, reasoning
/// budget).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub prompt: String,
    pub instruction: Option<String>,
    pub google_search: bool,
    pub thinking_budget: Option<u32>,
}

impl GenerateRequest {
    /// Creates a request with the given prompt content and no extras.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            instruction: None,
            google_search: false,
            thinking_budget: None,
        }
    }

    /// Sets the system instruction.
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    /// Enables the search-augmentation tool.
    pub fn with_google_search(mut self) -> Self {
        self.google_search = true;
        self
    }

    /// Bounds the model's reasoning effort.
    pub fn with_thinking_budget(mut self, budget: u32) -> Self {
        self.thinking_budget = Some(budget);
        self
    }
}

/// The lazy chunk sequence produced by one generation call. Finite, and
/// not restartable: consuming it twice means issuing the request twice.
pub type GenerateStream = BoxStream<'static, Result<GenerateChunk, GenAiError>>;

/// Trait for streaming text-generation providers.
///
/// Any provider exposing a streaming generate-with-citations API can
/// substitute for [`GeminiClient`]; the rest of the crate depends only on
/// this trait.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Opens one generation request and returns its chunk stream.
    async fn stream_generate(&self, request: GenerateRequest)
        -> Result<GenerateStream, GenAiError>;
}

/// Blanket implementation for boxed trait objects.
#[async_trait]
impl GenerativeModel for Box<dyn GenerativeModel> {
    async fn stream_generate(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateStream, GenAiError> {
        (**self).stream_generate(request).await
    }
}
