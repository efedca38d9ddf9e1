use std::collections::HashSet;

use futures::StreamExt;
use thiserror::Error;

use crate::analysis::prompts;
use crate::analysis::result::AnalysisResult;
use crate::config::DEFAULT_THINKING_BUDGET;
use crate::genai::{Citation, GenerateRequest, GenerativeModel};
use crate::module::{AnalysisModule, InputValues};

/// Opaque failure reported to the caller when a generation request fails.
///
/// The underlying transport or endpoint error is logged for diagnostics and
/// deliberately not exposed; the caller gets a single user-facing message
/// and may offer a manual re-submit.
#[derive(Debug, Error)]
#[error("Failed to generate analysis. Please try again.")]
pub struct GenerationError;

/// Runs one streaming analysis per call against an injected generation
/// client.
///
/// Each call owns its transcript buffer and citation list; concurrent
/// calls run uncorrelated. Dropping the future returned by [`run`]
/// stops consuming the chunk stream and releases the connection.
///
/// [`run`]: AnalysisRunner::run
pub struct AnalysisRunner<G: GenerativeModel> {
    model: G,
    thinking_budget: u32,
}

impl<G: GenerativeModel> AnalysisRunner<G> {
    /// Creates a runner around the given generation client.
    pub fn new(model: G) -> Self {
        Self {
            model,
            thinking_budget: DEFAULT_THINKING_BUDGET,
        }
    }

    /// Overrides the reasoning budget attached to each request.
    pub fn with_thinking_budget(mut self, budget: u32) -> Self {
        self.thinking_budget = budget;
        self
    }

    /// Runs the analysis for `module`, invoking `on_progress` with the
    /// accumulated transcript after every text delta.
    ///
    /// The transcript passed to `on_progress` only ever grows, and each
    /// invocation completes before the next chunk is processed. A failure
    /// at any point aborts the call without a partial result; whatever the
    /// last `on_progress` call rendered stays with the caller.
    pub async fn run(
        &self,
        module: AnalysisModule,
        inputs: &InputValues,
        mut on_progress: impl FnMut(&str),
    ) -> Result<AnalysisResult, GenerationError> {
        let parts = prompts::build(module, inputs);

        let request = GenerateRequest::new(parts.prompt)
            .with_instruction(parts.instruction)
            .with_google_search()
            .with_thinking_budget(self.thinking_budget);

        tracing::debug!(module = %module, "starting analysis");

        let mut stream = self.model.stream_generate(request).await.map_err(|e| {
            tracing::error!(module = %module, error = %e, "generation request failed");
            GenerationError
        })?;

        let mut transcript = String::new();
        let mut candidates: Vec<Citation> = Vec::new();

        while let Some(next) = stream.next().await {
            let chunk = next.map_err(|e| {
                tracing::error!(module = %module, error = %e, "generation stream failed");
                GenerationError
            })?;

            if let Some(text) = chunk.text {
                if !text.is_empty() {
                    transcript.push_str(&text);
                    on_progress(&transcript);
                }
            }

            for citation in chunk.citations {
                if !citation.title.is_empty() && !citation.uri.is_empty() {
                    candidates.push(citation);
                }
            }
        }

        let mut seen = HashSet::new();
        let citations: Vec<Citation> = candidates
            .into_iter()
            .filter(|c| seen.insert(c.uri.clone()))
            .collect();

        tracing::debug!(
            module = %module,
            transcript_len = transcript.len(),
            sources = citations.len(),
            "analysis complete"
        );

        Ok(AnalysisResult {
            transcript,
            citations,
        })
    }
}
