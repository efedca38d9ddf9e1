use std::collections::VecDeque;

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{Citation, GenAiError, GenerateChunk, GenerateRequest, GenerateStream, GenerativeModel};
use crate::config::{DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_URL};

/// Client for the Gemini streaming generation API.
///
/// Issues `streamGenerateContent` requests with `alt=sse` and exposes the
/// response as a chunk stream. Grounding metadata attached to a chunk is
/// surfaced as [`Citation`] candidates.
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    model: String,
    client: Client,
}

impl GeminiClient {
    /// Creates a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_GEMINI_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            client: Client::new(),
        }
    }

    /// Creates a client from the SEOMASTER_API_KEY or GEMINI_API_KEY
    /// environment variable.
    pub fn from_env() -> Result<Self, GenAiError> {
        let api_key = std::env::var("SEOMASTER_API_KEY")
            .or_else(|_| std::env::var("GEMINI_API_KEY"))
            .map_err(|_| GenAiError::MissingApiKey)?;
        Ok(Self::new(api_key))
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the API base URL (for proxies or regional endpoints).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn stream_generate(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateStream, GenAiError> {
        let url = format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url, self.model
        );

        tracing::debug!(model = %self.model, "opening generation stream");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&WireRequest::from(request))
            .send()
            .await?;

        let status = response.status();

        if status == 429 {
            return Err(GenAiError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenAiError::ApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        Ok(sse_chunk_stream(
            response
                .bytes_stream()
                .map(|r| {
                    r.map(|b| b.to_vec())
                        .map_err(|e| GenAiError::Network(e.to_string()))
                })
                .boxed(),
        ))
    }
}

struct SseState {
    bytes: BoxStream<'static, Result<Vec<u8>, GenAiError>>,
    buffer: String,
    pending: VecDeque<GenerateChunk>,
    done: bool,
}

/// Turns a raw SSE byte stream into a stream of [`GenerateChunk`]s.
///
/// Events are separated by a blank line; each event's `data:` line carries
/// one JSON `GenerateContentResponse`. Unparseable events are skipped.
fn sse_chunk_stream(bytes: BoxStream<'static, Result<Vec<u8>, GenAiError>>) -> GenerateStream {
    let state = SseState {
        bytes,
        buffer: String::new(),
        pending: VecDeque::new(),
        done: false,
    };

    futures::stream::try_unfold(state, |mut state| async move {
        loop {
            if let Some(chunk) = state.pending.pop_front() {
                return Ok(Some((chunk, state)));
            }
            if state.done {
                return Ok(None);
            }
            match state.bytes.next().await {
                Some(Ok(data)) => {
                    // Normalize CRLF so event boundaries are always "\n\n".
                    state
                        .buffer
                        .push_str(&String::from_utf8_lossy(&data).replace('\r', ""));

                    while let Some(pos) = state.buffer.find("\n\n") {
                        let event = state.buffer[..pos].to_string();
                        state.buffer.drain(..pos + 2);
                        if let Some(chunk) = parse_sse_event(&event) {
                            state.pending.push_back(chunk);
                        }
                    }
                }
                Some(Err(e)) => return Err(e),
                None => {
                    state.done = true;
                    // Flush a trailing event that lacked the blank-line terminator.
                    let rest = std::mem::take(&mut state.buffer);
                    if let Some(chunk) = parse_sse_event(&rest) {
                        state.pending.push_back(chunk);
                    }
                }
            }
        }
    })
    .boxed()
}

/// Parses one SSE event and converts its payload into a chunk.
fn parse_sse_event(event_data: &str) -> Option<GenerateChunk> {
    let data = event_data
        .lines()
        .find_map(|line| line.strip_prefix("data: "))?
        .trim();

    let response: StreamResponse = serde_json::from_str(data).ok()?;
    Some(chunk_from_response(response))
}

fn chunk_from_response(response: StreamResponse) -> GenerateChunk {
    let mut chunk = GenerateChunk::default();

    let Some(candidate) = response.candidates.into_iter().next() else {
        return chunk;
    };

    if let Some(content) = candidate.content {
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if !text.is_empty() {
            chunk.text = Some(text);
        }
    }

    if let Some(meta) = candidate.grounding_metadata {
        for grounding in meta.grounding_chunks {
            let Some(web) = grounding.web else { continue };
            // Sources without both a title and a uri are unusable downstream.
            if let (Some(uri), Some(title)) = (web.uri, web.title) {
                if !uri.is_empty() && !title.is_empty() {
                    chunk.citations.push(Citation { title, uri });
                }
            }
        }
    }

    chunk
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest {
    contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireTool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<WireGenerationConfig>,
}

impl From<GenerateRequest> for WireRequest {
    fn from(request: GenerateRequest) -> Self {
        Self {
            contents: vec![WireContent {
                role: Some("user"),
                parts: vec![WirePart {
                    text: request.prompt,
                }],
            }],
            system_instruction: request.instruction.map(|text| WireContent {
                role: None,
                parts: vec![WirePart { text }],
            }),
            tools: if request.google_search {
                vec![WireTool {
                    google_search: WireGoogleSearch {},
                }]
            } else {
                Vec::new()
            },
            generation_config: request.thinking_budget.map(|thinking_budget| {
                WireGenerationConfig {
                    thinking_config: WireThinkingConfig { thinking_budget },
                }
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct WireContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<WirePart>,
}

#[derive(Debug, Serialize)]
struct WirePart {
    text: String,
}

#[derive(Debug, Serialize)]
struct WireTool {
    #[serde(rename = "googleSearch")]
    google_search: WireGoogleSearch,
}

#[derive(Debug, Serialize)]
struct WireGoogleSearch {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    thinking_config: WireThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct StreamResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCandidate {
    content: Option<WireCandidateContent>,
    grounding_metadata: Option<WireGroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct WireCandidateContent {
    #[serde(default)]
    parts: Vec<WireResponsePart>,
}

#[derive(Debug, Deserialize)]
struct WireResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireGroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<WireGroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct WireGroundingChunk {
    web: Option<WireWebSource>,
}

#[derive(Debug, Deserialize)]
struct WireWebSource {
    uri: Option<String>,
    title: Option<String>,
}
