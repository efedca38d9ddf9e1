use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::StreamExt;
use seomaster_core::genai::{
    Citation, GenAiError, GenerateChunk, GenerateRequest, GenerateStream, GenerativeModel,
};
use seomaster_core::{AnalysisModule, AnalysisRunner, InputValues};

/// Scripted stand-in for the generation endpoint.
struct FakeModel {
    script: Mutex<Option<Vec<Result<GenerateChunk, GenAiError>>>>,
    fail_open: bool,
    last_request: Arc<Mutex<Option<GenerateRequest>>>,
}

impl FakeModel {
    fn with_chunks(chunks: Vec<Result<GenerateChunk, GenAiError>>) -> Self {
        Self {
            script: Mutex::new(Some(chunks)),
            fail_open: false,
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    fn failing_open() -> Self {
        Self {
            script: Mutex::new(None),
            fail_open: true,
            last_request: Arc::new(Mutex::new(None)),
        }
    }
}

#[async_trait]
impl GenerativeModel for FakeModel {
    async fn stream_generate(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateStream, GenAiError> {
        *self.last_request.lock().unwrap() = Some(request);
        if self.fail_open {
            return Err(GenAiError::Network("dns lookup failed".to_string()));
        }
        let chunks = self
            .script
            .lock()
            .unwrap()
            .take()
            .expect("stream consumed twice");
        Ok(futures::stream::iter(chunks).boxed())
    }
}

fn text(delta: &str) -> Result<GenerateChunk, GenAiError> {
    Ok(GenerateChunk {
        text: Some(delta.to_string()),
        citations: Vec::new(),
    })
}

fn cited(title: &str, uri: &str) -> Result<GenerateChunk, GenAiError> {
    Ok(GenerateChunk {
        text: None,
        citations: vec![Citation {
            title: title.to_string(),
            uri: uri.to_string(),
        }],
    })
}

fn local_seo_inputs() -> InputValues {
    let mut inputs = InputValues::new();
    inputs.insert("city".to_string(), "Austin, TX".to_string());
    inputs.insert("businessType".to_string(), "Plumber".to_string());
    inputs
}

#[tokio::test]
async fn test_transcript_grows_monotonically() {
    let runner = AnalysisRunner::new(FakeModel::with_chunks(vec![
        text("A"),
        text("BC"),
        text(""),
    ]));

    let mut progress: Vec<String> = Vec::new();
    let result = runner
        .run(AnalysisModule::LocalSeo, &local_seo_inputs(), |t| {
            progress.push(t.to_string())
        })
        .await
        .unwrap();

    // The empty delta produces no additional callback.
    assert_eq!(progress, vec!["A".to_string(), "ABC".to_string()]);
    assert_eq!(result.transcript, "ABC");
}

#[tokio::test]
async fn test_citations_deduplicated_by_uri_first_seen_wins() {
    let runner = AnalysisRunner::new(FakeModel::with_chunks(vec![
        cited("t1", "u1"),
        cited("t2", "u1"),
        cited("t3", "u2"),
    ]));

    let result = runner
        .run(AnalysisModule::LocalSeo, &local_seo_inputs(), |_| {})
        .await
        .unwrap();

    assert_eq!(
        result.citations,
        vec![
            Citation {
                title: "t1".to_string(),
                uri: "u1".to_string()
            },
            Citation {
                title: "t3".to_string(),
                uri: "u2".to_string()
            },
        ]
    );
}

#[tokio::test]
async fn test_citations_missing_title_or_uri_are_excluded() {
    let runner = AnalysisRunner::new(FakeModel::with_chunks(vec![
        cited("X", ""),
        cited("", "https://a.example"),
        cited("Kept", "https://b.example"),
    ]));

    let result = runner
        .run(AnalysisModule::LocalSeo, &local_seo_inputs(), |_| {})
        .await
        .unwrap();

    assert_eq!(result.citations.len(), 1);
    assert_eq!(result.citations[0].title, "Kept");
}

#[tokio::test]
async fn test_mid_stream_failure_discards_partial_result() {
    let runner = AnalysisRunner::new(FakeModel::with_chunks(vec![
        text("A"),
        Err(GenAiError::Network("connection reset".to_string())),
        text("never reached"),
    ]));

    let mut progress: Vec<String> = Vec::new();
    let err = runner
        .run(AnalysisModule::LocalSeo, &local_seo_inputs(), |t| {
            progress.push(t.to_string())
        })
        .await
        .unwrap_err();

    // Accumulated transcript is not returned; only the fixed message is.
    assert_eq!(
        err.to_string(),
        "Failed to generate analysis. Please try again."
    );
    assert_eq!(progress, vec!["A".to_string()]);
}

#[tokio::test]
async fn test_open_failure_maps_to_generation_error() {
    let runner = AnalysisRunner::new(FakeModel::failing_open());

    let err = runner
        .run(AnalysisModule::LocalSeo, &local_seo_inputs(), |_| {})
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Failed to generate analysis. Please try again."
    );
}

#[tokio::test]
async fn test_request_carries_prompt_instruction_and_tools() {
    let fake = FakeModel::with_chunks(vec![text("ok")]);
    let captured = fake.last_request.clone();
    let runner = AnalysisRunner::new(fake);

    runner
        .run(AnalysisModule::LocalSeo, &local_seo_inputs(), |_| {})
        .await
        .unwrap();

    let request = captured.lock().unwrap().clone().unwrap();
    assert_eq!(
        request.prompt,
        "Boost Local SEO for Business: Plumber in City: Austin, TX."
    );
    let instruction = request.instruction.unwrap();
    assert!(instruction.contains("Overview of Analysis"));
    assert!(instruction.contains("Local keywords"));
    assert!(request.google_search);
    assert_eq!(request.thinking_budget, Some(1024));
}

#[tokio::test]
async fn test_thinking_budget_override() {
    let fake = FakeModel::with_chunks(vec![text("ok")]);
    let captured = fake.last_request.clone();
    let runner = AnalysisRunner::new(fake).with_thinking_budget(256);

    runner
        .run(AnalysisModule::LocalSeo, &local_seo_inputs(), |_| {})
        .await
        .unwrap();

    let request = captured.lock().unwrap().clone().unwrap();
    assert_eq!(request.thinking_budget, Some(256));
}

#[tokio::test]
async fn test_runner_accepts_boxed_model() {
    let boxed: Box<dyn GenerativeModel> =
        Box::new(FakeModel::with_chunks(vec![text("hi")]));
    let runner = AnalysisRunner::new(boxed);

    let result = runner
        .run(AnalysisModule::KeywordCluster, &{
            let mut inputs = InputValues::new();
            inputs.insert("topic".to_string(), "Digital Marketing".to_string());
            inputs
        }, |_| {})
        .await
        .unwrap();

    assert_eq!(result.transcript, "hi");
}
