//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use theme_sweeper::{AvoidList, ConceptGenerator, GenerationError, GenerationRequest};

/// What a scripted generator saw for one request.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub attempt: u32,
    pub theme: String,
    pub language: String,
    pub credential: String,
    pub avoid: Option<AvoidList>,
}

/// Generator that replays a fixed script of responses and records requests.
///
/// Once the script runs out every further request fails as retryable.
#[derive(Default)]
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<String, GenerationError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedGenerator {
    pub fn new(script: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl ConceptGenerator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, GenerationError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            attempt: request.attempt,
            theme: request.theme.to_string(),
            language: request.language.to_string(),
            credential: request.credential.to_string(),
            avoid: request.avoid.clone(),
        });
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::retryable("script exhausted")))
    }
}

/// Response text carrying the given lists.
pub fn payload<S: AsRef<str>>(related: &[S], confusing: &[S]) -> String {
    let related: Vec<&str> = related.iter().map(AsRef::as_ref).collect();
    let confusing: Vec<&str> = confusing.iter().map(AsRef::as_ref).collect();
    serde_json::json!({
        "relatedConcepts": related,
        "confusingConcepts": confusing,
    })
    .to_string()
}

/// `count` labels `"{prefix} {start}"`, `"{prefix} {start + 1}"`, ...
pub fn numbered(prefix: &str, start: usize, count: usize) -> Vec<String> {
    (start..start + count).map(|i| format!("{prefix} {i}")).collect()
}
