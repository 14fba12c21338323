//! Generation collaborator contract.
//!
//! A `ConceptGenerator` turns a theme into raw response text that should
//! contain a `{"relatedConcepts": [...], "confusingConcepts": [...]}`
//! object. Parsing and validation happen on the curator side, so a
//! generator only reports transport-level outcomes:
//!
//! - `Ok(text)`: a response arrived (it may still be malformed)
//! - `Err(GenerationError::Retryable)`: transient failure, costs one attempt
//! - `Err(GenerationError::Fatal)`: credential missing or rejected, aborts

use std::future::Future;

use serde::Serialize;

use crate::error::GenerationError;

#[cfg(feature = "openrouter")]
pub mod openrouter;

#[cfg(feature = "openrouter")]
pub use openrouter::{OpenRouterConfig, OpenRouterGenerator};

/// Labels the generator should not repeat.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AvoidList {
    pub related: Vec<String>,
    pub confusing: Vec<String>,
}

impl AvoidList {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.related.is_empty() && self.confusing.is_empty()
    }
}

/// One request to the generation collaborator.
#[derive(Clone, Debug)]
pub struct GenerationRequest<'a> {
    pub theme: &'a str,
    /// Language code the labels should be written in, e.g. `"en"` or `"zh"`.
    pub language: &'a str,
    /// 1-based attempt ordinal.
    pub attempt: u32,
    /// Opaque API credential from the credential store.
    pub credential: &'a str,
    /// Labels accumulated by earlier attempts. `None` on the first attempt.
    pub avoid: Option<AvoidList>,
}

/// Source of concept batches.
pub trait ConceptGenerator {
    /// Request one batch. Resolves to the raw response text.
    fn generate(&self, request: &GenerationRequest<'_>) -> impl Future<Output = Result<String, GenerationError>>;
}

impl<G: ConceptGenerator> ConceptGenerator for &G {
    fn generate(&self, request: &GenerationRequest<'_>) -> impl Future<Output = Result<String, GenerationError>> {
        (**self).generate(request)
    }
}

/// Generator that answers every request with the same fixed lists.
///
/// Useful for offline play and demos: a pre-curated theme without any
/// network round-trip.
#[derive(Clone, Debug, Default)]
pub struct StaticGenerator {
    related: Vec<String>,
    confusing: Vec<String>,
}

impl StaticGenerator {
    pub fn new<I, J, S>(related: I, confusing: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            related: related.into_iter().map(Into::into).collect(),
            confusing: confusing.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConceptPayload<'a> {
    related_concepts: &'a [String],
    confusing_concepts: &'a [String],
}

impl ConceptGenerator for StaticGenerator {
    async fn generate(&self, _request: &GenerationRequest<'_>) -> Result<String, GenerationError> {
        let payload = ConceptPayload {
            related_concepts: &self.related,
            confusing_concepts: &self.confusing,
        };
        serde_json::to_string(&payload).map_err(|e| GenerationError::retryable(e.to_string()))
    }
}
