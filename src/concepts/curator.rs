//! Concept curation: turning noisy generation batches into a `ConceptPool`.
//!
//! ## Algorithm
//!
//! 1. Keep one [`LabelMap`] per category (normalized key -> first spelling).
//! 2. For each attempt up to `max_attempts`, check the credential, then ask
//!    the generator for a batch. From the second attempt on, everything
//!    accumulated so far is sent as an avoid-list.
//! 3. Parse and validate the response ([`ConceptBatch::parse`]): blank and
//!    non-string entries are dropped, each list is deduplicated in-batch.
//! 4. Merge with cross-category exclusivity: a label is accepted only if its
//!    key is in neither map. Related labels of a batch merge before its
//!    confusing labels, so a key present in both lists of one batch lands
//!    in `related`.
//! 5. Stop as soon as both quotas are met.
//! 6. On success, shuffle each category independently.
//!
//! Fatal generation errors abort immediately. Retryable errors and invalid
//! batches spend the attempt and curation moves on.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::labels::LabelMap;
use super::normalize::normalize;
use super::payload::ConceptBatch;
use super::pool::{Category, ConceptPool};
use crate::core::{CurationConfig, GameRng};
use crate::credentials::CredentialStore;
use crate::error::{AttemptError, CurationError};
use crate::generation::{AvoidList, ConceptGenerator, GenerationRequest};

/// Running state of one curation: the two accumulating label maps.
#[derive(Clone, Debug, Default)]
pub struct CurationState {
    related: LabelMap,
    confusing: LabelMap,
}

impl CurationState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn related(&self) -> &LabelMap {
        &self.related
    }

    #[must_use]
    pub fn confusing(&self) -> &LabelMap {
        &self.confusing
    }

    /// Merge a validated batch. Returns how many labels were accepted per
    /// category as `(related, confusing)`.
    pub fn merge(&mut self, batch: &ConceptBatch) -> (usize, usize) {
        let related = self.merge_into(Category::Related, &batch.related);
        let confusing = self.merge_into(Category::Confusing, &batch.confusing);
        (related, confusing)
    }

    fn merge_into(&mut self, category: Category, labels: &[String]) -> usize {
        let mut accepted = 0;
        for label in labels {
            let key = normalize(label);
            if self.map(category.opposite()).contains_key(&key) {
                continue;
            }
            if self.map_mut(category).insert_keyed(key, label) {
                accepted += 1;
            }
        }
        accepted
    }

    fn map(&self, category: Category) -> &LabelMap {
        match category {
            Category::Related => &self.related,
            Category::Confusing => &self.confusing,
        }
    }

    fn map_mut(&mut self, category: Category) -> &mut LabelMap {
        match category {
            Category::Related => &mut self.related,
            Category::Confusing => &mut self.confusing,
        }
    }

    /// Current `(related, confusing)` sizes.
    #[must_use]
    pub fn sizes(&self) -> (usize, usize) {
        (self.related.len(), self.confusing.len())
    }

    /// Everything accumulated so far, for the next request's avoid-list.
    #[must_use]
    pub fn avoid_list(&self) -> AvoidList {
        AvoidList {
            related: self.related.as_slice().to_vec(),
            confusing: self.confusing.as_slice().to_vec(),
        }
    }

    /// Finish: insertion-ordered lists, each independently shuffled.
    #[must_use]
    pub fn into_pool(self, rng: &mut GameRng) -> ConceptPool {
        let mut related = self.related.into_vec();
        let mut confusing = self.confusing.into_vec();
        rng.shuffle(&mut related);
        rng.shuffle(&mut confusing);
        ConceptPool::from_parts(related, confusing)
    }
}

/// One generation round-trip, as seen by the curation loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationAttempt {
    /// 1-based attempt ordinal.
    pub index: u32,
    /// The validated batch, or why the attempt contributed nothing.
    pub outcome: Result<ConceptBatch, AttemptError>,
    /// Running related size after merging.
    pub related_total: usize,
    /// Running confusing size after merging.
    pub confusing_total: usize,
}

/// Drives the generator until quotas are met or the budget is spent.
pub struct Curator<G> {
    generator: G,
    credentials: Arc<dyn CredentialStore>,
    rng: GameRng,
    attempts: Vec<GenerationAttempt>,
}

impl<G: ConceptGenerator> Curator<G> {
    pub fn new(generator: G, credentials: Arc<dyn CredentialStore>, rng: GameRng) -> Self {
        Self {
            generator,
            credentials,
            rng,
            attempts: Vec::new(),
        }
    }

    #[must_use]
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Attempts made by the most recent `curate` call.
    #[must_use]
    pub fn attempts(&self) -> &[GenerationAttempt] {
        &self.attempts
    }

    /// Curate a concept pool for `theme`.
    ///
    /// Fails with [`CurationError::MissingCredential`] or
    /// [`CurationError::Fatal`] without spending further attempts, or with
    /// [`CurationError::Exhausted`] once `config.max_attempts` round-trips
    /// have not met both quotas.
    pub async fn curate(
        &mut self,
        theme: &str,
        language: &str,
        config: &CurationConfig,
    ) -> Result<ConceptPool, CurationError> {
        self.attempts.clear();
        let mut state = CurationState::new();
        let mut last_error: Option<AttemptError> = None;

        for attempt in 1..=config.max_attempts {
            let Some(credential) = self.credentials.get() else {
                warn!(attempt, "no credential available, aborting curation");
                return Err(CurationError::MissingCredential);
            };

            info!(attempt, theme, language, "requesting concepts");
            let avoid = (attempt > 1).then(|| state.avoid_list()).filter(|a| !a.is_empty());
            let request = GenerationRequest {
                theme,
                language,
                attempt,
                credential: &credential,
                avoid,
            };

            let outcome = match self.generator.generate(&request).await {
                Ok(text) => ConceptBatch::parse(&text).map_err(AttemptError::from),
                Err(err) if err.is_fatal() => {
                    warn!(attempt, error = %err, "fatal generation error");
                    return Err(CurationError::Fatal { attempt, cause: err });
                }
                Err(err) => Err(AttemptError::from(err)),
            };

            match &outcome {
                Ok(batch) => {
                    let (new_related, new_confusing) = state.merge(batch);
                    debug!(
                        attempt,
                        batch_related = batch.related.len(),
                        batch_confusing = batch.confusing.len(),
                        new_related,
                        new_confusing,
                        "merged batch"
                    );
                }
                Err(err) => {
                    warn!(attempt, error = %err, "attempt failed");
                    last_error = Some(err.clone());
                }
            }

            let (related, confusing) = state.sizes();
            info!(attempt, related, confusing, "running totals");
            self.attempts.push(GenerationAttempt {
                index: attempt,
                outcome,
                related_total: related,
                confusing_total: confusing,
            });

            if config.is_satisfied(related, confusing) {
                info!(attempts = attempt, related, confusing, "curation complete");
                return Ok(state.into_pool(&mut self.rng));
            }
        }

        let (related, confusing) = state.sizes();
        warn!(attempts = config.max_attempts, related, confusing, "curation exhausted");
        Err(CurationError::Exhausted {
            attempts: config.max_attempts,
            related,
            confusing,
            last_error,
        })
    }
}
