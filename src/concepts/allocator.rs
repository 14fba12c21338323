//! Fitting a curated pool to the exact counts a board needs.
//!
//! Each category is handled independently:
//!
//! | pool size `m` vs target `n` | output                                   |
//! |-----------------------------|------------------------------------------|
//! | `m >= n`                    | first `n` of a shuffled copy             |
//! | `0 < m < n`                 | shuffled copy repeated: `out[i] = s[i % m]` |
//! | `m == 0`                    | `"<category> placeholder <i+1>"`         |
//!
//! No deduplication happens here; the pool is already disjoint.

use tracing::debug;

use super::pool::{Category, ConceptPool};
use crate::core::GameRng;

/// Labels sized for one board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Allocation {
    pub related: Vec<String>,
    pub confusing: Vec<String>,
}

/// Fit both categories of `pool` to the requested counts.
pub fn allocate(pool: &ConceptPool, related_count: usize, confusing_count: usize, rng: &mut GameRng) -> Allocation {
    let related = fit(pool.related(), related_count, Category::Related, rng);
    let confusing = fit(pool.confusing(), confusing_count, Category::Confusing, rng);
    debug!(
        pool_related = pool.related().len(),
        pool_confusing = pool.confusing().len(),
        related = related.len(),
        confusing = confusing.len(),
        "allocated concepts"
    );
    Allocation { related, confusing }
}

/// Shuffle once, then truncate or cycle to exactly `target` labels.
pub fn fit(labels: &[String], target: usize, category: Category, rng: &mut GameRng) -> Vec<String> {
    if labels.is_empty() {
        return placeholders(category, target);
    }
    let mut shuffled = rng.shuffled(labels);
    if shuffled.len() >= target {
        shuffled.truncate(target);
        shuffled
    } else {
        cycle(&shuffled, target, category)
    }
}

/// Repeat `labels` in order until exactly `target` exist.
///
/// Every label appears `target / len` times and the first `target % len`
/// labels once more. Falls back to placeholders when `labels` is empty.
#[must_use]
pub fn cycle(labels: &[String], target: usize, category: Category) -> Vec<String> {
    if labels.is_empty() {
        return placeholders(category, target);
    }
    labels.iter().cycle().take(target).cloned().collect()
}

/// Deterministic stand-in labels for an empty category.
#[must_use]
pub fn placeholders(category: Category, target: usize) -> Vec<String> {
    (0..target).map(|i| placeholder(category, i)).collect()
}

#[must_use]
pub fn placeholder(category: Category, index: usize) -> String {
    format!("{} placeholder {}", category, index + 1)
}
