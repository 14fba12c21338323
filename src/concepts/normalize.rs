//! Normalization key for concept labels.
//!
//! Two labels are the same concept when their keys are equal. The key is
//! trimmed, lower-cased, NFKC-canonicalized, and has every run of
//! whitespace collapsed to a single space. Canonically equivalent strings
//! (full-width vs. ASCII letters, ligatures, composed vs. decomposed
//! accents) therefore collide.

use unicode_normalization::UnicodeNormalization;

/// Compute the deduplication key of a label.
#[must_use]
pub fn normalize(label: &str) -> String {
    let folded: String = label.trim().to_lowercase().nfkc().collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}
