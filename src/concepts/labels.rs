//! Insertion-ordered label set keyed by normalization key.
//!
//! `LabelMap` maps a normalized key to the first original spelling seen for
//! it. Later inserts with the same key are ignored (first writer wins), and
//! iteration always follows first-insertion order.

use rustc_hash::FxHashMap;

use super::normalize::normalize;

/// Ordered mapping from normalized key to original-cased label.
#[derive(Clone, Debug, Default)]
pub struct LabelMap {
    labels: Vec<String>,
    index: FxHashMap<String, usize>,
}

impl LabelMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from labels, keeping the first spelling of each key.
    ///
    /// Blank labels are skipped.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self::new();
        for label in labels {
            map.insert(label.as_ref());
        }
        map
    }

    /// Insert a label. Returns `false` if it is blank or its key is present.
    pub fn insert(&mut self, label: &str) -> bool {
        let key = normalize(label);
        self.insert_keyed(key, label)
    }

    /// Insert a label under a precomputed key.
    pub(crate) fn insert_keyed(&mut self, key: String, label: &str) -> bool {
        let trimmed = label.trim();
        if key.is_empty() || trimmed.is_empty() || self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.labels.len());
        self.labels.push(trimmed.to_string());
        true
    }

    /// Is a label with this normalized key present?
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Is a label equivalent to `label` present?
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.contains_key(&normalize(label))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Labels in first-insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.labels
    }
}
