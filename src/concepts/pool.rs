//! Curated concept pool and the two concept categories.

use serde::{Deserialize, Serialize};

use super::labels::LabelMap;
use super::normalize::normalize;

/// Which side of the board a concept belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Belongs to the theme; safe to reveal.
    Related,
    /// Looks plausible but does not belong; placed as a mine.
    Confusing,
}

impl Category {
    /// The other category.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Category::Related => Category::Confusing,
            Category::Confusing => Category::Related,
        }
    }

    /// Lower-case name used in placeholder labels and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Category::Related => "related",
            Category::Confusing => "confusing",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Two disjoint label lists produced by curation.
///
/// Each list is unique under [`normalize`] and no key appears in both.
/// Constructed by the curator; the allocator only reads it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConceptPool {
    related: Vec<String>,
    confusing: Vec<String>,
}

impl ConceptPool {
    /// Build a pool from raw lists, enforcing the pool invariants.
    ///
    /// Duplicates within a list keep their first spelling. A confusing label
    /// whose key already appears among the related labels is dropped.
    pub fn new<R, C, S>(related: R, confusing: C) -> Self
    where
        R: IntoIterator<Item = S>,
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let related = LabelMap::from_labels(related);
        let mut kept = LabelMap::new();
        for label in confusing {
            let key = normalize(label.as_ref());
            if !related.contains_key(&key) {
                kept.insert_keyed(key, label.as_ref());
            }
        }
        Self::from_parts(related.into_vec(), kept.into_vec())
    }

    pub(crate) fn from_parts(related: Vec<String>, confusing: Vec<String>) -> Self {
        Self { related, confusing }
    }

    #[must_use]
    pub fn related(&self) -> &[String] {
        &self.related
    }

    #[must_use]
    pub fn confusing(&self) -> &[String] {
        &self.confusing
    }

    /// Labels of one category.
    #[must_use]
    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::Related => &self.related,
            Category::Confusing => &self.confusing,
        }
    }

    /// Does any normalized key appear in both categories?
    #[must_use]
    pub fn has_overlap(&self) -> bool {
        let related: rustc_hash::FxHashSet<String> = self.related.iter().map(|s| normalize(s)).collect();
        self.confusing.iter().any(|s| related.contains(&normalize(s)))
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.related, self.confusing)
    }
}
