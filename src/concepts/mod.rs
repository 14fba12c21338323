//! Concept curation and allocation.
//!
//! - `normalize`: the deduplication key shared by every stage
//! - `labels`: insertion-ordered, first-writer-wins label sets
//! - `payload`: parsing raw generation responses into batches
//! - `curator`: the retrying curation loop producing a `ConceptPool`
//! - `allocator`: fitting a pool to the counts a board needs

pub mod allocator;
pub mod curator;
pub mod labels;
pub mod normalize;
pub mod payload;
pub mod pool;

pub use allocator::{allocate, Allocation};
pub use curator::{CurationState, Curator, GenerationAttempt};
pub use labels::LabelMap;
pub use normalize::normalize;
pub use payload::ConceptBatch;
pub use pool::{Category, ConceptPool};
