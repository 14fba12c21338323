//! Parsing generation responses into label batches.
//!
//! Responses are expected to carry a JSON object of the form
//!
//! ```json
//! { "relatedConcepts": ["..."], "confusingConcepts": ["..."] }
//! ```
//!
//! but may be wrapped in Markdown fences or surrounded by prose. Parsing
//! first tries the whole (unfenced) text, then scans for top-level objects
//! left to right and takes the first one that has both lists.
//!
//! The scan never looks inside a value it has already consumed: after a
//! parsed object it resumes at the object's end, after a syntax error at
//! the error position, and an unterminated value ends the scan. A batch
//! nested under another key (`{"data": {"relatedConcepts": ...}}`) is
//! therefore rejected, and each byte is parsed at most once.

use serde_json::{Map, Value};

use super::labels::LabelMap;
use crate::error::ValidationError;

pub const RELATED_FIELD: &str = "relatedConcepts";
pub const CONFUSING_FIELD: &str = "confusingConcepts";

/// One generation batch after validation and in-batch deduplication.
///
/// Labels are trimmed, non-blank, and unique under the normalization key
/// within each list (first spelling kept). The two lists may still overlap.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConceptBatch {
    pub related: Vec<String>,
    pub confusing: Vec<String>,
}

impl ConceptBatch {
    /// Build a batch from raw lists, applying in-batch deduplication.
    pub fn from_lists<I, J, S>(related: I, confusing: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            related: LabelMap::from_labels(related).into_vec(),
            confusing: LabelMap::from_labels(confusing).into_vec(),
        }
    }

    /// Parse a raw response text.
    pub fn parse(content: &str) -> Result<Self, ValidationError> {
        let direct = match serde_json::from_str::<Value>(strip_fences(content)) {
            Ok(value) => Self::from_value(&value),
            Err(err) => Err(err.into()),
        };
        let mut last_error = match direct {
            Ok(batch) => return Ok(batch),
            Err(ValidationError::Json(_)) => None,
            Err(err) => Some(err),
        };

        let mut cursor = 0;
        while let Some(found) = content[cursor..].find('{') {
            let start = cursor + found;
            let rest = &content[start..];
            let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<Value>();
            cursor = match stream.next() {
                Some(Ok(value)) => {
                    match Self::from_value(&value) {
                        Ok(batch) => return Ok(batch),
                        Err(err) => last_error = Some(err),
                    }
                    start + stream.byte_offset()
                }
                Some(Err(err)) if err.is_eof() => break,
                Some(Err(err)) => start + error_offset(rest, &err),
                None => break,
            };
        }

        Err(last_error.unwrap_or(ValidationError::NoObject))
    }

    /// Validate a parsed JSON value.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let object = value.as_object().ok_or(ValidationError::NotAnObject)?;
        let related = string_list(object, RELATED_FIELD)?;
        let confusing = string_list(object, CONFUSING_FIELD)?;
        Ok(Self::from_lists(related, confusing))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.related.is_empty() && self.confusing.is_empty()
    }
}

/// String entries of a list field. Non-string entries are dropped.
fn string_list<'a>(object: &'a Map<String, Value>, field: &'static str) -> Result<Vec<&'a str>, ValidationError> {
    let items = object
        .get(field)
        .and_then(Value::as_array)
        .ok_or(ValidationError::MissingList(field))?;
    Ok(items.iter().filter_map(Value::as_str).collect())
}

/// Byte offset in `text` where `err` was detected. At least 1 and on a
/// char boundary, so the scan always moves forward.
fn error_offset(text: &str, err: &serde_json::Error) -> usize {
    let line_start = match err.line() {
        0 | 1 => 0,
        line => text
            .match_indices('\n')
            .nth(line - 2)
            .map_or(text.len(), |(index, _)| index + 1),
    };
    let mut offset = (line_start + err.column().saturating_sub(1)).clamp(1, text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Remove a leading ```` ```json ```` / ```` ``` ```` fence and a trailing fence.
fn strip_fences(content: &str) -> &str {
    let mut text = content;
    for fence in ["```json\n", "```\n"] {
        if let Some(rest) = text.strip_prefix(fence) {
            text = rest;
            break;
        }
    }
    if let Some(rest) = text.strip_suffix("\n```") {
        text = rest;
    }
    text.trim()
}
