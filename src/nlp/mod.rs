//! Query preprocessing: normalization, entity extraction, and rule shortcuts.

pub mod entities;
pub mod normalize;
pub mod rules;

use serde::Serialize;

use self::entities::{extract_entities, Entities};
use self::normalize::{normalize, Language};

/// Per-query preprocessing result; immutable after construction and
/// discarded when the request completes.
#[derive(Debug, Clone, Serialize)]
pub struct QueryEnvelope {
    pub original_text: String,
    pub detected_language: Language,
    pub normalized_text: String,
    pub tokens: Vec<String>,
    pub entities: Entities,
}

/// Run the full preprocessing pipeline over one raw query.
pub fn preprocess(text: &str) -> QueryEnvelope {
    let normalized = normalize(text);
    let entities = extract_entities(text);
    QueryEnvelope {
        original_text: text.to_string(),
        detected_language: normalized.language,
        normalized_text: normalized.cleaned_text,
        tokens: normalized.tokens,
        entities,
    }
}
