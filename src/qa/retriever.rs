//! Semantic retrieval over the static question/answer corpus.

use std::cmp::Ordering;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::data::corpus::{self, QaPair};
use crate::error::ServiceError;
use crate::qa::oracle::EmbeddingOracle;

/// Segments shorter than this (after trimming) carry no answerable content.
const MIN_SENTENCE_LEN: usize = 20;
/// Boilerplate marker excluded from candidate sentences.
const SKIP_MARKER: &str = "key point";

/// Retrieval index over the corpus questions.
///
/// `pairs` and `embeddings` are parallel arrays built together at
/// construction; index `i` in one always corresponds to index `i` in the
/// other.
pub struct ContextRetriever {
    pairs: Vec<QaPair>,
    embeddings: Vec<Vec<f32>>,
    encoder: Arc<dyn EmbeddingOracle>,
}

impl ContextRetriever {
    /// Load the corpus and embed every question. A missing or malformed
    /// corpus is fatal here; retrieval cannot operate without its index.
    pub fn new(corpus_path: &Path, encoder: Arc<dyn EmbeddingOracle>) -> Result<Self, ServiceError> {
        let pairs = corpus::load_corpus(corpus_path)?;
        if pairs.is_empty() {
            warn!(path = %corpus_path.display(), "corpus is empty; retrieval will yield no passages");
        }
        let questions: Vec<&str> = pairs.iter().map(|p| p.question.as_str()).collect();
        let embeddings = encoder.encode(&questions)?;
        if embeddings.len() != pairs.len() {
            return Err(ServiceError::data_load(
                corpus_path.display(),
                format!(
                    "encoder returned {} vectors for {} questions",
                    embeddings.len(),
                    pairs.len()
                ),
            ));
        }
        info!(pairs = pairs.len(), "built retrieval index");
        Ok(Self {
            pairs,
            embeddings,
            encoder,
        })
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Corpus question at `index`, if in range.
    pub fn question(&self, index: usize) -> Option<&str> {
        self.pairs.get(index).map(|p| p.question.as_str())
    }

    /// Corpus answer at `index`, if in range.
    pub fn answer(&self, index: usize) -> Option<&str> {
        self.pairs.get(index).map(|p| p.answer.as_str())
    }

    /// Return the answers of the `top_k` most similar corpus questions,
    /// highest similarity first, ties broken by original corpus order.
    pub fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<String>, ServiceError> {
        if self.pairs.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }
        let query_embedding = self
            .encoder
            .encode(&[query])?
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::Oracle("encoder returned no query vector".into()))?;

        let scores: Vec<f32> = self
            .embeddings
            .iter()
            .map(|e| cosine(&query_embedding, e))
            .collect();
        let mut indices: Vec<usize> = (0..scores.len()).collect();
        indices.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(Ordering::Equal)
                .then(a.cmp(&b))
        });
        indices.truncate(top_k);
        debug!(?indices, "retrieval candidates");

        Ok(indices
            .into_iter()
            .map(|i| self.pairs[i].answer.clone())
            .collect())
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot = a.iter().zip(b).map(|(x, y)| x * y).sum::<f32>();
    let norm_a = a.iter().map(|v| v * v).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Split a passage into candidate sentences for the answer extractor.
///
/// Newline runs are flattened first; fragments of 20 characters or fewer
/// and boilerplate starting with "key point" are dropped.
pub fn segment_sentences(passage: &str) -> Vec<String> {
    static NEWLINE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").expect("valid regex"));
    let flattened = NEWLINE_RUNS.replace_all(passage, " ");

    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = flattened.chars().peekable();
    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().map_or(true, |n| n.is_whitespace()) {
            push_sentence(&mut sentences, &mut current);
        }
    }
    push_sentence(&mut sentences, &mut current);
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if trimmed.len() > MIN_SENTENCE_LEN && !trimmed.to_lowercase().starts_with(SKIP_MARKER) {
        sentences.push(trimmed.to_string());
    }
    current.clear();
}
