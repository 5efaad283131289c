//! Extractive answer selection over span-oracle scores.

use std::sync::Arc;

use tracing::debug;

use crate::error::ServiceError;
use crate::qa::oracle::SpanOracle;

/// Fixed sentinel for spans the oracle could not ground in the context.
pub const NO_ANSWER_SENTINEL: &str = "No clear answer found in the given context.";

/// Wraps a span-extraction oracle and decodes its best span into text.
pub struct AnswerExtractor {
    oracle: Arc<dyn SpanOracle>,
}

impl AnswerExtractor {
    pub fn new(oracle: Arc<dyn SpanOracle>) -> Self {
        Self { oracle }
    }

    /// Locate the best answer span for `question` within `context`.
    ///
    /// The span runs from the start-score argmax to the end-score argmax
    /// inclusive. An inverted span (end before start) is treated as
    /// no-answer rather than sliced; so are empty decodes and decodes
    /// containing a reserved boundary marker.
    pub fn extract_answer(&self, question: &str, context: &str) -> Result<String, ServiceError> {
        let scores = self.oracle.score(question, context)?;
        if scores.tokens.is_empty()
            || scores.start.len() != scores.tokens.len()
            || scores.end.len() != scores.tokens.len()
        {
            return Err(ServiceError::Oracle(format!(
                "span oracle returned {} tokens with {}/{} scores",
                scores.tokens.len(),
                scores.start.len(),
                scores.end.len()
            )));
        }

        let start = argmax(&scores.start);
        let end = argmax(&scores.end);
        if end < start || start >= scores.tokens.len() {
            debug!(start, end, "inverted or out-of-range span");
            return Ok(NO_ANSWER_SENTINEL.to_string());
        }
        let end = end.min(scores.tokens.len() - 1);

        let answer = detokenize(&scores.tokens[start..=end]);
        if answer.trim().is_empty() || answer.contains("[CLS]") || answer.contains("[SEP]") {
            return Ok(NO_ANSWER_SENTINEL.to_string());
        }
        Ok(answer)
    }
}

/// Index of the highest score; the earliest wins ties.
fn argmax(scores: &[f32]) -> usize {
    let mut best = 0;
    for (idx, value) in scores.iter().enumerate() {
        if *value > scores[best] {
            best = idx;
        }
    }
    best
}

/// Join tokens back into text, merging WordPiece continuations.
pub fn detokenize(tokens: &[String]) -> String {
    let mut out = String::new();
    for token in tokens {
        if let Some(rest) = token.strip_prefix("##") {
            out.push_str(rest);
        } else {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(token);
        }
    }
    out.trim().to_string()
}
