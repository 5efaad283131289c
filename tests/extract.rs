use std::sync::Arc;

use onco_assistant::error::ServiceError;
use onco_assistant::qa::extractor::{detokenize, AnswerExtractor, NO_ANSWER_SENTINEL};
use onco_assistant::qa::oracle::{LexicalSpanOracle, SpanOracle, SpanScores};

struct FixedScores {
    tokens: Vec<&'static str>,
    start: Vec<f32>,
    end: Vec<f32>,
}

impl SpanOracle for FixedScores {
    fn score(&self, _question: &str, _context: &str) -> Result<SpanScores, ServiceError> {
        Ok(SpanScores {
            tokens: self.tokens.iter().map(|t| t.to_string()).collect(),
            start: self.start.clone(),
            end: self.end.clone(),
        })
    }
}

fn extractor(oracle: FixedScores) -> AnswerExtractor {
    AnswerExtractor::new(Arc::new(oracle))
}

#[test]
fn inverted_span_is_no_answer() {
    let oracle = FixedScores {
        tokens: vec!["a", "b", "c"],
        start: vec![0.0, 0.0, 1.0],
        end: vec![1.0, 0.0, 0.0],
    };
    let answer = extractor(oracle).extract_answer("q", "ctx").unwrap();
    assert_eq!(answer, NO_ANSWER_SENTINEL);
}

#[test]
fn boundary_marker_span_is_no_answer() {
    let oracle = FixedScores {
        tokens: vec!["[CLS]", "word"],
        start: vec![1.0, 0.0],
        end: vec![1.0, 0.0],
    };
    let answer = extractor(oracle).extract_answer("q", "ctx").unwrap();
    assert_eq!(answer, NO_ANSWER_SENTINEL);
}

#[test]
fn mismatched_score_lengths_are_an_oracle_error() {
    let oracle = FixedScores {
        tokens: vec!["a", "b"],
        start: vec![1.0],
        end: vec![0.0, 1.0],
    };
    assert!(matches!(
        extractor(oracle).extract_answer("q", "ctx"),
        Err(ServiceError::Oracle(_))
    ));
}

#[test]
fn wordpiece_continuations_merge() {
    let oracle = FixedScores {
        tokens: vec!["immuno", "##therapy", "boosts", "defenses"],
        start: vec![1.0, 0.0, 0.0, 0.0],
        end: vec![0.0, 0.0, 0.0, 1.0],
    };
    let answer = extractor(oracle).extract_answer("q", "ctx").unwrap();
    assert_eq!(answer, "immunotherapy boosts defenses");
}

#[test]
fn detokenize_trims_and_joins() {
    let tokens: Vec<String> = ["radiation", "therapy"].iter().map(|t| t.to_string()).collect();
    assert_eq!(detokenize(&tokens), "radiation therapy");
}

#[test]
fn lexical_oracle_finds_overlap_span() {
    let extractor = AnswerExtractor::new(Arc::new(LexicalSpanOracle));
    let answer = extractor
        .extract_answer(
            "What are side effects of chemotherapy?",
            "Common side effects of chemotherapy include fatigue and nausea.",
        )
        .unwrap();
    assert!(answer.to_lowercase().contains("chemotherapy"));
}

#[test]
fn lexical_oracle_reports_no_answer_without_overlap() {
    let extractor = AnswerExtractor::new(Arc::new(LexicalSpanOracle));
    let answer = extractor
        .extract_answer(
            "asdkjasdkj gibberish",
            "Radiation therapy uses high-energy rays to treat tumors.",
        )
        .unwrap();
    assert_eq!(answer, NO_ANSWER_SENTINEL);
}
