use std::path::PathBuf;
use std::sync::Arc;

use onco_assistant::cli::ResponseMode;
use onco_assistant::data::store::DataStore;
use onco_assistant::error::ServiceError;
use onco_assistant::qa::extractor::AnswerExtractor;
use onco_assistant::qa::oracle::{
    HashedBowEncoder, LexicalSpanOracle, SpanOracle, SpanScores,
};
use onco_assistant::qa::respond::{Orchestrator, DISCLAIMERS, NO_ANSWER_FALLBACK};
use onco_assistant::qa::retriever::ContextRetriever;
use tempfile::TempDir;

/// Span oracle that can never ground an answer.
struct NoAnswerOracle;

impl SpanOracle for NoAnswerOracle {
    fn score(&self, _question: &str, _context: &str) -> Result<SpanScores, ServiceError> {
        Ok(SpanScores {
            tokens: vec!["[CLS]".to_string(), "[SEP]".to_string()],
            start: vec![1.0, -1.0],
            end: vec![1.0, -1.0],
        })
    }
}

fn write_corpus(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("corpus.json");
    let records = serde_json::json!([
        {
            "question": "What are common side effects of chemotherapy?",
            "answer": "Common side effects of chemotherapy include fatigue, nausea, hair loss, and low blood counts. Severity varies with the specific drugs used in each cycle."
        },
        {
            "question": "How does radiation therapy work?",
            "answer": "Radiation therapy uses precisely aimed high-energy rays to damage cancer cells so they stop dividing over the following weeks."
        }
    ]);
    std::fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();
    path
}

fn orchestrator(dir: &TempDir, mode: ResponseMode, oracle: Arc<dyn SpanOracle>) -> Orchestrator {
    let corpus = write_corpus(dir);
    let retriever = ContextRetriever::new(&corpus, Arc::new(HashedBowEncoder::new(256))).unwrap();
    let extractor = AnswerExtractor::new(oracle);
    let store = Arc::new(DataStore::load(&dir.path().join("data")).unwrap());
    Orchestrator::new(retriever, extractor, store, mode, 2)
}

#[test]
fn empty_queries_are_rejected_before_retrieval() {
    let dir = TempDir::new().unwrap();
    let orchestrator = orchestrator(&dir, ResponseMode::Extractive, Arc::new(LexicalSpanOracle));
    assert!(matches!(
        orchestrator.answer_query(""),
        Err(ServiceError::EmptyQuery)
    ));
    assert!(matches!(
        orchestrator.answer_query("   "),
        Err(ServiceError::EmptyQuery)
    ));
}

#[test]
fn breast_cancer_stage_query_uses_shortcut() {
    let dir = TempDir::new().unwrap();
    let orchestrator = orchestrator(&dir, ResponseMode::Extractive, Arc::new(LexicalSpanOracle));
    let outcome = orchestrator
        .answer_query("What are treatment options for breast cancer stage 2?")
        .unwrap();
    assert_eq!(outcome.intent, "treatment_options");
    assert_eq!(
        outcome.text,
        "Treatment for stage 2 breast cancer typically includes surgery, chemotherapy, radiation therapy, and hormone therapy depending on receptor status."
    );
    // Shortcut answers carry no disclaimer and no entities.
    assert!(!outcome.text.contains("⚠️"));
    assert!(outcome.entities.is_empty());
}

#[test]
fn extractive_answer_passes_quality_gates() {
    let dir = TempDir::new().unwrap();
    let orchestrator = orchestrator(&dir, ResponseMode::Extractive, Arc::new(LexicalSpanOracle));
    let outcome = orchestrator
        .answer_query("Which drugs cause nausea and fatigue during cycles?")
        .unwrap();
    assert!(outcome.text.to_lowercase().contains("nausea"));
    assert_eq!(outcome.text.matches("⚠️").count(), 1);
    assert!(outcome.tokens.is_some());
    assert!(outcome.related_data.is_none());
}

#[test]
fn exhausted_extraction_falls_back_with_one_disclaimer() {
    let dir = TempDir::new().unwrap();
    let orchestrator = orchestrator(&dir, ResponseMode::Extractive, Arc::new(NoAnswerOracle));
    let outcome = orchestrator
        .answer_query("Tell me about proton beam centers")
        .unwrap();
    assert!(outcome.text.starts_with(NO_ANSWER_FALLBACK));
    assert_eq!(outcome.text.matches("⚠️").count(), 1);
    assert!(DISCLAIMERS.iter().any(|d| outcome.text.ends_with(d)));
}

#[test]
fn gibberish_query_yields_fallback() {
    let dir = TempDir::new().unwrap();
    let orchestrator = orchestrator(&dir, ResponseMode::Extractive, Arc::new(LexicalSpanOracle));
    let outcome = orchestrator
        .answer_query("asdkjasdkj random gibberish")
        .unwrap();
    assert!(outcome.text.starts_with(NO_ANSWER_FALLBACK));
    assert!(outcome.entities.is_empty());
}

#[test]
fn templated_mode_collects_related_data() {
    let dir = TempDir::new().unwrap();
    let orchestrator = orchestrator(&dir, ResponseMode::Templated, Arc::new(LexicalSpanOracle));
    let outcome = orchestrator
        .answer_query("What are treatment options for lung cancer?")
        .unwrap();
    assert_eq!(outcome.intent, "treatment_info");
    assert!(outcome.text.contains("Lung Cancer"));
    assert_eq!(outcome.text.matches("⚠️").count(), 1);
    assert!(outcome.tokens.is_none());

    let related = outcome.related_data.expect("related data populated");
    assert!(related.cancer_info.is_some());
    assert!(!related.treatments.is_empty());
}
