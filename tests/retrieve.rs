use std::path::PathBuf;
use std::sync::Arc;

use onco_assistant::qa::oracle::HashedBowEncoder;
use onco_assistant::qa::retriever::{segment_sentences, ContextRetriever};
use tempfile::TempDir;

fn write_corpus(dir: &TempDir, pairs: &[(&str, &str)]) -> PathBuf {
    let path = dir.path().join("corpus.json");
    let records: Vec<serde_json::Value> = pairs
        .iter()
        .map(|(q, a)| serde_json::json!({"question": q, "answer": a}))
        .collect();
    std::fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();
    path
}

#[test]
fn retrieval_maps_back_to_parallel_answers() {
    let dir = TempDir::new().unwrap();
    let path = write_corpus(
        &dir,
        &[
            (
                "What are common side effects of chemotherapy?",
                "Answer about chemotherapy side effects.",
            ),
            (
                "How does radiation therapy work?",
                "Answer about radiation mechanism.",
            ),
        ],
    );
    let retriever = ContextRetriever::new(&path, Arc::new(HashedBowEncoder::new(256))).unwrap();
    assert_eq!(retriever.len(), 2);
    assert_eq!(
        retriever.question(0),
        Some("What are common side effects of chemotherapy?")
    );
    assert_eq!(
        retriever.answer(0),
        Some("Answer about chemotherapy side effects.")
    );

    let passages = retriever
        .retrieve("common side effects of chemotherapy", 1)
        .unwrap();
    assert_eq!(
        passages,
        vec!["Answer about chemotherapy side effects.".to_string()]
    );
}

#[test]
fn top_k_is_bounded_by_corpus_size() {
    let dir = TempDir::new().unwrap();
    let path = write_corpus(
        &dir,
        &[
            ("first question about cancer", "first answer"),
            ("second question about cancer", "second answer"),
        ],
    );
    let retriever = ContextRetriever::new(&path, Arc::new(HashedBowEncoder::new(128))).unwrap();
    let passages = retriever.retrieve("question about cancer", 5).unwrap();
    assert_eq!(passages.len(), 2);
}

#[test]
fn missing_corpus_is_fatal_at_construction() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.json");
    assert!(ContextRetriever::new(&missing, Arc::new(HashedBowEncoder::new(64))).is_err());
}

#[test]
fn malformed_corpus_is_fatal_at_construction() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{not json").unwrap();
    assert!(ContextRetriever::new(&path, Arc::new(HashedBowEncoder::new(64))).is_err());
}

#[test]
fn empty_corpus_yields_no_passages() {
    let dir = TempDir::new().unwrap();
    let path = write_corpus(&dir, &[]);
    let retriever = ContextRetriever::new(&path, Arc::new(HashedBowEncoder::new(64))).unwrap();
    assert!(retriever.is_empty());
    assert!(retriever.retrieve("anything", 1).unwrap().is_empty());
}

#[test]
fn segmentation_drops_short_and_marker_fragments() {
    let passage = "Key point: stay hydrated. Short one. Radiation therapy uses high-energy rays to damage cancer cells.\nIt spares healthy tissue when planned carefully by specialists.";
    let sentences = segment_sentences(passage);
    assert_eq!(sentences.len(), 2);
    assert!(sentences[0].starts_with("Radiation therapy"));
    assert!(sentences[1].starts_with("It spares healthy tissue"));
}

#[test]
fn segmentation_flattens_newline_runs() {
    let passage = "A sentence split across\n\nseveral lines that is long enough to keep.";
    let sentences = segment_sentences(passage);
    assert_eq!(sentences.len(), 1);
    assert!(!sentences[0].contains('\n'));
}
