//! Question-answering pipeline: oracles, retrieval, extraction, orchestration.

pub mod extractor;
pub mod oracle;
pub mod respond;
pub mod retriever;

use std::sync::Arc;

use crate::cli::ResponseMode;
use crate::config::Settings;
use crate::data::store::DataStore;
use crate::error::ServiceError;

/// Assemble the full query pipeline from configuration.
///
/// Oracles are constructed once here and handed in by reference; nothing
/// downstream reaches for global model state.
pub fn build_orchestrator(
    settings: &Settings,
    mode: ResponseMode,
) -> Result<respond::Orchestrator, ServiceError> {
    let encoder = oracle::default_embedding_oracle()?;
    let retriever = retriever::ContextRetriever::new(&settings.corpus_path(), encoder)?;
    let span_oracle = oracle::default_span_oracle(settings)?;
    let extractor = extractor::AnswerExtractor::new(span_oracle);
    let store = Arc::new(DataStore::load(&settings.data_dir)?);
    Ok(respond::Orchestrator::new(
        retriever,
        extractor,
        store,
        mode,
        settings.top_k,
    ))
}
