//! Question/answer corpus backing the retrieval index.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ServiceError;

/// One corpus record. Identity is the position in the loaded sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// Load the whole corpus file. Missing or unparsable files are fatal for
/// the retrieval pipeline; an empty (but valid) corpus is allowed.
pub fn load_corpus(path: &Path) -> Result<Vec<QaPair>, ServiceError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ServiceError::data_load(path.display(), e))?;
    let pairs: Vec<QaPair> =
        serde_json::from_str(&raw).map_err(|e| ServiceError::data_load(path.display(), e))?;
    info!(path = %path.display(), pairs = pairs.len(), "loaded corpus");
    Ok(pairs)
}

/// Write a small starter corpus so a fresh checkout can serve retrieval
/// queries. Existing files are left untouched.
pub fn write_starter_corpus(path: &Path) -> Result<(), ServiceError> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let pairs = starter_pairs();
    let payload = serde_json::to_string_pretty(&pairs)
        .map_err(|e| ServiceError::data_load(path.display(), e))?;
    std::fs::write(path, payload)?;
    info!(path = %path.display(), pairs = pairs.len(), "wrote starter corpus");
    Ok(())
}

fn starter_pairs() -> Vec<QaPair> {
    let seed: &[(&str, &str)] = &[
        (
            "What are the main types of cancer treatment?",
            "Main cancer treatments include surgery to remove tumors, chemotherapy drugs that kill cancer cells, radiation therapy with high-energy rays, immunotherapy that boosts the immune system, and targeted therapy directed at specific cancer features.",
        ),
        (
            "What are common side effects of chemotherapy?",
            "Common chemotherapy side effects include nausea, vomiting, hair loss, fatigue, low blood counts, increased infection risk, mouth sores, and neuropathy. Side effects vary by the specific drugs used.",
        ),
        (
            "How is cancer staged?",
            "Cancer staging describes the size and extent of cancer. The TNM system is commonly used: T for tumor size, N for lymph nodes, M for metastasis. Stages range from 0 for in situ disease to IV for advanced disease.",
        ),
        (
            "What should I eat during radiation therapy?",
            "During radiation therapy a balanced diet rich in proteins, vitamins, and fluids supports healing. Small frequent meals help when appetite is low, and a dietitian can tailor recommendations to treatment side effects.",
        ),
        (
            "How long is recovery after cancer surgery?",
            "Recovery after cancer surgery ranges from a few weeks to a few months depending on the procedure and overall health. Gradual return to activity and follow-up visits are part of the recovery plan.",
        ),
        (
            "How does immunotherapy treat cancer?",
            "Immunotherapy strengthens the body's own immune response against cancer cells, for example by blocking checkpoint proteins that tumors use to hide from immune attack.",
        ),
        (
            "How does radiation therapy work?",
            "Radiation therapy uses precisely aimed high-energy rays to damage the DNA of cancer cells so they stop dividing, while treatment planning spares surrounding normal tissue as much as possible.",
        ),
        (
            "How much does cancer treatment cost?",
            "Cancer treatment costs vary widely with the cancer type, treatment plan, insurance coverage, and country. Social workers and financial counselors at treatment centers can help estimate expenses.",
        ),
    ];
    seed.iter()
        .map(|(question, answer)| QaPair {
            question: (*question).to_string(),
            answer: (*answer).to_string(),
        })
        .collect()
}
