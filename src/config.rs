//! Runtime configuration utilities for onco-assistant.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Root folder for corpus and reference tables.
    pub data_dir: PathBuf,
    /// Corpus file name under `data_dir`.
    pub corpus_file: String,
    /// Directory holding the local span-extraction model and tokenizer.
    pub model_dir: PathBuf,
    /// Number of passages pulled per retrieval.
    pub top_k: usize,
    /// Default response strategy: `extractive` or `templated`.
    pub response_mode: String,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let corpus_file =
            env::var("CORPUS_FILE").unwrap_or_else(|_| "cancer_qa_dataset.json".to_string());
        let model_dir = env::var("MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./models/biobert-squad"));
        let top_k = env::var("TOP_K")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);
        let response_mode =
            env::var("RESPONSE_MODE").unwrap_or_else(|_| "extractive".to_string());

        std::fs::create_dir_all(&data_dir).context("creating data dir")?;

        Ok(Self {
            data_dir,
            corpus_file,
            model_dir,
            top_k,
            response_mode,
        })
    }

    /// Convenience helper for derived path segments.
    pub fn join_data<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.data_dir.join(path)
    }

    /// Absolute location of the retrieval corpus.
    pub fn corpus_path(&self) -> PathBuf {
        self.join_data(&self.corpus_file)
    }
}
