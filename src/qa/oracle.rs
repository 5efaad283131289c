//! Embedding and span-extraction oracle contracts with swappable backends.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::config::Settings;
use crate::error::ServiceError;

/// Encoder mapping texts into a shared vector space.
pub trait EmbeddingOracle: Send + Sync {
    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, ServiceError>;
}

/// Start/end position scores over the oracle's own tokenization of a
/// question/context pair. The parallel vectors always share one length.
#[derive(Debug, Clone)]
pub struct SpanScores {
    pub tokens: Vec<String>,
    pub start: Vec<f32>,
    pub end: Vec<f32>,
}

/// Span-extraction scoring oracle.
pub trait SpanOracle: Send + Sync {
    fn score(&self, question: &str, context: &str) -> Result<SpanScores, ServiceError>;
}

/// Deterministic hashed bag-of-words encoder used when the `embeddings`
/// feature is disabled. Cosine retrieval over it stays meaningful because
/// shared vocabulary lands in shared buckets.
pub struct HashedBowEncoder {
    dims: usize,
}

impl HashedBowEncoder {
    pub fn new(dims: usize) -> Self {
        Self { dims: dims.max(8) }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dims];
        for token in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|s| !s.is_empty())
        {
            let mut hasher = std::collections::hash_map::DefaultHasher::new();
            token.hash(&mut hasher);
            vector[(hasher.finish() as usize) % self.dims] += 1.0;
        }
        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        vector
    }
}

impl EmbeddingOracle for HashedBowEncoder {
    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, ServiceError> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}

/// MiniLM sentence encoder backed by fastembed.
#[cfg(feature = "embeddings")]
pub struct FastembedEncoder {
    model: fastembed::TextEmbedding,
}

#[cfg(feature = "embeddings")]
impl FastembedEncoder {
    pub fn new() -> Result<Self, ServiceError> {
        let model = fastembed::TextEmbedding::try_new(Default::default())
            .map_err(|e| ServiceError::Oracle(e.to_string()))?;
        Ok(Self { model })
    }
}

#[cfg(feature = "embeddings")]
impl EmbeddingOracle for FastembedEncoder {
    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, ServiceError> {
        self.model
            .embed(texts.to_vec(), None)
            .map_err(|e| ServiceError::Oracle(e.to_string()))
    }
}

/// Lexical-overlap span scorer used when the `onx` feature is disabled.
///
/// Tokenizes the pair as `[CLS] question [SEP] context [SEP]` and scores
/// context tokens by query-term overlap. With no overlap the `[CLS]` slot
/// wins both argmaxes, which downstream decodes as "no answer" (the same
/// convention SQuAD-v2 models use).
pub struct LexicalSpanOracle;

impl LexicalSpanOracle {
    fn content_words(text: &str) -> HashSet<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.chars().count() > 3)
            .map(|w| w.to_string())
            .collect()
    }
}

impl SpanOracle for LexicalSpanOracle {
    fn score(&self, question: &str, context: &str) -> Result<SpanScores, ServiceError> {
        let query_terms = Self::content_words(question);

        let mut tokens = vec!["[CLS]".to_string()];
        let mut start = vec![0.5f32];
        let mut end = vec![0.5f32];

        for word in question.split_whitespace() {
            tokens.push(word.to_string());
            start.push(-10.0);
            end.push(-10.0);
        }
        tokens.push("[SEP]".to_string());
        start.push(-10.0);
        end.push(-10.0);

        for (idx, word) in context.split_whitespace().enumerate() {
            let bare: String = word
                .to_lowercase()
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect();
            let hit = query_terms.contains(&bare);
            tokens.push(word.to_string());
            // Earlier matches win the start argmax, later matches the end
            // argmax, so the span covers the full overlapping stretch.
            let bias = idx as f32 * 1e-3;
            start.push(if hit { 1.0 - bias } else { -1.0 });
            end.push(if hit { 1.0 + bias } else { -1.0 });
        }
        tokens.push("[SEP]".to_string());
        start.push(-10.0);
        end.push(-10.0);

        Ok(SpanScores { tokens, start, end })
    }
}

/// ONNX Runtime backend over a local SQuAD-style extractive QA model.
#[cfg(feature = "onx")]
pub struct OrtSpanOracle {
    session: ort::Session,
    tokenizer: tokenizers::Tokenizer,
}

#[cfg(feature = "onx")]
impl OrtSpanOracle {
    /// Load `model.onnx` and `tokenizer.json` from the configured model dir.
    /// Construction is the expensive step; scoring reuses the session.
    pub fn load(model_dir: &std::path::Path) -> Result<Self, ServiceError> {
        let environment = ort::Environment::builder()
            .with_name("span-oracle")
            .build()
            .map_err(|e| ServiceError::Oracle(e.to_string()))?
            .into_arc();
        let session = ort::SessionBuilder::new(&environment)
            .and_then(|b| b.with_optimization_level(ort::GraphOptimizationLevel::Level1))
            .and_then(|b| b.with_model_from_file(model_dir.join("model.onnx")))
            .map_err(|e| ServiceError::Oracle(e.to_string()))?;
        let tokenizer = tokenizers::Tokenizer::from_file(model_dir.join("tokenizer.json"))
            .map_err(|e| ServiceError::Oracle(e.to_string()))?;
        Ok(Self { session, tokenizer })
    }
}

#[cfg(feature = "onx")]
impl SpanOracle for OrtSpanOracle {
    fn score(&self, question: &str, context: &str) -> Result<SpanScores, ServiceError> {
        use ndarray::{Array2, CowArray};

        let oracle_err = |e: &dyn std::fmt::Display| ServiceError::Oracle(e.to_string());

        let encoding = self
            .tokenizer
            .encode((question, context), true)
            .map_err(|e| oracle_err(&e))?;
        let len = encoding.get_ids().len();
        let to_array = |values: Vec<i64>| -> Result<CowArray<'static, i64, ndarray::IxDyn>, ServiceError> {
            Array2::from_shape_vec((1, len), values)
                .map(|a| CowArray::from(a.into_dyn()))
                .map_err(|e| oracle_err(&e))
        };

        let ids = to_array(encoding.get_ids().iter().map(|&v| v as i64).collect())?;
        let mask = to_array(
            encoding
                .get_attention_mask()
                .iter()
                .map(|&v| v as i64)
                .collect(),
        )?;
        let type_ids = to_array(encoding.get_type_ids().iter().map(|&v| v as i64).collect())?;

        let inputs = vec![
            ort::Value::from_array(self.session.allocator(), &ids).map_err(|e| oracle_err(&e))?,
            ort::Value::from_array(self.session.allocator(), &mask).map_err(|e| oracle_err(&e))?,
            ort::Value::from_array(self.session.allocator(), &type_ids)
                .map_err(|e| oracle_err(&e))?,
        ];
        let outputs = self.session.run(inputs).map_err(|e| oracle_err(&e))?;

        let start_tensor: ort::tensor::OrtOwnedTensor<f32, ndarray::IxDyn> =
            outputs[0].try_extract().map_err(|e| oracle_err(&e))?;
        let end_tensor: ort::tensor::OrtOwnedTensor<f32, ndarray::IxDyn> =
            outputs[1].try_extract().map_err(|e| oracle_err(&e))?;
        let start: Vec<f32> = start_tensor.view().iter().copied().collect();
        let end: Vec<f32> = end_tensor.view().iter().copied().collect();

        Ok(SpanScores {
            tokens: encoding.get_tokens().to_vec(),
            start,
            end,
        })
    }
}

/// Construct the embedding oracle for this build.
#[cfg(feature = "embeddings")]
pub fn default_embedding_oracle() -> Result<Arc<dyn EmbeddingOracle>, ServiceError> {
    Ok(Arc::new(FastembedEncoder::new()?))
}

/// Construct the embedding oracle for this build.
#[cfg(not(feature = "embeddings"))]
pub fn default_embedding_oracle() -> Result<Arc<dyn EmbeddingOracle>, ServiceError> {
    Ok(Arc::new(HashedBowEncoder::new(256)))
}

/// Construct the span-extraction oracle for this build.
#[cfg(feature = "onx")]
pub fn default_span_oracle(settings: &Settings) -> Result<Arc<dyn SpanOracle>, ServiceError> {
    Ok(Arc::new(OrtSpanOracle::load(&settings.model_dir)?))
}

/// Construct the span-extraction oracle for this build.
#[cfg(not(feature = "onx"))]
pub fn default_span_oracle(_settings: &Settings) -> Result<Arc<dyn SpanOracle>, ServiceError> {
    Ok(Arc::new(LexicalSpanOracle))
}
