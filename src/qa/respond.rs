//! Response orchestration: shortcut, extractive, and templated strategies.

use std::sync::Arc;

use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::ResponseMode;
use crate::data::store::{CancerTypeRecord, DataStore, SideEffectRecord, TreatmentRecord};
use crate::error::ServiceError;
use crate::nlp::entities::{classify_intent, Entities, QueryIntent};
use crate::nlp::rules::{self, ShortcutAnswer};
use crate::nlp::{preprocess, QueryEnvelope};
use crate::qa::extractor::AnswerExtractor;
use crate::qa::retriever::{segment_sentences, ContextRetriever};

/// Literal fallback when no candidate sentence yields a qualifying span.
pub const NO_ANSWER_FALLBACK: &str = "No clear answer found.";

/// Equivalent medical disclaimers; exactly one is appended on every
/// non-shortcut path.
pub const DISCLAIMERS: &[&str] = &[
    "\n\n⚠️ **Please note:** This information is for educational purposes only. Always consult with your healthcare team for personalized medical advice.",
    "\n\n⚠️ **Important:** Individual cases vary significantly. Your healthcare provider can give you the most accurate information for your specific situation.",
    "\n\n⚠️ **Reminder:** This is general information only. Your oncologist can provide treatment recommendations tailored to your specific diagnosis and health status.",
];

const TREATMENT_TEMPLATES: &[&str] = &[
    "Based on your query about {cancer_type}, here are the main treatment options:",
    "For {cancer_type}, the following treatments are commonly used:",
    "Treatment options for {cancer_type} typically include:",
];

const SIDE_EFFECT_TEMPLATES: &[&str] = &[
    "Common side effects of {treatment} include:",
    "Patients receiving {treatment} may experience:",
    "The following side effects are associated with {treatment}:",
];

const SYMPTOM_TEMPLATES: &[&str] = &[
    "Typical symptoms of {cancer_type} include:",
    "Patients with {cancer_type} often report:",
];

const PROGNOSIS_TEMPLATES: &[&str] = &[
    "Regarding prognosis for {cancer_type}:",
    "The outlook for {cancer_type} depends on several factors:",
    "Survival rates for {cancer_type} vary based on:",
];

const LIFESTYLE_TEMPLATES: &[&str] = &[
    "For lifestyle and dietary recommendations:",
    "Regarding nutrition and lifestyle during treatment:",
    "Here are some general wellness guidelines:",
];

const COST_TEMPLATES: &[&str] = &[
    "Regarding the cost of {treatment}:",
    "Treatment costs depend on many factors; as a rough guide:",
];

const GENERAL_TEMPLATES: &[&str] = &[
    "Here's what I found about your query:",
    "Based on current medical knowledge:",
    "According to available information:",
];

const LIFESTYLE_GUIDELINES: &[&str] = &[
    "Eat small, frequent meals rich in protein and calories",
    "Stay hydrated and limit alcohol",
    "Keep light physical activity as tolerated and prioritize rest",
];

/// Structured rows accompanying a templated response.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RelatedData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancer_info: Option<CancerTypeRecord>,
    pub treatments: Vec<TreatmentRecord>,
    pub side_effects: Vec<SideEffectRecord>,
}

/// Final payload for one answered query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutcome {
    pub text: String,
    pub intent: String,
    pub entities: Entities,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_data: Option<RelatedData>,
}

/// Composes the full pipeline behind a single entry point.
pub struct Orchestrator {
    retriever: ContextRetriever,
    extractor: AnswerExtractor,
    store: Arc<DataStore>,
    mode: ResponseMode,
    top_k: usize,
}

impl Orchestrator {
    pub fn new(
        retriever: ContextRetriever,
        extractor: AnswerExtractor,
        store: Arc<DataStore>,
        mode: ResponseMode,
        top_k: usize,
    ) -> Self {
        Self {
            retriever,
            extractor,
            store,
            mode,
            top_k: top_k.max(1),
        }
    }

    pub fn store(&self) -> Arc<DataStore> {
        Arc::clone(&self.store)
    }

    /// Answer one query. Validation failures surface as errors; an
    /// exhausted extraction loop yields the fallback text with success.
    pub fn answer_query(&self, raw: &str) -> Result<QueryOutcome, ServiceError> {
        if raw.trim().is_empty() {
            return Err(ServiceError::EmptyQuery);
        }

        let envelope = preprocess(raw);
        debug!(
            language = envelope.detected_language.code(),
            tokens = envelope.tokens.len(),
            "preprocessed query"
        );

        if let Some(hit) = rules::try_shortcut(&envelope.tokens) {
            info!(intent = hit.intent, "rule shortcut fired");
            return Ok(self.shortcut_outcome(hit, envelope));
        }

        match self.mode {
            ResponseMode::Extractive => {
                let answer = self.extractive_answer(raw)?;
                let text = format!("{answer}{}", pick(DISCLAIMERS));
                Ok(QueryOutcome {
                    text,
                    intent: classify_intent(raw).as_str().to_string(),
                    entities: envelope.entities,
                    tokens: Some(envelope.tokens),
                    related_data: None,
                })
            }
            ResponseMode::Templated => {
                let (body, intent) = self.templated_response(raw, &envelope.entities);
                let text = format!("{body}{}", pick(DISCLAIMERS));
                let related_data = self.collect_related(&envelope.entities);
                Ok(QueryOutcome {
                    text,
                    intent: intent.as_str().to_string(),
                    entities: envelope.entities,
                    tokens: None,
                    related_data: Some(related_data),
                })
            }
        }
    }

    /// Shortcut answers skip retrieval, related data, and the disclaimer.
    fn shortcut_outcome(&self, hit: ShortcutAnswer, envelope: QueryEnvelope) -> QueryOutcome {
        let (tokens, related_data) = match self.mode {
            ResponseMode::Extractive => (Some(envelope.tokens), None),
            ResponseMode::Templated => (None, Some(RelatedData::default())),
        };
        QueryOutcome {
            text: hit.text.to_string(),
            intent: hit.intent.to_string(),
            entities: Entities::default(),
            tokens,
            related_data,
        }
    }

    /// Retrieve passages, segment them, and accept the first qualifying
    /// span the extractor produces.
    fn extractive_answer(&self, query: &str) -> Result<String, ServiceError> {
        let passages = self.retriever.retrieve(query, self.top_k)?;
        let mut candidates = Vec::new();
        for passage in &passages {
            candidates.extend(segment_sentences(passage));
        }
        debug!(candidates = candidates.len(), "segmented candidate sentences");

        for sentence in &candidates {
            let answer = self.extractor.extract_answer(query, sentence)?;
            let trimmed = answer.trim();
            if !trimmed.is_empty()
                && trimmed.len() > 5
                && !trimmed.to_lowercase().contains("no clear answer")
            {
                return Ok(trimmed.to_string());
            }
        }
        Ok(NO_ANSWER_FALLBACK.to_string())
    }

    fn templated_response(&self, query: &str, entities: &Entities) -> (String, QueryIntent) {
        let intent = classify_intent(query);
        let cancer_type = entities
            .cancer_types
            .iter()
            .next()
            .cloned()
            .unwrap_or_else(|| "cancer".to_string());
        let treatment = entities
            .treatments
            .iter()
            .next()
            .cloned()
            .unwrap_or_else(|| "this treatment".to_string());

        let templates = match intent {
            QueryIntent::TreatmentInfo => TREATMENT_TEMPLATES,
            QueryIntent::SideEffects => SIDE_EFFECT_TEMPLATES,
            QueryIntent::Symptoms => SYMPTOM_TEMPLATES,
            QueryIntent::Prognosis => PROGNOSIS_TEMPLATES,
            QueryIntent::Lifestyle => LIFESTYLE_TEMPLATES,
            QueryIntent::Cost => COST_TEMPLATES,
            QueryIntent::GeneralInfo => GENERAL_TEMPLATES,
        };
        let mut text = pick(templates)
            .replace("{cancer_type}", &cancer_type)
            .replace("{treatment}", &treatment);

        match intent {
            QueryIntent::TreatmentInfo => {
                let cancer = entities.cancer_types.iter().next().map(String::as_str);
                for record in self.store.treatments_for(cancer) {
                    text.push_str(&format!(
                        "\n• {} ({}), typical duration {}",
                        record.treatment_name, record.category, record.duration
                    ));
                }
            }
            QueryIntent::SideEffects => {
                let mut rows = self.store.side_effects_for(&treatment);
                if rows.is_empty() {
                    rows = self.store.side_effects().iter().take(5).collect();
                }
                for record in rows {
                    text.push_str(&format!(
                        "\n• {}: reported by {}% of patients ({})",
                        record.side_effect, record.frequency, record.severity
                    ));
                }
            }
            QueryIntent::Symptoms => {
                if let Some(info) = self.store.find_cancer_info(&cancer_type) {
                    for symptom in info.symptoms.split(',') {
                        text.push_str(&format!("\n• {}", symptom.trim()));
                    }
                }
            }
            QueryIntent::Prognosis => {
                if let Some(info) = self.store.find_cancer_info(&cancer_type) {
                    text.push_str(&format!(
                        "\n• Five-year survival rate: {}\n• Most common age at diagnosis: {}",
                        info.survival_rate, info.common_age
                    ));
                }
            }
            QueryIntent::Lifestyle => {
                for guideline in LIFESTYLE_GUIDELINES {
                    text.push_str(&format!("\n• {guideline}"));
                }
            }
            QueryIntent::Cost => {
                for record in self.store.treatments_named(&treatment) {
                    text.push_str(&format!(
                        "\n• {}: {}",
                        record.treatment_name, record.cost_range
                    ));
                }
            }
            QueryIntent::GeneralInfo => {
                for hit in self.store.search_faq(query).into_iter().take(2) {
                    text.push_str(&format!("\n• {} {}", hit.question, hit.answer));
                }
            }
        }
        (text, intent)
    }

    fn collect_related(&self, entities: &Entities) -> RelatedData {
        let mut related = RelatedData::default();
        if let Some(cancer) = entities.cancer_types.iter().next() {
            related.cancer_info = self.store.find_cancer_info(cancer).cloned();
            related.treatments = self
                .store
                .treatments_for(Some(cancer))
                .into_iter()
                .cloned()
                .collect();
        }
        if let Some(treatment) = entities.treatments.iter().next() {
            related.side_effects = self
                .store
                .side_effects_for(treatment)
                .into_iter()
                .cloned()
                .collect();
        }
        related
    }
}

fn pick<'a>(options: &[&'a str]) -> &'a str {
    options
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(options[0])
}
