//! Lexicon-based medical entity extraction and intent classification.

use std::collections::BTreeSet;

use serde::Serialize;

const CANCER_TYPES: &[&str] = &[
    "breast cancer",
    "lung cancer",
    "prostate cancer",
    "colorectal cancer",
    "skin cancer",
    "melanoma",
    "leukemia",
    "lymphoma",
    "ovarian cancer",
    "pancreatic cancer",
    "liver cancer",
    "kidney cancer",
    "bladder cancer",
    "brain cancer",
    "thyroid cancer",
    "cervical cancer",
    "endometrial cancer",
    "stomach cancer",
    "esophageal cancer",
    "oral cancer",
    "bone cancer",
];

const TREATMENTS: &[&str] = &[
    "chemotherapy",
    "radiation therapy",
    "surgery",
    "immunotherapy",
    "targeted therapy",
    "hormone therapy",
    "stem cell transplant",
    "bone marrow transplant",
    "cryotherapy",
    "photodynamic therapy",
    "radiofrequency ablation",
    "brachytherapy",
    "proton therapy",
    "car-t cell therapy",
    "checkpoint inhibitors",
    "monoclonal antibodies",
];

const SYMPTOMS: &[&str] = &[
    "fatigue",
    "nausea",
    "vomiting",
    "hair loss",
    "weight loss",
    "appetite loss",
    "fever",
    "infection",
    "anemia",
    "bleeding",
    "bruising",
    "diarrhea",
    "constipation",
    "mouth sores",
    "skin changes",
    "neuropathy",
    "shortness of breath",
    "cough",
    "pain",
    "swelling",
    "headache",
    "dizziness",
    "confusion",
];

const SIDE_EFFECTS: &[&str] = &[
    "nausea",
    "vomiting",
    "fatigue",
    "hair loss",
    "neuropathy",
    "diarrhea",
    "constipation",
    "mouth sores",
    "skin rash",
    "low blood count",
    "infection risk",
    "bleeding",
    "anemia",
    "kidney problems",
    "heart problems",
    "lung problems",
    "cognitive changes",
    "fertility issues",
    "bone weakness",
];

const STAGES: &[&str] = &[
    "stage 0",
    "stage i",
    "stage ii",
    "stage iii",
    "stage iv",
    "stage 1",
    "stage 2",
    "stage 3",
    "stage 4",
    "early stage",
    "advanced stage",
    "metastatic",
    "localized",
];

/// Deduplicated entity matches keyed by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Entities {
    pub cancer_types: BTreeSet<String>,
    pub treatments: BTreeSet<String>,
    pub symptoms: BTreeSet<String>,
    pub side_effects: BTreeSet<String>,
    pub stages: BTreeSet<String>,
}

impl Entities {
    pub fn is_empty(&self) -> bool {
        self.cancer_types.is_empty()
            && self.treatments.is_empty()
            && self.symptoms.is_empty()
            && self.side_effects.is_empty()
            && self.stages.is_empty()
    }
}

/// Scan the raw text for lexicon phrases, case-insensitively.
pub fn extract_entities(text: &str) -> Entities {
    let lower = text.to_lowercase();
    let mut entities = Entities::default();
    scan(&lower, CANCER_TYPES, &mut entities.cancer_types);
    scan(&lower, TREATMENTS, &mut entities.treatments);
    scan(&lower, SYMPTOMS, &mut entities.symptoms);
    scan(&lower, SIDE_EFFECTS, &mut entities.side_effects);
    scan(&lower, STAGES, &mut entities.stages);
    entities
}

fn scan(lower: &str, lexicon: &[&str], out: &mut BTreeSet<String>) {
    for term in lexicon {
        if lower.contains(term) {
            out.insert(title_case(term));
        }
    }
}

fn title_case(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    let mut boundary = true;
    for c in term.chars() {
        if c.is_alphabetic() {
            if boundary {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
            boundary = false;
        } else {
            out.push(c);
            boundary = true;
        }
    }
    out
}

/// Query intent, checked against keyword families in a fixed priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryIntent {
    TreatmentInfo,
    SideEffects,
    Symptoms,
    Prognosis,
    Lifestyle,
    Cost,
    GeneralInfo,
}

impl QueryIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryIntent::TreatmentInfo => "treatment_info",
            QueryIntent::SideEffects => "side_effects",
            QueryIntent::Symptoms => "symptoms",
            QueryIntent::Prognosis => "prognosis",
            QueryIntent::Lifestyle => "lifestyle",
            QueryIntent::Cost => "cost",
            QueryIntent::GeneralInfo => "general_info",
        }
    }
}

const INTENT_FAMILIES: &[(QueryIntent, &[&str])] = &[
    (
        QueryIntent::TreatmentInfo,
        &["treatment", "therapy", "cure", "heal"],
    ),
    (
        QueryIntent::SideEffects,
        &["side effect", "adverse", "reaction"],
    ),
    (QueryIntent::Symptoms, &["symptom", "sign", "indicator"]),
    (
        QueryIntent::Prognosis,
        &["prognosis", "survival", "outlook", "recovery"],
    ),
    (
        QueryIntent::Lifestyle,
        &["diet", "food", "nutrition", "exercise", "lifestyle"],
    ),
    (
        QueryIntent::Cost,
        &["cost", "price", "expensive", "insurance"],
    ),
];

/// Classify the query intent; the first matching family wins.
pub fn classify_intent(text: &str) -> QueryIntent {
    let lower = text.to_lowercase();
    for (intent, words) in INTENT_FAMILIES {
        if words.iter().any(|word| lower.contains(word)) {
            return *intent;
        }
    }
    QueryIntent::GeneralInfo
}
