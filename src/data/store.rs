//! Typed reference tables with built-in defaults and on-disk persistence.

use std::path::Path;

use indexmap::IndexMap;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use strsim::jaro_winkler;
use tracing::{info, warn};

use crate::error::ServiceError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancerTypeRecord {
    pub cancer_type: String,
    pub stage: String,
    pub symptoms: String,
    pub treatments: String,
    pub survival_rate: String,
    pub common_age: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentRecord {
    pub treatment_name: String,
    pub category: String,
    pub cancer_types: String,
    pub side_effects: String,
    pub duration: String,
    pub effectiveness: String,
    pub cost_range: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideEffectRecord {
    pub side_effect: String,
    pub frequency: i64,
    pub severity: String,
    pub treatments: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// FAQ hit annotated with its category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaqHit {
    pub category: String,
    pub question: String,
    pub answer: String,
}

/// Read-only reference data loaded once at startup.
///
/// Missing or unreadable backing files regenerate the built-in defaults
/// and persist them back to disk.
pub struct DataStore {
    cancer_types: Vec<CancerTypeRecord>,
    treatments: Vec<TreatmentRecord>,
    side_effects: Vec<SideEffectRecord>,
    faq: IndexMap<String, Vec<FaqEntry>>,
}

impl DataStore {
    pub fn load(data_dir: &Path) -> Result<Self, ServiceError> {
        std::fs::create_dir_all(data_dir)?;
        Ok(Self {
            cancer_types: load_csv_or_default(
                &data_dir.join("cancer_types.csv"),
                default_cancer_types,
            )?,
            treatments: load_csv_or_default(&data_dir.join("treatments.csv"), default_treatments)?,
            side_effects: load_csv_or_default(
                &data_dir.join("side_effects.csv"),
                default_side_effects,
            )?,
            faq: load_faq_or_default(&data_dir.join("faq.json"))?,
        })
    }

    pub fn cancer_types(&self) -> &[CancerTypeRecord] {
        &self.cancer_types
    }

    pub fn treatments(&self) -> &[TreatmentRecord] {
        &self.treatments
    }

    pub fn side_effects(&self) -> &[SideEffectRecord] {
        &self.side_effects
    }

    pub fn faq(&self) -> &IndexMap<String, Vec<FaqEntry>> {
        &self.faq
    }

    /// First cancer-type row whose name contains the query, case-insensitively.
    pub fn find_cancer_info(&self, name: &str) -> Option<&CancerTypeRecord> {
        let needle = name.to_lowercase();
        self.cancer_types
            .iter()
            .find(|r| r.cancer_type.to_lowercase().contains(&needle))
    }

    /// Treatments applicable to a cancer type; all treatments when `None`.
    ///
    /// The table stores cancer names in short form ("Breast, Lung, ..."),
    /// so any word of the query name longer than three characters counts
    /// as a match.
    pub fn treatments_for(&self, cancer_type: Option<&str>) -> Vec<&TreatmentRecord> {
        match cancer_type {
            None => self.treatments.iter().collect(),
            Some(name) => {
                let words: Vec<String> = name
                    .to_lowercase()
                    .split_whitespace()
                    .filter(|w| w.chars().count() > 3)
                    .map(|w| w.to_string())
                    .collect();
                self.treatments
                    .iter()
                    .filter(|r| {
                        let listed = r.cancer_types.to_lowercase();
                        words.iter().any(|w| listed.contains(w))
                    })
                    .collect()
            }
        }
    }

    /// Treatments whose name contains the query, case-insensitively.
    pub fn treatments_named(&self, name: &str) -> Vec<&TreatmentRecord> {
        let needle = name.to_lowercase();
        self.treatments
            .iter()
            .filter(|r| r.treatment_name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Side effects attributed to a treatment.
    pub fn side_effects_for(&self, treatment: &str) -> Vec<&SideEffectRecord> {
        let needle = treatment.to_lowercase();
        self.side_effects
            .iter()
            .filter(|r| r.treatments.to_lowercase().contains(&needle))
            .collect()
    }

    /// FAQ entries matching the query by substring, with a fuzzy fallback
    /// on the question text.
    pub fn search_faq(&self, query: &str) -> Vec<FaqHit> {
        let needle = query.to_lowercase();
        let mut hits = Vec::new();
        for (category, entries) in &self.faq {
            for entry in entries {
                let question = entry.question.to_lowercase();
                let matched = question.contains(&needle)
                    || entry.answer.to_lowercase().contains(&needle)
                    || jaro_winkler(&question, &needle) > 0.82;
                if matched {
                    hits.push(FaqHit {
                        category: category.clone(),
                        question: entry.question.clone(),
                        answer: entry.answer.clone(),
                    });
                }
            }
        }
        hits
    }

    /// Treatment counts grouped by category, in table order.
    pub fn treatment_categories(&self) -> IndexMap<String, usize> {
        let mut counts = IndexMap::new();
        for record in &self.treatments {
            *counts.entry(record.category.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// The `n` most frequent side effects, highest frequency first.
    pub fn top_side_effects(&self, n: usize) -> IndexMap<String, i64> {
        let mut rows: Vec<&SideEffectRecord> = self.side_effects.iter().collect();
        rows.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        rows.into_iter()
            .take(n)
            .map(|r| (r.side_effect.clone(), r.frequency))
            .collect()
    }
}

fn load_csv_or_default<T>(path: &Path, defaults: fn() -> Vec<T>) -> Result<Vec<T>, ServiceError>
where
    T: Serialize + DeserializeOwned,
{
    if path.exists() {
        match read_csv::<T>(path) {
            Ok(rows) if !rows.is_empty() => return Ok(rows),
            Ok(_) => warn!(path = %path.display(), "reference table empty; regenerating defaults"),
            Err(err) => {
                warn!(path = %path.display(), %err, "reference table unreadable; regenerating defaults")
            }
        }
    }
    let rows = defaults();
    write_csv(path, &rows)?;
    info!(path = %path.display(), rows = rows.len(), "wrote reference defaults");
    Ok(rows)
}

fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ServiceError> {
    let mut reader =
        csv::Reader::from_path(path).map_err(|e| ServiceError::data_load(path.display(), e))?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result.map_err(|e| ServiceError::data_load(path.display(), e))?);
    }
    Ok(rows)
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), ServiceError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer =
        csv::Writer::from_path(path).map_err(|e| ServiceError::data_load(path.display(), e))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| ServiceError::data_load(path.display(), e))?;
    }
    writer
        .flush()
        .map_err(|e| ServiceError::data_load(path.display(), e))?;
    Ok(())
}

fn load_faq_or_default(path: &Path) -> Result<IndexMap<String, Vec<FaqEntry>>, ServiceError> {
    if path.exists() {
        let raw = std::fs::read_to_string(path)?;
        match serde_json::from_str::<IndexMap<String, Vec<FaqEntry>>>(&raw) {
            Ok(faq) if !faq.is_empty() => return Ok(faq),
            Ok(_) => warn!(path = %path.display(), "faq file empty; regenerating defaults"),
            Err(err) => warn!(path = %path.display(), %err, "faq file unreadable; regenerating defaults"),
        }
    }
    let faq = default_faq();
    let payload = serde_json::to_string_pretty(&faq)
        .map_err(|e| ServiceError::data_load(path.display(), e))?;
    std::fs::write(path, payload)?;
    info!(path = %path.display(), categories = faq.len(), "wrote faq defaults");
    Ok(faq)
}

fn default_cancer_types() -> Vec<CancerTypeRecord> {
    let rows: &[(&str, &str, &str, &str, &str, &str)] = &[
        (
            "Breast Cancer",
            "Stage II",
            "Breast lump, skin changes, nipple discharge",
            "Surgery, Chemotherapy, Radiation therapy, Hormone therapy",
            "85-90%",
            "50-60 years",
        ),
        (
            "Lung Cancer",
            "Stage III",
            "Persistent cough, chest pain, shortness of breath",
            "Surgery, Chemotherapy, Radiation therapy, Immunotherapy",
            "15-25%",
            "65-75 years",
        ),
        (
            "Prostate Cancer",
            "Stage I",
            "Difficulty urinating, blood in urine, pelvic pain",
            "Active surveillance, Surgery, Radiation therapy",
            "95-100%",
            "60-70 years",
        ),
        (
            "Colorectal Cancer",
            "Stage II",
            "Changes in bowel habits, blood in stool, abdominal pain",
            "Surgery, Chemotherapy, Radiation therapy, Targeted therapy",
            "70-80%",
            "50-70 years",
        ),
        (
            "Ovarian Cancer",
            "Stage III",
            "Abdominal bloating, pelvic pain, difficulty eating",
            "Surgery, Chemotherapy, Targeted therapy",
            "40-50%",
            "50-65 years",
        ),
    ];
    rows.iter()
        .map(
            |&(cancer_type, stage, symptoms, treatments, survival_rate, common_age)| {
                CancerTypeRecord {
                    cancer_type: cancer_type.to_string(),
                    stage: stage.to_string(),
                    symptoms: symptoms.to_string(),
                    treatments: treatments.to_string(),
                    survival_rate: survival_rate.to_string(),
                    common_age: common_age.to_string(),
                }
            },
        )
        .collect()
}

fn default_treatments() -> Vec<TreatmentRecord> {
    let rows: &[(&str, &str, &str, &str, &str, &str, &str)] = &[
        (
            "Chemotherapy",
            "Systemic Therapy",
            "Breast, Lung, Colorectal, Ovarian",
            "Nausea, Hair loss, Fatigue, Low blood counts",
            "3-6 months",
            "60-80%",
            "$10,000-$100,000",
        ),
        (
            "Radiation Therapy",
            "Local Therapy",
            "Breast, Lung, Prostate, Brain",
            "Skin irritation, Fatigue, Local pain",
            "5-7 weeks",
            "70-90%",
            "$15,000-$50,000",
        ),
        (
            "Surgery",
            "Local Therapy",
            "Breast, Lung, Prostate, Colorectal",
            "Pain, Infection risk, Scarring",
            "1-3 weeks recovery",
            "80-95%",
            "$20,000-$100,000",
        ),
        (
            "Immunotherapy",
            "Targeted Therapy",
            "Lung, Melanoma, Kidney, Bladder",
            "Flu-like symptoms, Skin rash, Diarrhea",
            "6-12 months",
            "20-50%",
            "$50,000-$200,000",
        ),
        (
            "Hormone Therapy",
            "Targeted Therapy",
            "Breast, Prostate",
            "Hot flashes, Mood changes, Bone loss",
            "5-10 years",
            "70-85%",
            "$5,000-$30,000",
        ),
    ];
    rows.iter()
        .map(
            |&(treatment_name, category, cancer_types, side_effects, duration, effectiveness, cost_range)| {
                TreatmentRecord {
                    treatment_name: treatment_name.to_string(),
                    category: category.to_string(),
                    cancer_types: cancer_types.to_string(),
                    side_effects: side_effects.to_string(),
                    duration: duration.to_string(),
                    effectiveness: effectiveness.to_string(),
                    cost_range: cost_range.to_string(),
                }
            },
        )
        .collect()
}

fn default_side_effects() -> Vec<SideEffectRecord> {
    let rows: &[(&str, i64, &str, &str)] = &[
        ("Nausea", 80, "Moderate", "Chemotherapy, Radiation"),
        ("Fatigue", 90, "Mild to Severe", "All treatments"),
        ("Hair Loss", 70, "Cosmetic", "Chemotherapy"),
        ("Low Blood Counts", 60, "Serious", "Chemotherapy"),
        ("Skin Irritation", 50, "Mild", "Radiation therapy"),
        ("Diarrhea", 40, "Moderate", "Chemotherapy, Immunotherapy"),
        ("Neuropathy", 30, "Moderate", "Chemotherapy"),
        ("Mouth Sores", 25, "Moderate", "Chemotherapy, Radiation"),
    ];
    rows.iter()
        .map(|&(side_effect, frequency, severity, treatments)| SideEffectRecord {
            side_effect: side_effect.to_string(),
            frequency,
            severity: severity.to_string(),
            treatments: treatments.to_string(),
        })
        .collect()
}

fn default_faq() -> IndexMap<String, Vec<FaqEntry>> {
    let mut faq = IndexMap::new();
    faq.insert(
        "general".to_string(),
        vec![
            FaqEntry {
                question: "What are the most common types of cancer?".to_string(),
                answer: "The most common types of cancer include breast cancer, lung cancer, prostate cancer, colorectal cancer, and skin cancer. These account for about 60% of all cancer diagnoses.".to_string(),
            },
            FaqEntry {
                question: "How is cancer staged?".to_string(),
                answer: "Cancer staging describes the size and extent of cancer. The TNM system is commonly used: T (tumor size), N (lymph nodes), M (metastasis). Stages range from 0 (in situ) to IV (advanced).".to_string(),
            },
        ],
    );
    faq.insert(
        "treatment".to_string(),
        vec![
            FaqEntry {
                question: "What are the main types of cancer treatment?".to_string(),
                answer: "Main cancer treatments include surgery (removing tumors), chemotherapy (drugs that kill cancer cells), radiation therapy (high-energy rays), immunotherapy (boosting immune system), and targeted therapy (drugs targeting specific cancer features).".to_string(),
            },
            FaqEntry {
                question: "How long does cancer treatment take?".to_string(),
                answer: "Treatment duration varies widely depending on cancer type, stage, and treatment plan. It can range from a few weeks for surgery to several months or years for systemic therapies.".to_string(),
            },
        ],
    );
    faq.insert(
        "side_effects".to_string(),
        vec![FaqEntry {
            question: "What are common side effects of chemotherapy?".to_string(),
            answer: "Common chemotherapy side effects include nausea, vomiting, hair loss, fatigue, low blood counts, increased infection risk, mouth sores, and neuropathy. Side effects vary by specific drugs used.".to_string(),
        }],
    );
    faq
}
