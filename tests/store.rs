use onco_assistant::data::store::DataStore;
use tempfile::TempDir;

#[test]
fn missing_files_generate_defaults_and_persist() {
    let dir = TempDir::new().unwrap();
    let store = DataStore::load(dir.path()).unwrap();
    assert_eq!(store.cancer_types().len(), 5);
    assert_eq!(store.treatments().len(), 5);
    assert_eq!(store.side_effects().len(), 8);
    assert!(dir.path().join("cancer_types.csv").exists());
    assert!(dir.path().join("treatments.csv").exists());
    assert!(dir.path().join("side_effects.csv").exists());
    assert!(dir.path().join("faq.json").exists());

    let reloaded = DataStore::load(dir.path()).unwrap();
    assert_eq!(reloaded.cancer_types(), store.cancer_types());
    assert_eq!(reloaded.treatments(), store.treatments());
}

#[test]
fn corrupt_table_regenerates_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("side_effects.csv"), "not,a,valid,header\n1,2").unwrap();
    let store = DataStore::load(dir.path()).unwrap();
    assert_eq!(store.side_effects().len(), 8);
}

#[test]
fn stats_projections_match_defaults() {
    let dir = TempDir::new().unwrap();
    let store = DataStore::load(dir.path()).unwrap();

    let categories = store.treatment_categories();
    assert_eq!(categories.get("Local Therapy"), Some(&2));
    assert_eq!(categories.get("Targeted Therapy"), Some(&2));
    assert_eq!(categories.get("Systemic Therapy"), Some(&1));

    let top = store.top_side_effects(5);
    assert_eq!(top.len(), 5);
    let (first_name, first_freq) = top.iter().next().unwrap();
    assert_eq!(first_name, "Fatigue");
    assert_eq!(*first_freq, 90);
}

#[test]
fn search_helpers_match_loosely() {
    let dir = TempDir::new().unwrap();
    let store = DataStore::load(dir.path()).unwrap();

    let info = store.find_cancer_info("breast").expect("breast cancer row");
    assert_eq!(info.cancer_type, "Breast Cancer");

    let treatments = store.treatments_for(Some("Breast Cancer"));
    assert!(treatments
        .iter()
        .any(|t| t.treatment_name == "Chemotherapy"));

    let side_effects = store.side_effects_for("Chemotherapy");
    assert!(side_effects.iter().any(|s| s.side_effect == "Nausea"));

    let hits = store.search_faq("staged");
    assert!(hits.iter().any(|h| h.question.contains("staged")));
}
