use onco_assistant::nlp::entities::{classify_intent, extract_entities, QueryIntent};

#[test]
fn breast_cancer_lexicon_match_is_title_cased() {
    let entities = extract_entities("Tell me about BREAST CANCER please");
    assert!(entities.cancer_types.contains("Breast Cancer"));
}

#[test]
fn stage_phrases_are_detected() {
    let entities = extract_entities("Is stage 2 breast cancer treatable?");
    assert!(entities.stages.contains("Stage 2"));
    assert!(entities.cancer_types.contains("Breast Cancer"));
}

#[test]
fn repeated_mentions_deduplicate() {
    let entities = extract_entities("chemotherapy, then more chemotherapy");
    assert_eq!(entities.treatments.len(), 1);
}

#[test]
fn unrelated_text_extracts_nothing() {
    let entities = extract_entities("asdkjasdkj random gibberish");
    assert!(entities.is_empty());
}

#[test]
fn intent_families_apply_in_priority_order() {
    assert_eq!(
        classify_intent("What treatment options exist?"),
        QueryIntent::TreatmentInfo
    );
    assert_eq!(
        classify_intent("any adverse consequences to expect?"),
        QueryIntent::SideEffects
    );
    assert_eq!(
        classify_intent("warning indicators to watch for"),
        QueryIntent::Symptoms
    );
    assert_eq!(
        classify_intent("what is the survival outlook"),
        QueryIntent::Prognosis
    );
    assert_eq!(classify_intent("best nutrition plan"), QueryIntent::Lifestyle);
    assert_eq!(classify_intent("is it expensive"), QueryIntent::Cost);
    assert_eq!(classify_intent("bonjour"), QueryIntent::GeneralInfo);
}

#[test]
fn treatment_family_outranks_cost() {
    // "therapy" appears before any cost keyword is considered.
    assert_eq!(
        classify_intent("price of proton therapy"),
        QueryIntent::TreatmentInfo
    );
}
