use onco_assistant::nlp::normalize::{
    clean_text, coerce_language, detect_language, lemmatize, normalize, Language,
};
use onco_assistant::nlp::preprocess;
use proptest::prelude::*;

#[test]
fn english_cleanup_strips_noise() {
    let cleaned = clean_text("What are the SIDE-EFFECTS of chemotherapy?! 😊", Language::En);
    assert_eq!(cleaned, "what are the side effects of chemotherapy");
}

#[test]
fn french_cleanup_keeps_accents() {
    let cleaned = clean_text(
        "Quels sont les effets secondaires de la chimiothérapie?!",
        Language::Fr,
    );
    assert_eq!(
        cleaned,
        "quels sont les effets secondaires de la chimiothérapie"
    );
}

#[test]
fn whitespace_runs_collapse() {
    let cleaned = clean_text("Cancer   treatment!!!   @#$%", Language::En);
    assert_eq!(cleaned, "cancer treatment");
}

#[test]
fn unsupported_languages_coerce_to_english() {
    assert_eq!(coerce_language(Some(whatlang::Lang::Deu)), Language::En);
    assert_eq!(coerce_language(None), Language::En);
    assert_eq!(coerce_language(Some(whatlang::Lang::Fra)), Language::Fr);
    assert_eq!(coerce_language(Some(whatlang::Lang::Eng)), Language::En);
}

#[test]
fn detection_stays_in_supported_set() {
    let lang = detect_language("Das ist eine Krankheit, die eine gute Behandlung benötigt.");
    assert!(matches!(lang, Language::En | Language::Fr));
}

#[test]
fn lemmatization_drops_stopwords() {
    let tokens = lemmatize("what are the side effects of chemotherapy", Language::En);
    assert!(!tokens.iter().any(|t| t == "the" || t == "of" || t == "are"));
    assert!(tokens.contains(&"side".to_string()));
}

#[test]
fn envelope_carries_all_pipeline_outputs() {
    let envelope = preprocess("What are treatment options for breast cancer stage 2?");
    assert_eq!(
        envelope.original_text,
        "What are treatment options for breast cancer stage 2?"
    );
    assert!(envelope.tokens.contains(&"breast".to_string()));
    assert!(envelope.entities.cancer_types.contains("Breast Cancer"));
    assert!(envelope.entities.stages.contains("Stage 2"));
}

proptest! {
    #[test]
    fn normalization_is_repeatable(input in ".{0,200}") {
        let first = normalize(&input);
        let second = normalize(&input);
        prop_assert_eq!(first, second);
    }
}
