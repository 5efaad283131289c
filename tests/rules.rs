use onco_assistant::nlp::rules::try_shortcut;

fn tokens(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[test]
fn chemotherapy_side_effects_rule_fires() {
    let hit = try_shortcut(&tokens(&["chemotherapy", "side", "effects"])).expect("rule fires");
    assert_eq!(hit.intent, "side_effects");
    assert!(hit.text.starts_with("Common side effects of chemotherapy"));
}

#[test]
fn either_alternative_satisfies_a_group() {
    let with_side = try_shortcut(&tokens(&["chemotherapy", "side"])).expect("rule fires");
    let with_effects = try_shortcut(&tokens(&["chemotherapy", "effects"])).expect("rule fires");
    assert_eq!(with_side.text, with_effects.text);
}

#[test]
fn breast_cancer_stage_rule_takes_priority() {
    let hit = try_shortcut(&tokens(&[
        "breast",
        "cancer",
        "stage",
        "chemotherapy",
        "side",
    ]))
    .expect("rule fires");
    assert_eq!(hit.intent, "treatment_options");
}

#[test]
fn stemmed_pipeline_tokens_still_match() {
    // "effects" lemmatizes to "effect"; the rule table must still match.
    let hit = try_shortcut(&tokens(&["chemotherapy", "effect"])).expect("rule fires");
    assert_eq!(hit.intent, "side_effects");
}

#[test]
fn french_rule_matches() {
    let hit =
        try_shortcut(&tokens(&["chimiothérapie", "effet", "secondaire"])).expect("rule fires");
    assert_eq!(hit.intent, "side_effects");
    assert!(hit.text.starts_with("Les effets secondaires"));
}

#[test]
fn empty_tokens_fall_through() {
    assert!(try_shortcut(&[]).is_none());
}

#[test]
fn unrelated_tokens_fall_through() {
    assert!(try_shortcut(&tokens(&["weather", "tomorrow"])).is_none());
}
