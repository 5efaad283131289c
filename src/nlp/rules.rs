//! Keyword-triggered canned answers that bypass retrieval and extraction.

use std::collections::HashSet;

use crate::nlp::normalize::{stem, Language};

/// A curated answer produced by the shortcut layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutAnswer {
    pub text: &'static str,
    pub intent: &'static str,
}

/// One shortcut rule: every group must be satisfied by at least one of its
/// alternative lemmas.
struct Rule {
    lang: Language,
    required: &'static [&'static [&'static str]],
    answer: &'static str,
    intent: &'static str,
}

const RULES: &[Rule] = &[
    Rule {
        lang: Language::En,
        required: &[&["breast"], &["cancer"], &["stage"]],
        answer: "Treatment for stage 2 breast cancer typically includes surgery, chemotherapy, radiation therapy, and hormone therapy depending on receptor status.",
        intent: "treatment_options",
    },
    Rule {
        lang: Language::En,
        required: &[&["chemotherapy"], &["side", "effects"]],
        answer: "Common side effects of chemotherapy include fatigue, nausea, vomiting, hair loss, and increased risk of infection.",
        intent: "side_effects",
    },
    Rule {
        lang: Language::En,
        required: &[&["diet"], &["radiation"]],
        answer: "During radiation therapy, a balanced diet rich in proteins, vitamins, and hydration is recommended to support recovery.",
        intent: "diet_recommendation",
    },
    Rule {
        lang: Language::En,
        required: &[&["recovery"], &["surgery"]],
        answer: "Recovery time after cancer surgery can vary but typically ranges from a few weeks to a few months depending on the procedure.",
        intent: "recovery_time",
    },
    Rule {
        lang: Language::En,
        required: &[&["immunotherapy"]],
        answer: "Immunotherapy boosts the body's natural defenses to fight cancer by targeting specific cancer cell markers.",
        intent: "immunotherapy",
    },
    Rule {
        lang: Language::En,
        required: &[&["radiation"], &["work"]],
        answer: "Radiation therapy works by using high-energy rays to destroy or damage cancer cells while sparing normal tissues.",
        intent: "treatment_mechanism",
    },
    Rule {
        lang: Language::En,
        required: &[&["symptom"], &["ovarian"]],
        answer: "Symptoms of ovarian cancer can include bloating, pelvic pain, difficulty eating, and frequent urination.",
        intent: "symptoms",
    },
    Rule {
        lang: Language::En,
        required: &[&["cost"], &["treatments"]],
        answer: "Cancer treatment costs vary widely depending on location, type of cancer, insurance, and treatment duration.",
        intent: "cost",
    },
    Rule {
        lang: Language::Fr,
        required: &[&["cancer"], &["sein"], &["stade"]],
        answer: "Le traitement du cancer du sein de stade 2 inclut généralement une chirurgie, une chimiothérapie, une radiothérapie et une hormonothérapie selon le profil tumoral.",
        intent: "treatment_options",
    },
    Rule {
        lang: Language::Fr,
        required: &[&["chimiothérapie"], &["effet", "secondaire"]],
        answer: "Les effets secondaires fréquents de la chimiothérapie incluent la fatigue, les nausées, la perte de cheveux et un risque accru d'infection.",
        intent: "side_effects",
    },
    Rule {
        lang: Language::Fr,
        required: &[&["régime"], &["radiothérapie"]],
        answer: "Pendant la radiothérapie, une alimentation équilibrée, riche en protéines, vitamines et hydratation est recommandée.",
        intent: "diet_recommendation",
    },
    Rule {
        lang: Language::Fr,
        required: &[&["récupération"], &["chirurgie"]],
        answer: "Le temps de récupération après une chirurgie dépend du type d'intervention, généralement quelques semaines à quelques mois.",
        intent: "recovery_time",
    },
    Rule {
        lang: Language::Fr,
        required: &[&["immunothérapie"]],
        answer: "L'immunothérapie renforce les défenses naturelles du corps pour lutter contre le cancer en ciblant des marqueurs spécifiques.",
        intent: "immunotherapy",
    },
    Rule {
        lang: Language::Fr,
        required: &[&["fonctionne"], &["radiothérapie"]],
        answer: "La radiothérapie utilise des rayons à haute énergie pour détruire ou endommager les cellules cancéreuses.",
        intent: "treatment_mechanism",
    },
    Rule {
        lang: Language::Fr,
        required: &[&["symptôme"], &["ovaire"]],
        answer: "Les symptômes du cancer de l'ovaire incluent ballonnements, douleurs pelviennes, troubles digestifs et mictions fréquentes.",
        intent: "symptoms",
    },
    Rule {
        lang: Language::Fr,
        required: &[&["coût"], &["traitement"]],
        answer: "Le coût du traitement du cancer varie selon le pays, le type de cancer, la couverture d'assurance et la durée des soins.",
        intent: "cost",
    },
];

/// Check the token set against the rule table; first match wins.
///
/// Matching is lemma-aware: a keyword is satisfied when the set contains it
/// verbatim, or when both sides agree after stemming with the rule's language.
pub fn try_shortcut(tokens: &[String]) -> Option<ShortcutAnswer> {
    if tokens.is_empty() {
        return None;
    }
    let raw: HashSet<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
    let stemmed_en: HashSet<String> = raw.iter().map(|t| stem(t, Language::En)).collect();
    let stemmed_fr: HashSet<String> = raw.iter().map(|t| stem(t, Language::Fr)).collect();

    for rule in RULES {
        let stems = match rule.lang {
            Language::En => &stemmed_en,
            Language::Fr => &stemmed_fr,
        };
        let satisfied = rule.required.iter().all(|group| {
            group.iter().any(|keyword| {
                if raw.contains(*keyword) {
                    return true;
                }
                let lemma = stem(keyword, rule.lang);
                raw.contains(&lemma) || stems.contains(&lemma)
            })
        });
        if satisfied {
            return Some(ShortcutAnswer {
                text: rule.answer,
                intent: rule.intent,
            });
        }
    }
    None
}
