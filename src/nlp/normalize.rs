//! Language detection, text cleanup, and lemma tokenization.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use serde::Serialize;

/// Supported query languages. Anything else is coerced to English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Fr,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }

    fn algorithm(&self) -> Algorithm {
        match self {
            Language::En => Algorithm::English,
            Language::Fr => Algorithm::French,
        }
    }
}

/// Output of the normalization pipeline. Pure function of the input text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedQuery {
    pub language: Language,
    pub cleaned_text: String,
    pub tokens: Vec<String>,
}

static EN_DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9'\s]").expect("valid regex"));
static FR_DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zàâçéèêëîïôûùüÿñæœ0-9'\s]").expect("valid regex"));
static WHITESPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

static STOP_EN: Lazy<HashSet<String>> = Lazy::new(|| {
    stop_words::get(stop_words::LANGUAGE::English)
        .into_iter()
        .collect()
});
static STOP_FR: Lazy<HashSet<String>> = Lazy::new(|| {
    stop_words::get(stop_words::LANGUAGE::French)
        .into_iter()
        .collect()
});

/// Map a detector verdict onto the supported language set.
pub fn coerce_language(detected: Option<whatlang::Lang>) -> Language {
    match detected {
        Some(whatlang::Lang::Fra) => Language::Fr,
        _ => Language::En,
    }
}

/// Detect the query language, falling back to English.
pub fn detect_language(text: &str) -> Language {
    coerce_language(whatlang::detect(text).map(|info| info.lang()))
}

/// Lowercase, strip characters outside the language allow-list, collapse whitespace.
pub fn clean_text(text: &str, lang: Language) -> String {
    let lowered = text.to_lowercase().replace('\u{2019}', "'");
    let pattern = match lang {
        Language::En => &*EN_DISALLOWED,
        Language::Fr => &*FR_DISALLOWED,
    };
    let stripped = pattern.replace_all(&lowered, " ");
    WHITESPACE_RUNS.replace_all(&stripped, " ").trim().to_string()
}

/// Reduce a word to its lemma with the language's Snowball stemmer.
pub fn stem(word: &str, lang: Language) -> String {
    Stemmer::create(lang.algorithm()).stem(word).into_owned()
}

/// Tokenize cleaned text into lemmas, dropping stop-words.
///
/// Order is insertion order from the source text; duplicates are kept.
pub fn lemmatize(cleaned: &str, lang: Language) -> Vec<String> {
    let stops = match lang {
        Language::En => &*STOP_EN,
        Language::Fr => &*STOP_FR,
    };
    let stemmer = Stemmer::create(lang.algorithm());

    let mut tokens = Vec::new();
    for word in cleaned.split_whitespace() {
        for part in split_elisions(word, lang) {
            let part = part.trim_matches('\'');
            if part.is_empty() || stops.contains(part) {
                continue;
            }
            // French elision fragments like the bare "l" carry no content.
            if part.chars().count() == 1 && part.chars().all(char::is_alphabetic) {
                continue;
            }
            tokens.push(stemmer.stem(part).into_owned());
        }
    }
    tokens
}

fn split_elisions(word: &str, lang: Language) -> Vec<&str> {
    if lang == Language::Fr && word.contains('\'') {
        word.split('\'').collect()
    } else {
        vec![word]
    }
}

/// Full preprocessing pipeline: detection, cleanup, lemma tokenization.
pub fn normalize(text: &str) -> NormalizedQuery {
    let language = detect_language(text);
    let cleaned_text = clean_text(text, language);
    let tokens = lemmatize(&cleaned_text, language);
    NormalizedQuery {
        language,
        cleaned_text,
        tokens,
    }
}
