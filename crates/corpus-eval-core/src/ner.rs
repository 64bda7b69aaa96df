//! Heuristic named-entity evaluation.
//!
//! There is no annotated gold standard. The gold set is a weak label derived
//! from the corpus itself: capitalized tokens that recur often enough. A cheap
//! capitalization recognizer is then scored against it per document, so the
//! F1 measures how consistently names are capitalized across the corpus.

use std::collections::{HashMap, HashSet};

use crate::tokenizer::{is_capitalized, tokens};

/// Weak-labelling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoldRule {
    /// A capitalized token must appear at least this many times corpus-wide.
    pub min_occurrences: usize,
    /// Tokens shorter than this many characters are never entities.
    pub min_chars: usize,
}

impl Default for GoldRule {
    fn default() -> Self {
        Self {
            min_occurrences: 2,
            min_chars: 2,
        }
    }
}

impl GoldRule {
    /// Whether `token` is shaped like an entity under this rule.
    pub fn admits(&self, token: &str) -> bool {
        token.chars().count() >= self.min_chars && is_capitalized(token)
    }
}

/// Entity predicted at a token position. Only `text` takes part in scoring.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntitySpan {
    pub index: usize,
    pub text: String,
}

/// Precision, recall and F1 from accumulated counts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PrfScore {
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl PrfScore {
    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    pub fn f1(&self) -> f64 {
        f1(self.precision(), self.recall())
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Harmonic mean of precision and recall, 0 when both are 0.
pub fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

/// Derive the gold entity set from corpus-wide capitalized token frequency.
pub fn derive_gold_entities<S: AsRef<str>>(texts: &[S], rule: GoldRule) -> HashSet<String> {
    let mut freq: HashMap<&str, usize> = HashMap::new();
    for text in texts {
        for token in tokens(text.as_ref()).filter(|t| rule.admits(t)) {
            *freq.entry(token).or_default() += 1;
        }
    }
    freq.into_iter()
        .filter(|(_, count)| *count >= rule.min_occurrences)
        .map(|(token, _)| token.to_string())
        .collect()
}

/// Flag every capitalized token of `text` as an entity.
pub fn recognize_entities(text: &str, rule: GoldRule) -> Vec<EntitySpan> {
    tokens(text)
        .enumerate()
        .filter(|(_, token)| rule.admits(token))
        .map(|(index, token)| EntitySpan {
            index,
            text: token.to_string(),
        })
        .collect()
}

/// Score per-document predictions against the corpus-derived gold set.
pub fn score_entities<S: AsRef<str>>(texts: &[S], rule: GoldRule) -> PrfScore {
    let gold = derive_gold_entities(texts, rule);
    let mut score = PrfScore::default();

    for text in texts {
        let predicted: HashSet<String> = recognize_entities(text.as_ref(), rule)
            .into_iter()
            .map(|span| span.text)
            .collect();
        score.true_positives += predicted.intersection(&gold).count();
        score.false_positives += predicted.difference(&gold).count();
        score.false_negatives += gold.difference(&predicted).count();
    }

    score
}

/// NER F1 for the corpus, 0 when there are no documents.
pub fn ner_f1<S: AsRef<str>>(texts: &[S]) -> f64 {
    if texts.is_empty() {
        return 0.0;
    }
    score_entities(texts, GoldRule::default()).f1()
}
