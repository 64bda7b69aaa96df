//! Question-answer coverage.
//!
//! A pair passes when its expected answer occurs, case-insensitively,
//! anywhere in the reference text. The question itself is informational.

/// A question with the substring its answer must contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QaPair {
    pub question: &'static str,
    pub answer: &'static str,
}

/// Built-in checks against the project's sample corpus and documentation.
pub const DEFAULT_QA_PAIRS: &[QaPair] = &[
    QaPair {
        question: "Что такое SMDaI?",
        answer: "технология декодирования",
    },
    QaPair {
        question: "Как называется проектная доска по умолчанию?",
        answer: "SMDaI Board",
    },
    QaPair {
        question: "Какой секрет Actions хранит URL проекта?",
        answer: "PROJECT_URL",
    },
];

/// Fraction of `pairs` answered by `texts`, 0 without text or pairs.
pub fn qa_accuracy<S: AsRef<str>>(texts: &[S], pairs: &[QaPair]) -> f64 {
    if texts.is_empty() || pairs.is_empty() {
        return 0.0;
    }

    let reference = texts
        .iter()
        .map(|t| t.as_ref())
        .collect::<Vec<&str>>()
        .join("\n")
        .to_lowercase();

    let hits = pairs
        .iter()
        .filter(|pair| reference.contains(&pair.answer.to_lowercase()))
        .count();
    hits as f64 / pairs.len() as f64
}
