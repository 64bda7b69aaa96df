//! Lexical retrieval evaluation.
//!
//! A stand-in for embedding search quality: every document becomes a set of
//! lowercase tokens, the corpus' most frequent tokens are issued as queries,
//! documents are scored by IDF-weighted overlap, and NDCG@10 is averaged over
//! the queries with binary relevance (score > 0).
//!
//! By default NDCG is computed over documents in load order, not score
//! order. [`RetrievalEvaluator::rank_by_score`] switches to ranking by score.

use std::collections::{HashMap, HashSet};

use crate::tokenizer::tokens;

/// Number of synthetic queries drawn from the corpus.
pub const QUERY_COUNT: usize = 3;

/// Rank cutoff for NDCG.
pub const NDCG_K: usize = 10;

/// Presence index for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    tokens: HashSet<String>,
}

impl TokenSet {
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Document frequencies, remembering first-encounter order for tie breaks.
#[derive(Debug, Clone, Default)]
pub struct DocumentFrequency {
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl DocumentFrequency {
    fn record(&mut self, token: &str) {
        match self.counts.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                self.order.push(token.to_string());
                self.counts.insert(token.to_string(), 1);
            }
        }
    }

    /// Number of indexed documents containing `token`.
    pub fn get(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The `n` most frequent tokens, ties kept in encounter order.
    pub fn most_common(&self, n: usize) -> Vec<&str> {
        let mut ranked: Vec<(&str, usize)> = self
            .order
            .iter()
            .map(|t| (t.as_str(), self.counts[t]))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().take(n).map(|(t, _)| t).collect()
    }
}

/// Token-set index over a corpus.
#[derive(Debug, Clone, Default)]
pub struct RetrievalIndex {
    docs: Vec<TokenSet>,
    df: DocumentFrequency,
}

impl RetrievalIndex {
    /// Index `texts` in order. Documents without tokens are left out.
    pub fn build<S: AsRef<str>>(texts: &[S]) -> Self {
        let mut index = Self::default();
        for text in texts {
            let lowered = text.as_ref().to_lowercase();
            let mut set = HashSet::new();
            for token in tokens(&lowered) {
                if set.insert(token.to_string()) {
                    index.df.record(token);
                }
            }
            if !set.is_empty() {
                index.docs.push(TokenSet { tokens: set });
            }
        }
        index
    }

    pub fn documents(&self) -> &[TokenSet] {
        &self.docs
    }

    pub fn document_frequency(&self) -> &DocumentFrequency {
        &self.df
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// IDF-weighted overlap: each distinct query token found in `doc` adds `1 / df`.
    pub fn score(&self, query: &str, doc: &TokenSet) -> f64 {
        let lowered = query.to_lowercase();
        let query_tokens: HashSet<&str> = tokens(&lowered).collect();
        query_tokens
            .into_iter()
            .filter(|t| doc.contains(t))
            .map(|t| self.df.get(t))
            .filter(|&df| df > 0)
            .map(|df| 1.0 / df as f64)
            .sum()
    }
}

/// NDCG over the first `k` relevance grades, 0 when nothing is relevant.
pub fn ndcg_at_k(relevances: &[u32], k: usize) -> f64 {
    let top = &relevances[..relevances.len().min(k)];
    let mut ideal = top.to_vec();
    ideal.sort_unstable_by(|a, b| b.cmp(a));

    let idcg = dcg(&ideal);
    if idcg == 0.0 {
        0.0
    } else {
        dcg(top) / idcg
    }
}

fn dcg(relevances: &[u32]) -> f64 {
    relevances
        .iter()
        .enumerate()
        .filter(|&(_, &rel)| rel > 0)
        .map(|(rank, &rel)| rel as f64 / (rank as f64 + 2.0).log2())
        .sum()
}

/// Retrieval evaluator settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrievalEvaluator {
    pub queries: usize,
    pub k: usize,
    pub rank_by_score: bool,
}

impl Default for RetrievalEvaluator {
    fn default() -> Self {
        Self {
            queries: QUERY_COUNT,
            k: NDCG_K,
            rank_by_score: false,
        }
    }
}

impl RetrievalEvaluator {
    pub fn rank_by_score(mut self, enabled: bool) -> Self {
        self.rank_by_score = enabled;
        self
    }

    /// Mean NDCG@k over the corpus' most frequent tokens used as queries.
    pub fn evaluate<S: AsRef<str>>(&self, texts: &[S]) -> f64 {
        let index = RetrievalIndex::build(texts);
        if index.is_empty() || index.document_frequency().is_empty() {
            return 0.0;
        }

        let queries = index.document_frequency().most_common(self.queries);
        if queries.is_empty() {
            return 0.0;
        }

        let total: f64 = queries
            .iter()
            .map(|query| self.query_ndcg(&index, query))
            .sum();
        total / queries.len() as f64
    }

    fn query_ndcg(&self, index: &RetrievalIndex, query: &str) -> f64 {
        let mut scored: Vec<f64> = index
            .documents()
            .iter()
            .map(|doc| index.score(query, doc))
            .collect();
        if self.rank_by_score {
            scored.sort_by(|a, b| b.total_cmp(a));
        }
        let relevances: Vec<u32> = scored.iter().map(|&s| u32::from(s > 0.0)).collect();
        ndcg_at_k(&relevances, self.k)
    }
}

/// Mean NDCG@10 in load order.
pub fn search_ndcg_at_10<S: AsRef<str>>(texts: &[S]) -> f64 {
    RetrievalEvaluator::default().evaluate(texts)
}
