//! TF-IDF vectorization over unigrams and bigrams.
//!
//! A `VectorModel` is fit once per corpus and is immutable afterward; the
//! sparse vectors it emits are independent caller-owned values. Smoothed IDF
//! (`ln((1 + docs) / (1 + df)) + 1`) keeps every weight non-negative and
//! never divides by zero.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default)]
struct TermStats {
    corpus_count: u64,
    document_frequency: u64,
}

/// Fitted vocabulary and IDF table. Each vocabulary entry owns a stable
/// index in `[0, len)` assigned at fit time.
#[derive(Debug, Clone)]
pub struct VectorModel {
    terms: Vec<String>,
    term_index: HashMap<String, usize>,
    document_frequencies: Vec<u64>,
    idf: Vec<f64>,
    document_count: usize,
}

impl VectorModel {
    /// Build a vocabulary and IDF table from normalized token sequences.
    ///
    /// The vocabulary is every distinct n-gram ranked by corpus-wide raw
    /// frequency descending; ties keep first-seen order (documents in input
    /// order, unigrams before bigrams within a document), which makes the
    /// cut under `max_features` deterministic.
    pub fn fit(corpus: &[Vec<String>], max_features: Option<usize>) -> Self {
        let mut first_seen: Vec<String> = Vec::new();
        let mut stats: HashMap<String, TermStats> = HashMap::new();

        for tokens in corpus {
            let mut in_document: HashMap<String, u64> = HashMap::new();
            for term in expand_ngrams(tokens) {
                if !stats.contains_key(&term) && !in_document.contains_key(&term) {
                    first_seen.push(term.clone());
                }
                *in_document.entry(term).or_insert(0) += 1;
            }
            for (term, count) in in_document {
                let entry = stats.entry(term).or_default();
                entry.corpus_count += count;
                entry.document_frequency += 1;
            }
        }

        let mut ranked = first_seen;
        ranked.sort_by(|a, b| {
            stats[b.as_str()]
                .corpus_count
                .cmp(&stats[a.as_str()].corpus_count)
        });
        if let Some(cap) = max_features {
            ranked.truncate(cap);
        }

        let document_count = corpus.len();
        let mut term_index = HashMap::with_capacity(ranked.len());
        let mut document_frequencies = Vec::with_capacity(ranked.len());
        let mut idf = Vec::with_capacity(ranked.len());

        for (index, term) in ranked.iter().enumerate() {
            let df = stats[term.as_str()].document_frequency;
            document_frequencies.push(df);
            idf.push((((1 + document_count) as f64) / ((1 + df) as f64)).ln() + 1.0);
            term_index.insert(term.clone(), index);
        }

        Self {
            terms: ranked,
            term_index,
            document_frequencies,
            idf,
            document_count,
        }
    }

    /// Project a token sequence into the fitted vocabulary. N-grams absent
    /// from the vocabulary contribute nothing, so rare query terms can
    /// legitimately have no effect on ranking.
    pub fn transform(&self, tokens: &[String]) -> TfIdfVector {
        let mut counts: HashMap<usize, u64> = HashMap::new();
        for term in expand_ngrams(tokens) {
            if let Some(&index) = self.term_index.get(term.as_str()) {
                *counts.entry(index).or_insert(0) += 1;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, tf)| (index, tf as f64 * self.idf[index]))
            .collect();
        entries.sort_unstable_by_key(|&(index, _)| index);

        TfIdfVector::normalized(entries)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }

    pub fn term_entry(&self, term: &str) -> Option<(usize, u64, f64)> {
        self.term_index
            .get(term)
            .map(|&index| (index, self.document_frequencies[index], self.idf[index]))
    }
}

/// Sparse L2-normalized TF-IDF vector: `(vocabulary index, weight)` pairs
/// sorted by index, weights strictly positive. The all-zero vector is the
/// empty entry list.
#[derive(Debug, Clone, PartialEq)]
pub struct TfIdfVector {
    entries: Vec<(usize, f64)>,
}

impl TfIdfVector {
    fn normalized(mut entries: Vec<(usize, f64)>) -> Self {
        let norm = entries
            .iter()
            .map(|&(_, weight)| weight * weight)
            .sum::<f64>()
            .sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut entries {
                *weight /= norm;
            }
        }
        Self { entries }
    }

    pub fn dot(&self, other: &TfIdfVector) -> f64 {
        let mut sum = 0.0;
        let mut left = self.entries.iter().peekable();
        let mut right = other.entries.iter().peekable();
        while let (Some(&&(li, lw)), Some(&&(ri, rw))) = (left.peek(), right.peek()) {
            match li.cmp(&ri) {
                std::cmp::Ordering::Less => {
                    left.next();
                }
                std::cmp::Ordering::Greater => {
                    right.next();
                }
                std::cmp::Ordering::Equal => {
                    sum += lw * rw;
                    left.next();
                    right.next();
                }
            }
        }
        sum
    }

    pub fn norm(&self) -> f64 {
        self.entries
            .iter()
            .map(|&(_, weight)| weight * weight)
            .sum::<f64>()
            .sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Zero-filled dense form, indexed by vocabulary position.
    pub fn to_dense(&self, dimensions: usize) -> Vec<f64> {
        let mut dense = vec![0.0; dimensions];
        for &(index, weight) in &self.entries {
            if index < dimensions {
                dense[index] = weight;
            }
        }
        dense
    }
}

/// Expand a token sequence into its unigrams followed by all adjacent
/// bigrams (two tokens joined by a single space).
pub(crate) fn expand_ngrams(tokens: &[String]) -> Vec<String> {
    let mut terms = Vec::with_capacity(tokens.len().saturating_mul(2));
    terms.extend(tokens.iter().cloned());
    terms.extend(
        tokens
            .windows(2)
            .map(|pair| format!("{} {}", pair[0], pair[1])),
    );
    terms
}
