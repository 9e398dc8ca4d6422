//! Standalone feature vectors for single texts.
//!
//! A degenerate single-document case of the vectorizer: the vocabulary is
//! fit from the one input text, so every document frequency is 1 and IDF
//! collapses to a constant offset, leaving the weights TF-driven. The
//! vocabulary is rebuilt per call; index assignment is not comparable
//! across invocations.

use crate::error::Result;
use crate::normalizer::init_lexicon;
use crate::vectorizer::VectorModel;

const DEFAULT: usize = 300;

pub const DEFAULT_EMBEDDING_FEATURES: usize = DEFAULT;

pub trait Embedder {
    fn max_features(&self) -> usize;
    fn embed(&self, text: &str) -> Result<Vec<f64>>;
}

#[derive(Debug, Clone, Copy)]
pub struct TfIdfEmbedder {
    pub max_features: usize,
}

impl Default for TfIdfEmbedder {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_EMBEDDING_FEATURES,
        }
    }
}

impl Embedder for TfIdfEmbedder {
    fn max_features(&self) -> usize {
        self.max_features
    }

    /// Dense L2-normalized TF-IDF vector for `text`. Length equals the
    /// realized vocabulary size, at most `max_features`; empty text yields
    /// an empty vector.
    fn embed(&self, text: &str) -> Result<Vec<f64>> {
        let lexicon = init_lexicon()?;
        let tokens = lexicon.normalize(text);
        let model = VectorModel::fit(std::slice::from_ref(&tokens), Some(self.max_features));
        Ok(model.transform(&tokens).to_dense(model.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::{Embedder, TfIdfEmbedder, DEFAULT_EMBEDDING_FEATURES};

    #[test]
    fn embedder_is_deterministic() {
        let embedder = TfIdfEmbedder::default();
        let first = embedder.embed("hydraulic pressure and flow").expect("embed");
        let second = embedder.embed("hydraulic pressure and flow").expect("embed");
        assert_eq!(first, second);
    }

    #[test]
    fn embedding_length_is_bounded_by_max_features() {
        let embedder = TfIdfEmbedder { max_features: 3 };
        let vector = embedder
            .embed("one two three four five six seven")
            .expect("embed");
        assert_eq!(vector.len(), 3);
    }

    #[test]
    fn embedding_has_unit_norm() {
        let embedder = TfIdfEmbedder::default();
        let vector = embedder.embed("cats chase birds").expect("embed");
        let norm = vector.iter().map(|w| w * w).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_text_yields_empty_vector() {
        let embedder = TfIdfEmbedder::default();
        assert!(embedder.embed("").expect("embed").is_empty());
        assert!(embedder.embed("the of and").expect("embed").is_empty());
    }

    #[test]
    fn repeated_term_outweighs_single_occurrence() {
        // "cat cat dog" keeps two unigrams after normalization; with a
        // single-document fit IDF is constant, so the TF=2 term must carry
        // the larger weight.
        let embedder = TfIdfEmbedder {
            max_features: DEFAULT_EMBEDDING_FEATURES,
        };
        let vector = embedder.embed("cat cat dog").expect("embed");

        // Vocabulary: "cat", "dog", "cat cat", "cat dog".
        assert_eq!(vector.len(), 4);
        let mut weights: Vec<f64> = vector.into_iter().filter(|w| *w > 0.0).collect();
        weights.sort_by(|a, b| b.total_cmp(a));
        assert_eq!(weights.len(), 4);
        assert!(weights[0] > weights[1]);
    }
}
