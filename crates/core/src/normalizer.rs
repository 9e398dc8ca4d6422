//! Text normalization: lowercasing, Unicode word segmentation, stopword
//! removal, and Porter stemming.
//!
//! Tokenization follows UAX-29 word boundaries (`unicode_words`): punctuation
//! never survives, apostrophes inside a word are kept ("don't" stays one
//! token), hyphens split compounds, and numerals are kept. Stemming is the
//! only canonicalization used by this crate; vocabularies built here are not
//! compatible with lemmatized token streams.

use crate::error::SearchError;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

const STOPWORDS_EN: &str = include_str!("../resources/stopwords_en.txt");

static LEXICON: OnceLock<Lexicon> = OnceLock::new();

/// Process-wide read-only language resources: the English stopword set and
/// the Porter stemmer. Loaded once; never mutated afterward, so concurrent
/// reads need no synchronization.
pub struct Lexicon {
    stopwords: HashSet<String>,
    stemmer: Stemmer,
}

impl Lexicon {
    fn load() -> Result<Self, SearchError> {
        let stopwords: HashSet<String> = STOPWORDS_EN
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_owned)
            .collect();

        if stopwords.is_empty() {
            return Err(SearchError::LexiconLoad(
                "embedded stopword list has no entries".to_string(),
            ));
        }

        Ok(Self {
            stopwords,
            stemmer: Stemmer::create(Algorithm::English),
        })
    }

    /// Turn free text into an ordered token sequence: lowercase, segment on
    /// Unicode word boundaries, drop stopwords, stem the rest. Pure; order is
    /// preserved so callers can build bigrams from adjacent tokens.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        lowered
            .unicode_words()
            .filter(|word| !self.stopwords.contains(*word))
            .map(|word| self.stemmer.stem(word).to_string())
            .collect()
    }

}

/// Load the lexicon into process-wide state, or return it if already loaded.
/// Must complete before any normalization; a load failure is fatal to the
/// caller rather than degrading to un-normalized tokens.
pub fn init_lexicon() -> Result<&'static Lexicon, SearchError> {
    if let Some(lexicon) = LEXICON.get() {
        return Ok(lexicon);
    }
    let lexicon = Lexicon::load()?;
    Ok(LEXICON.get_or_init(|| lexicon))
}
