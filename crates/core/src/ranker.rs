//! Query-time ranking: cosine similarity over a freshly fitted TF-IDF model
//! plus an exact-phrase boost.
//!
//! Every call fits its own vocabulary and discards it on return. That trades
//! index reuse for statelessness: calls share nothing mutable and may run in
//! parallel without coordination.

use crate::error::{Result, SearchError};
use crate::models::{Document, SearchResult};
use crate::normalizer::init_lexicon;
use crate::vectorizer::VectorModel;

pub const DEFAULT_TOP_K: usize = 10;

/// Added to the cosine score when the raw query is a case-insensitive
/// literal substring of the raw document content. Cosine over small n-grams
/// cannot tell "contains the exact phrase" from "contains the same words
/// elsewhere"; the boost recovers exact-match relevance.
pub const PHRASE_BOOST: f64 = 0.3;

/// Rank `documents` against `query` and return at most `top_k` results with
/// strictly positive combined scores, in descending score order (ties keep
/// input order).
///
/// Fails fast on malformed input before any vectorization: a blank query or
/// a document with an empty id is rejected outright. An empty document list
/// is not an error; it returns no results for any query, without fitting a
/// model or even validating the query.
pub fn search(documents: &[Document], query: &str, top_k: usize) -> Result<Vec<SearchResult>> {
    if documents.is_empty() {
        return Ok(Vec::new());
    }
    if query.trim().is_empty() {
        return Err(SearchError::InvalidArgument(
            "query must not be blank".to_string(),
        ));
    }
    if let Some(position) = documents.iter().position(|document| document.id.is_empty()) {
        return Err(SearchError::InvalidArgument(format!(
            "document at position {position} has an empty id"
        )));
    }

    let lexicon = init_lexicon()?;
    let corpus: Vec<Vec<String>> = documents
        .iter()
        .map(|document| lexicon.normalize(&document.content))
        .collect();

    let model = VectorModel::fit(&corpus, None);
    let query_vector = model.transform(&lexicon.normalize(query));
    let query_lowered = query.to_lowercase();

    let mut results = Vec::new();
    for (document, tokens) in documents.iter().zip(&corpus) {
        // Both vectors are L2-normalized, so cosine similarity reduces to
        // the dot product; a zero vector on either side scores 0.
        let similarity = model.transform(tokens).dot(&query_vector);
        let boost = if document
            .content
            .to_lowercase()
            .contains(&query_lowered)
        {
            PHRASE_BOOST
        } else {
            0.0
        };

        let score = (similarity + boost).min(1.0);
        if score > 0.0 {
            results.push(SearchResult::from_document(document, score));
        }
    }

    // Stable sort: equal scores keep original document order.
    results.sort_by(|left, right| right.score.total_cmp(&left.score));
    results.truncate(top_k);
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::{search, DEFAULT_TOP_K, PHRASE_BOOST};
    use crate::models::Document;

    fn document(id: &str, title: &str, content: &str) -> Document {
        Document {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            tags: Vec::new(),
        }
    }

    #[test]
    fn empty_document_list_returns_no_results() {
        let results = search(&[], "anything", DEFAULT_TOP_K).expect("search should succeed");
        assert!(results.is_empty());
    }

    #[test]
    fn empty_document_list_returns_no_results_even_for_blank_queries() {
        // The empty-corpus early return comes before query validation.
        let results = search(&[], "   ", DEFAULT_TOP_K).expect("search should succeed");
        assert!(results.is_empty());

        let results = search(&[], "", 0).expect("search should succeed");
        assert!(results.is_empty());
    }

    #[test]
    fn blank_query_is_rejected() {
        let documents = vec![document("1", "A", "some content")];
        assert!(search(&documents, "   ", DEFAULT_TOP_K).is_err());
    }

    #[test]
    fn empty_document_id_is_rejected() {
        let documents = vec![document("", "A", "some content")];
        assert!(search(&documents, "content", DEFAULT_TOP_K).is_err());
    }

    #[test]
    fn shared_terms_rank_and_unrelated_documents_are_excluded() {
        let documents = vec![
            document("1", "A", "the quick brown fox"),
            document("2", "B", "lazy dog sleeps"),
        ];

        let results =
            search(&documents, "quick fox", DEFAULT_TOP_K).expect("search should succeed");

        // "quick fox" is not a contiguous substring of either document, so
        // no phrase boost applies; document 2 shares no vocabulary at all.
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "1");
        assert!(results[0].score > 0.0);
        assert!(results[0].score <= 1.0);
    }

    #[test]
    fn exact_phrase_match_is_boosted() {
        let documents = vec![
            document("1", "A", "Rust makes systems programming approachable"),
            document("2", "B", "programming approachable systems rust makes"),
        ];

        let results = search(&documents, "systems programming", DEFAULT_TOP_K)
            .expect("search should succeed");

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "1");
        assert!(results[0].score > results[1].score);
        assert!(results[0].score >= PHRASE_BOOST);
    }

    #[test]
    fn phrase_boost_is_case_insensitive_and_capped_at_one() {
        let documents = vec![document("1", "A", "Exact Phrase Here")];
        let results =
            search(&documents, "exact phrase here", DEFAULT_TOP_K).expect("search should succeed");

        assert_eq!(results.len(), 1);
        // Full-content match gives cosine 1.0; the boost must not push the
        // combined score past the cap.
        assert!(results[0].score <= 1.0);
        assert!((results[0].score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn scores_are_sorted_descending_with_stable_ties() {
        let documents = vec![
            document("1", "A", "shared words only"),
            document("2", "B", "shared words only"),
            document("3", "C", "completely different text"),
        ];

        let results =
            search(&documents, "shared words", DEFAULT_TOP_K).expect("search should succeed");

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "1");
        assert_eq!(results[1].id, "2");
        assert!((results[0].score - results[1].score).abs() < 1e-12);
    }

    #[test]
    fn top_k_truncates_results() {
        let documents = vec![
            document("1", "A", "apple pie recipe"),
            document("2", "B", "apple tart recipe"),
            document("3", "C", "apple crumble recipe"),
        ];

        let results = search(&documents, "apple recipe", 2).expect("search should succeed");
        assert_eq!(results.len(), 2);

        let all = search(&documents, "apple recipe", DEFAULT_TOP_K).expect("search should succeed");
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn zero_top_k_returns_nothing() {
        let documents = vec![document("1", "A", "apple pie")];
        let results = search(&documents, "apple", 0).expect("search should succeed");
        assert!(results.is_empty());
    }

    #[test]
    fn all_empty_content_yields_empty_result_set() {
        let documents = vec![document("1", "A", ""), document("2", "B", "")];
        let results = search(&documents, "anything", DEFAULT_TOP_K).expect("search should succeed");
        assert!(results.is_empty());
    }

    #[test]
    fn tags_are_carried_through_to_results() {
        let mut doc = document("1", "A", "tagged content here");
        doc.tags = vec!["alpha".to_string(), "beta".to_string()];

        let results =
            search(&[doc], "tagged content", DEFAULT_TOP_K).expect("search should succeed");
        assert_eq!(results[0].tags, vec!["alpha", "beta"]);
    }
}
