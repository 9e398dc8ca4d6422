use serde::{Deserialize, Serialize};

/// A caller-supplied document. The core never mutates it; `content` is the
/// only field that participates in ranking, the rest is carried through to
/// results verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One ranked hit. `score` combines cosine similarity with the exact-phrase
/// boost and always lies in (0, 1]; zero-score documents are never returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub score: f64,
}

impl SearchResult {
    pub fn from_document(document: &Document, score: f64) -> Self {
        Self {
            id: document.id.clone(),
            title: document.title.clone(),
            content: document.content.clone(),
            tags: document.tags.clone(),
            score,
        }
    }
}
