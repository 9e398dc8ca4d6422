pub mod embeddings;
pub mod error;
pub mod extractor;
pub mod ingest;
pub mod models;
pub mod normalizer;
pub mod ranker;
pub mod vectorizer;

pub use embeddings::{Embedder, TfIdfEmbedder, DEFAULT_EMBEDDING_FEATURES};
pub use error::{DecodeError, SearchError};
pub use extractor::decode_document;
pub use ingest::{
    discover_supported_files, load_folder_documents, DecodeReport, SkippedFile,
};
pub use models::{Document, SearchResult};
pub use normalizer::{init_lexicon, Lexicon};
pub use ranker::{search, DEFAULT_TOP_K, PHRASE_BOOST};
pub use vectorizer::{TfIdfVector, VectorModel};
