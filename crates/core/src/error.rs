use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pdf parse error: {0}")]
    PdfParse(String),

    #[error("csv parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote extraction failed: {0}")]
    RemoteExtraction(String),

    #[error("unsupported file type: {0}")]
    Unsupported(String),
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("lexicon resources failed to load: {0}")]
    LexiconLoad(String),
}

pub type Result<T, E = SearchError> = std::result::Result<T, E>;
