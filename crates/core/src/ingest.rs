//! Folder ingestion: discover supported files and decode them into
//! caller-owned `Document`s, best-effort.

use crate::error::SearchError;
use crate::extractor::{decode_document, IMAGE_EXTENSIONS};
use crate::models::Document;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

const TEXT_EXTENSIONS: [&str; 6] = ["pdf", "txt", "md", "text", "csv", "docx"];

fn is_supported_extension(ext: &str) -> bool {
    TEXT_EXTENSIONS
        .iter()
        .chain(IMAGE_EXTENSIONS.iter())
        .any(|supported| supported.eq_ignore_ascii_case(ext))
}

pub fn discover_supported_files(folder: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .into_iter()
        .filter_map(|item| item.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let supported = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(is_supported_extension);

        if supported {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort_unstable();
    files
}

pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

pub struct DecodeReport {
    pub documents: Vec<Document>,
    pub skipped_files: Vec<SkippedFile>,
}

/// Decode every supported file under `folder` into a `Document` (id is the
/// SHA-256 of the path, title the file name). Files that decode to empty
/// text are reported as skipped rather than failing the whole pass.
pub fn load_folder_documents(folder: &Path) -> Result<DecodeReport, SearchError> {
    let files = discover_supported_files(folder);

    if files.is_empty() {
        return Err(SearchError::InvalidArgument(format!(
            "no supported files found in {}",
            folder.display()
        )));
    }

    let mut documents = Vec::new();
    let mut skipped_files = Vec::new();

    for path in files {
        let content = decode_document(&path);
        if content.trim().is_empty() {
            skipped_files.push(SkippedFile {
                path,
                reason: "decoded to empty text".to_string(),
            });
            continue;
        }

        let title = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_owned)
            .ok_or_else(|| {
                SearchError::InvalidArgument(format!("path missing filename: {}", path.display()))
            })?;

        debug!(path = %path.display(), bytes = content.len(), "decoded document");
        documents.push(Document {
            id: document_id(&path),
            title,
            content,
            tags: Vec::new(),
        });
    }

    Ok(DecodeReport {
        documents,
        skipped_files,
    })
}

fn document_id(path: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.to_string_lossy().as_bytes());
    format!("{:x}", hasher.finalize())
}
