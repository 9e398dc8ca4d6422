//! Mixed-format text extraction, dispatched on file extension.
//!
//! The search core treats decoding as a collaborator that only ever hands it
//! plain text: `decode_document` never fails outward. Any extraction problem
//! is logged and collapses to the empty string, which the core accepts as a
//! valid (empty) document.

use crate::error::DecodeError;
use base64::{engine::general_purpose::STANDARD, Engine};
use lopdf::Document as PdfDocument;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "tiff", "gif"];

#[derive(Debug, Clone, Serialize)]
struct RemoteExtractRequest {
    file_base64: String,
    source_path: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RemoteExtractResponse {
    text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OcrEndpointConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
}

/// Decode a file into raw text. Infallible by contract: on any failure the
/// diagnostic is logged and the empty string is returned.
pub fn decode_document(path: &Path) -> String {
    match try_decode(path) {
        Ok(text) => text,
        Err(error) => {
            warn!(path = %path.display(), error = %error, "decode failed, treating document as empty");
            String::new()
        }
    }
}

pub fn try_decode(path: &Path) -> Result<String, DecodeError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => decode_pdf(path),
        "txt" | "md" | "text" => Ok(std::fs::read_to_string(path)?),
        "csv" => decode_csv(path),
        "docx" => decode_via_remote(path),
        ext if IMAGE_EXTENSIONS.contains(&ext) => decode_via_remote(path),
        other => Err(DecodeError::Unsupported(format!(
            "no decoder for extension {:?}: {}",
            other,
            path.display()
        ))),
    }
}

fn decode_pdf(path: &Path) -> Result<String, DecodeError> {
    let document =
        PdfDocument::load(path).map_err(|error| DecodeError::PdfParse(error.to_string()))?;

    let mut pages = Vec::new();
    for (page_no, _page_id) in document.get_pages() {
        let text = document
            .extract_text(&[page_no])
            .map_err(|error| DecodeError::PdfParse(error.to_string()))?;

        if !text.trim().is_empty() {
            pages.push(text);
        }
    }

    if pages.is_empty() {
        return Err(DecodeError::PdfParse(format!(
            "pdf had no readable page text: {}",
            path.display()
        )));
    }

    Ok(pages.join("\n"))
}

fn decode_csv(path: &Path) -> Result<String, DecodeError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut lines = Vec::new();
    for record in reader.records() {
        let record = record?;
        lines.push(record.iter().collect::<Vec<_>>().join(" "));
    }

    Ok(lines.join("\n"))
}

fn parse_ocr_config() -> Option<OcrEndpointConfig> {
    let endpoint = std::env::var("OCR_ENDPOINT").ok()?;
    let endpoint = endpoint.trim().to_string();
    if endpoint.is_empty() {
        return None;
    }

    let api_key = std::env::var("OCR_API_KEY").ok().and_then(|value| {
        let key = value.trim().to_string();
        if key.is_empty() {
            None
        } else {
            Some(key)
        }
    });

    Some(OcrEndpointConfig { endpoint, api_key })
}

/// Images and DOCX go through a remote extraction endpoint configured via
/// `OCR_ENDPOINT` / `OCR_API_KEY`; the file is posted base64-encoded and the
/// response carries the recognized text.
fn decode_via_remote(path: &Path) -> Result<String, DecodeError> {
    let cfg = parse_ocr_config().ok_or_else(|| {
        DecodeError::Unsupported(format!(
            "OCR_ENDPOINT is not configured, cannot decode {}",
            path.display()
        ))
    })?;

    let bytes = std::fs::read(path).map_err(DecodeError::Io)?;
    let payload = RemoteExtractRequest {
        file_base64: STANDARD.encode(bytes),
        source_path: path.to_string_lossy().to_string(),
    };

    let mut request = Client::new()
        .post(&cfg.endpoint)
        .header("content-type", "application/json")
        .json(&payload);

    if let Some(api_key) = cfg.api_key {
        request = request.bearer_auth(api_key);
    }

    let response = request.send()?;

    if !response.status().is_success() {
        return Err(DecodeError::RemoteExtraction(format!(
            "extraction request to {} returned {}",
            cfg.endpoint,
            response.status()
        )));
    }

    let payload: RemoteExtractResponse = response.json()?;
    response_text(&payload, path)
}

fn response_text(payload: &RemoteExtractResponse, path: &Path) -> Result<String, DecodeError> {
    let text = payload
        .text
        .as_ref()
        .map(|value| value.trim().to_string())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(DecodeError::RemoteExtraction(format!(
            "extraction response had no readable text: {}",
            path.display()
        )));
    }

    Ok(text)
}
