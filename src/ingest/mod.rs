// Text ingestion - everything that turns an outside source into tokens.
//
// Tokenization is plain whitespace splitting; punctuation stays attached
// to its word. The engine flashes whatever it is given and never re-reads
// the source.

use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod clipboard;
pub mod epub;
pub mod pdf;
pub mod text;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("PDF parse error: {0}")]
    PdfParse(String),

    #[error("EPUB parse error: {0}")]
    EpubParse(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Unsupported format: {0} (expected .txt, .pdf or .epub)")]
    UnsupportedFormat(String),

    #[error("No readable text in {0}")]
    EmptyDocument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct LoadedDocument {
    pub tokens: Vec<String>,
    pub source: String,
}

/// Split raw text into display tokens on runs of whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Load a file, dispatching on its extension.
pub fn load_path(path: &str) -> Result<LoadedDocument, LoadError> {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("txt") => text::load(path),
        Some("pdf") => pdf::load(path),
        Some("epub") => epub::load(path),
        _ => Err(LoadError::UnsupportedFormat(path.to_string())),
    }
}
