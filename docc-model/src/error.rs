//! Error types for loading `DocC` documents.

/// Errors that can occur while loading a document.
///
/// Only the JSON syntax and the underlying reader can fail. A well-formed JSON
/// value of any shape always decodes into a [`Document`](crate::Document).
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
