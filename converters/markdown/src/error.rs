//! Error types for the Markdown converter.

/// Errors that can occur around Markdown conversion.
///
/// Rendering itself never fails; these cover loading the document and writing
/// the output.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input could not be loaded as a document.
    #[error("Model error: {0}")]
    Model(#[from] docc_model::Error),
}
