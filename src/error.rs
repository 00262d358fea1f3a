//! Structured error types for xlfill.
//!
//! Only fatal conditions live here. Per-cell and per-answer misses are
//! absorbed by the mapping builder and patcher and surface in the
//! [`PatchReport`](crate::export::PatchReport) instead.

/// All errors that can abort a document regeneration.
#[derive(Debug, thiserror::Error)]
pub enum XlfillError {
    /// XML well-formedness error from quick-xml.
    #[error("XML parsing: {0}")]
    Xml(#[from] quick_xml::Error),

    /// ZIP archive error.
    #[error("ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// JSON input (options, answers, questions) could not be decoded.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A cell pattern failed to compile.
    #[error("Cell pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The template is structurally unusable (e.g. no worksheet entry).
    #[error("Template error: {0}")]
    Template(String),

    /// The re-serialized document is below the plausibility threshold.
    #[error("Generated document is implausibly small ({size} bytes, minimum {minimum})")]
    DocumentTooSmall { size: usize, minimum: usize },

    /// Language tag outside the supported locale table.
    #[error("Unsupported language tag: {0}")]
    UnsupportedLanguage(String),

    /// Invalid cell reference.
    #[error("Invalid cell reference: {0}")]
    CellRef(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, XlfillError>;
