//! Regeneration options.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::language::Language;
use crate::mapping::ErrorRowLayout;

/// Smallest output accepted as a plausible document.
pub const DEFAULT_MIN_DOCUMENT_BYTES: usize = 512;

/// Knobs for one regeneration call. Every field has a default, so a JSON
/// config only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegenerateOptions {
    pub language: Language,
    /// Worksheet entry to patch. Detected from the archive when `None`.
    pub worksheet_path: Option<String>,
    pub error_rows: ErrorRowLayout,
    /// Outputs below this size are rejected as corrupt.
    pub min_document_bytes: usize,
}

impl Default for RegenerateOptions {
    fn default() -> Self {
        Self {
            language: Language::default(),
            worksheet_path: None,
            error_rows: ErrorRowLayout::default(),
            min_document_bytes: DEFAULT_MIN_DOCUMENT_BYTES,
        }
    }
}

impl RegenerateOptions {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
