use serde::{Deserialize, Serialize};

/// Severity of a recorded inspection error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[serde(alias = "high")]
    Critical,
    #[serde(alias = "moderate")]
    Medium,
    #[serde(alias = "minor")]
    Low,
}

/// An inspection error to be listed in the document's error table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Caller-side ordinal. The printed number is the record's position in
    /// the list instead, so gaps or duplicates here never reach the sheet.
    #[serde(default)]
    pub ordinal: Option<u32>,
    pub description: String,
    pub severity: Severity,
}

impl ErrorRecord {
    pub fn new(description: impl Into<String>, severity: Severity) -> Self {
        Self {
            ordinal: None,
            description: description.into(),
            severity,
        }
    }
}
