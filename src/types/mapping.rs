use serde::Serialize;

/// One pending write of a display string into a single worksheet cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellMapping {
    /// Canonical single-cell address, e.g. `"C10"`.
    pub cell: String,
    /// Unescaped display text.
    pub value: String,
    /// Diagnostic tag (question id or error-row field).
    pub label: String,
}

impl CellMapping {
    pub fn new(cell: impl Into<String>, value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            cell: cell.into(),
            value: value.into(),
            label: label.into(),
        }
    }
}
