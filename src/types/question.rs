use serde::{Deserialize, Serialize};

/// Declared type of a question, as configured in the form metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    #[default]
    Text,
    Number,
    Date,
    /// Plain two-state toggle.
    #[serde(alias = "toggle", alias = "switch", alias = "checkbox", alias = "bool")]
    Boolean,
    #[serde(alias = "tristate")]
    YesNoNa,
    Calculated,
    Choice,
    #[serde(other)]
    Other,
}

impl QuestionType {
    pub fn is_toggle(self) -> bool {
        self == QuestionType::Boolean
    }
}

/// Read-only question metadata supplied by the surrounding application.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDescriptor {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: QuestionType,
    /// A single address (`"C10"`) or a multi-cell matrix
    /// (`"A1;A2,B1,C1"`: yes-cells, no-cells, optional na-cells).
    #[serde(default, alias = "cell_reference")]
    pub cell_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl QuestionDescriptor {
    pub fn new(id: impl Into<String>, kind: QuestionType, cell_reference: &str) -> Self {
        Self {
            id: id.into(),
            kind,
            cell_reference: Some(cell_reference.to_string()),
            title: None,
        }
    }

    /// The configured reference, if any non-blank one exists.
    pub fn configured_reference(&self) -> Option<&str> {
        self.cell_reference
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }
}
