use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Collected answers keyed by question id.
pub type AnswerSet = HashMap<String, AnswerValue>;

/// A single scalar answer as submitted by the form client.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

/// Tri-state answer token (`yes` / `no` / `na`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriState {
    Yes,
    No,
    NotApplicable,
}

impl TriState {
    /// Parse a token, ignoring surrounding whitespace and ASCII case.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.eq_ignore_ascii_case("yes") {
            Some(TriState::Yes)
        } else if token.eq_ignore_ascii_case("no") {
            Some(TriState::No)
        } else if token.eq_ignore_ascii_case("na") {
            Some(TriState::NotApplicable)
        } else {
            None
        }
    }
}

impl AnswerValue {
    /// Absent, `null` or whitespace-only text.
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Null => true,
            AnswerValue::Text(s) => s.trim().is_empty(),
            AnswerValue::Bool(_) | AnswerValue::Number(_) => false,
        }
    }

    /// `Some(b)` for a boolean or the strings `"true"`/`"false"`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnswerValue::Bool(b) => Some(*b),
            AnswerValue::Text(s) => {
                let s = s.trim();
                if s.eq_ignore_ascii_case("true") {
                    Some(true)
                } else if s.eq_ignore_ascii_case("false") {
                    Some(false)
                } else {
                    None
                }
            }
            AnswerValue::Null | AnswerValue::Number(_) => None,
        }
    }

    /// Truthy means `true` or `"true"`; everything else is falsy.
    pub fn is_truthy(&self) -> bool {
        self.as_bool().unwrap_or(false)
    }

    /// Tri-state token carried by a text answer.
    pub fn as_tri_state(&self) -> Option<TriState> {
        match self {
            AnswerValue::Text(s) => TriState::from_token(s),
            _ => None,
        }
    }
}

impl fmt::Display for AnswerValue {
    /// Plain string representation: integral numbers drop the `.0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Null => Ok(()),
            AnswerValue::Bool(b) => write!(f, "{b}"),
            AnswerValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                // -0.0 prints as "0"
                let n = if *n == 0.0 { 0.0 } else { *n };
                write!(f, "{n:.0}")
            }
            AnswerValue::Number(n) => write!(f, "{n}"),
            AnswerValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        AnswerValue::Text(s)
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        AnswerValue::Bool(b)
    }
}

impl From<f64> for AnswerValue {
    fn from(n: f64) -> Self {
        AnswerValue::Number(n)
    }
}

impl From<i64> for AnswerValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        AnswerValue::Number(n as f64)
    }
}
