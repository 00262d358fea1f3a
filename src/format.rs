//! Answer display formatting.
//!
//! Turns a raw answer into the text printed in a single cell. Booleans and
//! tri-state tokens are localized; everything else passes through unchanged.

use crate::language::Language;
use crate::types::{AnswerValue, TriState};

/// Format an answer for display in `language`.
///
/// - `true`/`"true"` and `false`/`"false"` map to the affirmative/negative word
/// - `yes`/`no`/`na` map to the localized token (`na` is always `N/A`)
/// - `null` yields an empty string
/// - anything else is its plain string representation
pub fn format_answer(value: &AnswerValue, language: Language) -> String {
    let locale = language.locale();

    if let Some(b) = value.as_bool() {
        return if b { locale.affirmative } else { locale.negative }.to_string();
    }

    match value.as_tri_state() {
        Some(TriState::Yes) => locale.affirmative.to_string(),
        Some(TriState::No) => locale.negative.to_string(),
        Some(TriState::NotApplicable) => locale.not_applicable.to_string(),
        None => value.to_string(),
    }
}
