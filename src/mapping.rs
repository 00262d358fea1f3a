//! Cell-mapping builder.
//!
//! Turns an answer set plus question metadata into an ordered list of
//! [`CellMapping`] writes. The per-question policy is decided once by
//! [`CellStrategy::classify`]:
//!
//! 1. no configured reference -> no strategy (question skipped)
//! 2. reference contains a comma -> [`CellStrategy::MultiCellTriState`],
//!    whatever the declared type says
//! 3. declared type is a toggle -> [`CellStrategy::SingleCellToggle`]
//! 4. otherwise -> [`CellStrategy::Default`]

use serde::{Deserialize, Serialize};

use crate::cell_ref::{cell_address, normalize_cell_ref, parse_column};
use crate::error::{Result, XlfillError};
use crate::format::format_answer;
use crate::language::Language;
use crate::types::{AnswerSet, AnswerValue, CellMapping, ErrorRecord, QuestionDescriptor, TriState};

/// Mark written into selected cells of a multi-cell matrix and truthy toggles.
pub const MARK_SELECTED: &str = "X";
/// Mark written for a falsy toggle.
pub const MARK_UNSELECTED: &str = "-";

/// Cell groups of a yes/no/na matrix.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TriStateCells {
    pub yes: Vec<String>,
    pub no: Vec<String>,
    /// `None` when the reference only carries two branches.
    pub na: Option<Vec<String>>,
}

impl TriStateCells {
    /// Parse `"A1;A2,B1,C1"` into its branches.
    ///
    /// Returns `None` unless there are exactly 2 or 3 comma-separated
    /// branches. Blank entries inside a branch are ignored; malformed
    /// addresses are dropped with a warning.
    pub fn parse(reference: &str) -> Option<Self> {
        let branches: Vec<Vec<String>> = reference.split(',').map(parse_branch).collect();
        let mut branches = branches.into_iter();
        let (yes, no, na) = match (branches.next(), branches.next(), branches.next()) {
            (Some(yes), Some(no), na) => (yes, no, na),
            _ => return None,
        };
        if branches.next().is_some() {
            return None;
        }
        Some(Self { yes, no, na })
    }

    /// Cells belonging to the branch selected by `state`.
    pub fn branch(&self, state: TriState) -> &[String] {
        match state {
            TriState::Yes => &self.yes,
            TriState::No => &self.no,
            TriState::NotApplicable => self.na.as_deref().unwrap_or(&[]),
        }
    }
}

fn parse_branch(branch: &str) -> Vec<String> {
    branch
        .split(';')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .filter_map(|cell| {
            let normalized = normalize_cell_ref(cell);
            if normalized.is_none() {
                log::warn!("ignoring malformed cell address {cell:?} in multi-cell reference");
            }
            normalized
        })
        .collect()
}

/// How one question's answer reaches the worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellStrategy {
    /// Yes/no/na matrix: the selected branch's cells get `X`.
    MultiCellTriState(TriStateCells),
    /// Two-state toggle in one cell: `X` or `-`.
    SingleCellToggle(String),
    /// Formatted answer text in one cell.
    Default(String),
}

impl CellStrategy {
    /// Decide the write policy for a question.
    ///
    /// `None` means the question has nothing to write to: no reference, a
    /// malformed single address, or a matrix without 2-3 branches.
    pub fn classify(question: &QuestionDescriptor) -> Option<Self> {
        let reference = question.configured_reference()?;

        if reference.contains(',') {
            let cells = TriStateCells::parse(reference);
            if cells.is_none() {
                log::warn!(
                    "question {}: multi-cell reference {reference:?} must have 2 or 3 branches",
                    question.id
                );
            }
            return cells.map(CellStrategy::MultiCellTriState);
        }

        let Some(cell) = normalize_cell_ref(reference) else {
            log::warn!(
                "question {}: malformed cell reference {reference:?}",
                question.id
            );
            return None;
        };

        if question.kind.is_toggle() {
            Some(CellStrategy::SingleCellToggle(cell))
        } else {
            Some(CellStrategy::Default(cell))
        }
    }

    /// Append the writes for `value` to `out`.
    pub fn apply(&self, label: &str, value: &AnswerValue, language: Language, out: &mut Vec<CellMapping>) {
        match self {
            CellStrategy::MultiCellTriState(cells) => {
                let state = value.as_tri_state().or_else(|| {
                    value
                        .as_bool()
                        .map(|b| if b { TriState::Yes } else { TriState::No })
                });
                if let Some(state) = state {
                    out.extend(
                        cells
                            .branch(state)
                            .iter()
                            .map(|cell| CellMapping::new(cell.as_str(), MARK_SELECTED, label)),
                    );
                }
            }
            CellStrategy::SingleCellToggle(cell) => {
                let mark = if value.is_truthy() {
                    MARK_SELECTED
                } else {
                    MARK_UNSELECTED
                };
                out.push(CellMapping::new(cell.as_str(), mark, label));
            }
            CellStrategy::Default(cell) => {
                out.push(CellMapping::new(
                    cell.as_str(),
                    format_answer(value, language),
                    label,
                ));
            }
        }
    }
}

/// Build the ordered write list for every question that has both a
/// configured reference and a non-empty answer.
///
/// Output order follows `questions`. Answers without a descriptor are ignored.
pub fn build_cell_mappings(
    answers: &AnswerSet,
    questions: &[QuestionDescriptor],
    language: Language,
) -> Vec<CellMapping> {
    let mut mappings = Vec::new();

    for question in questions {
        let Some(value) = answers.get(&question.id) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        let Some(strategy) = CellStrategy::classify(question) else {
            continue;
        };
        strategy.apply(&question.id, value, language, &mut mappings);
    }

    log::debug!(
        "built {} cell mappings from {} questions ({} answers)",
        mappings.len(),
        questions.len(),
        answers.len()
    );
    mappings
}

/// Where the error table lives in the worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ErrorRowLayout {
    /// 1-based row of the first error record.
    pub base_row: u32,
    pub number_column: String,
    pub description_column: String,
    pub severity_column: String,
}

impl Default for ErrorRowLayout {
    fn default() -> Self {
        Self {
            base_row: 30,
            number_column: "A".to_string(),
            description_column: "B".to_string(),
            severity_column: "H".to_string(),
        }
    }
}

/// Writes for the error table: record `i` lands on row `base_row + i` with
/// its 1-based position, description and localized severity label.
pub fn build_error_rows(
    errors: &[ErrorRecord],
    language: Language,
    layout: &ErrorRowLayout,
) -> Result<Vec<CellMapping>> {
    let column = |name: &str| {
        parse_column(name)
            .ok_or_else(|| XlfillError::CellRef(format!("invalid error-table column {name:?}")))
    };
    let number_col = column(&layout.number_column)?;
    let description_col = column(&layout.description_column)?;
    let severity_col = column(&layout.severity_column)?;

    if layout.base_row == 0 {
        return Err(XlfillError::CellRef("error-table base row must be 1 or greater".into()));
    }

    let mut mappings = Vec::with_capacity(errors.len() * 3);
    for (index, record) in errors.iter().enumerate() {
        let offset = u32::try_from(index)
            .map_err(|_| XlfillError::Other("too many error records".into()))?;
        let row = layout
            .base_row
            .checked_add(offset)
            .ok_or_else(|| XlfillError::CellRef(format!("error row {index} overflows the sheet")))?;

        mappings.push(CellMapping::new(
            cell_address(number_col, row),
            (offset + 1).to_string(),
            format!("error[{index}].number"),
        ));
        mappings.push(CellMapping::new(
            cell_address(description_col, row),
            record.description.as_str(),
            format!("error[{index}].description"),
        ));
        mappings.push(CellMapping::new(
            cell_address(severity_col, row),
            language.severity_label(record.severity),
            format!("error[{index}].severity"),
        ));
    }
    Ok(mappings)
}
