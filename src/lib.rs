//! xlfill - fill inspection-form answers into an XLSX template
//!
//! Writes answers straight into the worksheet XML of a pre-designed
//! spreadsheet, without building a spreadsheet object model:
//! - Answer formatting with a per-language locale table
//! - Cell mapping for single cells, toggles and yes/no/na cell matrices
//! - Error tables at a fixed row offset
//! - In-place `<c>` patching that leaves every other byte untouched
//! - ZIP repackaging with untouched entries raw-copied
//!
//! # Usage
//!
//! ```no_run
//! use xlfill::{regenerate, AnswerSet, Language, QuestionDescriptor, QuestionType};
//!
//! let template = std::fs::read("template.xlsx")?;
//! let questions = vec![QuestionDescriptor::new("inspector", QuestionType::Text, "C10")];
//! let mut answers = AnswerSet::new();
//! answers.insert("inspector".into(), "Kovács János".into());
//!
//! let document = regenerate(&template, &answers, &questions, None, Language::Hungarian)?;
//! std::fs::write("report.xlsx", document)?;
//! # Ok::<(), xlfill::XlfillError>(())
//! ```

pub mod cell_ref;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod language;
pub mod mapping;
pub mod types;

pub use config::RegenerateOptions;
pub use error::{Result, XlfillError};
pub use export::{
    patch_worksheet, regenerate, regenerate_with_options, regenerate_with_report, PatchReport,
    PatchedWorksheet, Regenerated,
};
pub use format::format_answer;
pub use language::Language;
pub use mapping::{build_cell_mappings, build_error_rows, CellStrategy, ErrorRowLayout};
pub use types::*;

