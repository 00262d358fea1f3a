//! Document regeneration pipeline.
//!
//! Opens the template archive, patches the worksheet cells named by the
//! answer mappings, and writes a new archive. Every other entry passes
//! through byte-identical.

pub mod cell_patcher;
pub mod zip_patcher;

use std::io::Cursor;

use zip::ZipArchive;

use crate::config::RegenerateOptions;
use crate::error::{Result, XlfillError};
use crate::language::Language;
use crate::mapping::{build_cell_mappings, build_error_rows};
use crate::types::{AnswerSet, ErrorRecord, QuestionDescriptor};

pub use cell_patcher::{escape_xml, patch_worksheet, PatchReport, PatchedWorksheet};
pub use zip_patcher::{ensure_well_formed, locate_worksheet, replace_worksheet};

/// Output of a regeneration with its diagnostics.
#[derive(Debug, Clone)]
pub struct Regenerated {
    pub bytes: Vec<u8>,
    /// Archive entry that was patched.
    pub worksheet_path: String,
    /// Number of cell writes requested (answers plus error rows).
    pub mappings: usize,
    pub report: PatchReport,
}

/// Fill `answers` (and optional error rows) into the template and return
/// the new document bytes.
///
/// Fails with [`XlfillError::Template`] if the archive holds no worksheet,
/// and with [`XlfillError::DocumentTooSmall`] if the output is implausibly
/// small. Cells missing from the worksheet never fail the call.
pub fn regenerate(
    template: &[u8],
    answers: &AnswerSet,
    questions: &[QuestionDescriptor],
    errors: Option<&[ErrorRecord]>,
    language: Language,
) -> Result<Vec<u8>> {
    regenerate_with_options(
        template,
        answers,
        questions,
        errors,
        &RegenerateOptions::new(language),
    )
}

/// [`regenerate`] with explicit options.
pub fn regenerate_with_options(
    template: &[u8],
    answers: &AnswerSet,
    questions: &[QuestionDescriptor],
    errors: Option<&[ErrorRecord]>,
    options: &RegenerateOptions,
) -> Result<Vec<u8>> {
    regenerate_with_report(template, answers, questions, errors, options).map(|r| r.bytes)
}

/// [`regenerate_with_options`], also returning the patch diagnostics.
pub fn regenerate_with_report(
    template: &[u8],
    answers: &AnswerSet,
    questions: &[QuestionDescriptor],
    errors: Option<&[ErrorRecord]>,
    options: &RegenerateOptions,
) -> Result<Regenerated> {
    let mut archive = ZipArchive::new(Cursor::new(template))?;
    let worksheet_path = locate_worksheet(&mut archive, options.worksheet_path.as_deref())?;
    let worksheet = zip_patcher::read_entry_text(&mut archive, &worksheet_path)?;
    log::debug!(
        "patching {worksheet_path} ({} bytes) in {}",
        worksheet.len(),
        options.language
    );

    let mut mappings = build_cell_mappings(answers, questions, options.language);
    if let Some(errors) = errors {
        mappings.extend(build_error_rows(errors, options.language, &options.error_rows)?);
    }

    let patched = patch_worksheet(&worksheet, &mappings)?;
    ensure_well_formed(&patched.xml)?;

    let bytes = replace_worksheet(template, &worksheet_path, &patched.xml)?;
    if bytes.len() < options.min_document_bytes {
        return Err(XlfillError::DocumentTooSmall {
            size: bytes.len(),
            minimum: options.min_document_bytes,
        });
    }

    Ok(Regenerated {
        bytes,
        worksheet_path,
        mappings: mappings.len(),
        report: patched.report,
    })
}
