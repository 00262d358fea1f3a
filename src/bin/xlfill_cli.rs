//! CLI tool for xlfill - fills a JSON answer set into an XLSX template
//!
//! Usage:
//!   xlfill_cli <template.xlsx> <answers.json> <questions.json>
//!              [-o out.xlsx] [--lang hu] [--errors errors.json] [--config options.json]
//!
//! Set `RUST_LOG=debug` to see mapping and patch diagnostics.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::process;

use xlfill::{
    regenerate_with_report, AnswerSet, ErrorRecord, Language, QuestionDescriptor,
    RegenerateOptions,
};

const USAGE: &str = "Usage: xlfill_cli <template.xlsx> <answers.json> <questions.json> \
[-o out.xlsx] [--lang TAG] [--errors errors.json] [--config options.json]";

fn fail(message: String) -> ! {
    eprintln!("{message}");
    process::exit(1);
}

fn read_file(path: &str) -> Vec<u8> {
    fs::read(path).unwrap_or_else(|e| fail(format!("Error reading {path}: {e}")))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> T {
    let data = read_file(path);
    serde_json::from_slice(&data).unwrap_or_else(|e| fail(format!("Error parsing {path}: {e}")))
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        fail(USAGE.to_string());
    }

    let template_path = &args[1];
    let answers: AnswerSet = read_json(&args[2]);
    let questions: Vec<QuestionDescriptor> = read_json(&args[3]);

    let mut output_path = "out.xlsx".to_string();
    let mut language: Option<Language> = None;
    let mut errors: Option<Vec<ErrorRecord>> = None;
    let mut options = RegenerateOptions::default();

    let mut rest = args[4..].iter();
    while let Some(flag) = rest.next() {
        let Some(value) = rest.next() else {
            fail(format!("Missing value for {flag}\n{USAGE}"));
        };
        match flag.as_str() {
            "-o" => output_path = value.clone(),
            "--lang" => {
                language = Some(value.parse().unwrap_or_else(|e| fail(format!("{e}"))));
            }
            "--errors" => errors = Some(read_json(value)),
            "--config" => {
                let json = String::from_utf8_lossy(&read_file(value)).into_owned();
                options = RegenerateOptions::from_json(&json)
                    .unwrap_or_else(|e| fail(format!("Error parsing {value}: {e}")));
            }
            _ => fail(format!("Unknown option {flag}\n{USAGE}")),
        }
    }
    if let Some(language) = language {
        options.language = language;
    }

    let template = read_file(template_path);
    let result = regenerate_with_report(
        &template,
        &answers,
        &questions,
        errors.as_deref(),
        &options,
    )
    .unwrap_or_else(|e| fail(format!("Error generating document: {e}")));

    if let Err(e) = fs::write(&output_path, &result.bytes) {
        fail(format!("Error writing {output_path}: {e}"));
    }

    eprintln!(
        "Written: {output_path} ({} bytes, sheet {})",
        result.bytes.len(),
        result.worksheet_path
    );
    eprintln!(
        "Cells: {} of {} written",
        result.report.modified, result.mappings
    );
    if !result.report.unmatched.is_empty() {
        eprintln!("Not found in worksheet: {}", result.report.unmatched.join(", "));
    }
}
