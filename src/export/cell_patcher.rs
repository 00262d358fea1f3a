//! In-place worksheet XML patcher.
//!
//! Writes inline strings into existing `<c>` nodes with targeted text
//! substitution. Nothing is parsed into a tree, so every byte outside the
//! patched cells is preserved exactly. All writes go through a single scan
//! of the cell nodes, keyed by address.
//!
//! Two cell shapes are recognized:
//!
//! - **existing**: `<c r="C10" ...>...</c>`. The opening and closing tags are
//!   kept (only `t` is forced to `inlineStr`); the content becomes
//!   `<is><t>text</t></is>`.
//! - **styled-empty**: `<c r="C10" s="5"/>`. Expanded to
//!   `<c r="C10" s="5" t="inlineStr"><is><t>text</t></is></c>`.
//!
//! A cell matching neither shape is left alone. An address with no patchable
//! node is reported as unmatched.

use std::collections::HashMap;

use regex::{Captures, Regex};
use serde::Serialize;

use crate::error::Result;
use crate::types::CellMapping;

/// Diagnostics for one patch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    /// Number of writes that landed in the worksheet.
    pub modified: usize,
    /// Addresses (in mapping order) whose cell node could not be found.
    pub unmatched: Vec<String>,
}

/// Patched worksheet text plus diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchedWorksheet {
    pub xml: String,
    pub report: PatchReport,
}

/// Escape text for XML content. Run exactly once per value.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Apply `mappings` to `xml` in one pass over the cell nodes.
///
/// Later mappings to the same address overwrite earlier ones, and only the
/// first patchable node carrying an address is written. An empty mapping
/// list returns the input unchanged.
pub fn patch_worksheet(xml: &str, mappings: &[CellMapping]) -> Result<PatchedWorksheet> {
    if mappings.is_empty() {
        return Ok(PatchedWorksheet {
            xml: xml.to_string(),
            report: PatchReport::default(),
        });
    }

    let mut pending: HashMap<&str, String> = HashMap::with_capacity(mappings.len());
    for mapping in mappings {
        pending.insert(mapping.cell.as_str(), escape_xml(&mapping.value));
    }

    let patcher = CellPatcher::new()?;
    let patched = patcher
        .cell_node
        .replace_all(xml, |caps: &Captures<'_>| {
            let node = caps.get(0).map_or("", |m| m.as_str());
            patcher
                .rewrite_node(caps, &mut pending)
                .unwrap_or_else(|| node.to_string())
        })
        .into_owned();

    let mut report = PatchReport::default();
    for mapping in mappings {
        if pending.contains_key(mapping.cell.as_str()) {
            log::warn!(
                "cell {} not found in worksheet, skipping write for {}",
                mapping.cell,
                mapping.label
            );
            report.unmatched.push(mapping.cell.clone());
        } else {
            log::trace!("{} <- {:?} ({})", mapping.cell, mapping.value, mapping.label);
            report.modified += 1;
        }
    }

    log::debug!(
        "patched {} of {} cells ({} unmatched)",
        report.modified,
        mappings.len(),
        report.unmatched.len()
    );

    Ok(PatchedWorksheet {
        xml: patched,
        report,
    })
}

/// Patterns shared across all writes of one run.
struct CellPatcher {
    /// Any `<c>` node: self-closing (`empty`) or with content (`open`/`close`).
    cell_node: Regex,
    /// Self-closing node carrying exactly `r` and a numeric `s`.
    styled_empty: Regex,
    ref_attr: Regex,
    type_attr: Regex,
}

impl CellPatcher {
    fn new() -> Result<Self> {
        Ok(Self {
            cell_node: Regex::new(
                r#"(?s)(?P<empty><c(?:\s[^>]*)?/>)|(?P<open><c(?:\s[^>]*)?>)(?P<content>.*?)(?P<close></c\s*>)"#,
            )?,
            styled_empty: Regex::new(
                r#"^(?P<open><c\s+(?:r\s*=\s*(?:"[^"]*"|'[^']*')\s+s\s*=\s*(?:"\d+"|'\d+')|s\s*=\s*(?:"\d+"|'\d+')\s+r\s*=\s*(?:"[^"]*"|'[^']*')))\s*/>$"#,
            )?,
            ref_attr: Regex::new(r#"\sr\s*=\s*(?:"([^"]*)"|'([^']*)')"#)?,
            type_attr: Regex::new(r#"\st\s*=\s*(?:"[^"]*"|'[^']*')"#)?,
        })
    }

    /// Rewrite one matched `<c>` node if its address is still pending.
    ///
    /// Returns `None` to leave the node as it is. A written address is
    /// removed from `pending`, so later nodes with the same address stay
    /// untouched.
    fn rewrite_node(&self, caps: &Captures<'_>, pending: &mut HashMap<&str, String>) -> Option<String> {
        if let Some(empty) = caps.name("empty") {
            let tag = empty.as_str();
            let address = self.address(tag)?;
            if !pending.contains_key(address) {
                return None;
            }
            let open = self.styled_empty.captures(tag)?.name("open")?.as_str();
            let text = pending.remove(address)?;
            return Some(format!(r#"{open} t="inlineStr"><is><t>{text}</t></is></c>"#));
        }

        let open = caps.name("open")?.as_str();
        let address = self.address(open)?;
        let text = pending.remove(address)?;
        let open = self.force_inline_type(open);
        let close = caps.name("close").map_or("</c>", |m| m.as_str());
        Some(format!("{open}<is><t>{text}</t></is>{close}"))
    }

    /// Value of the `r` attribute of an opening tag.
    fn address<'t>(&self, tag: &'t str) -> Option<&'t str> {
        let caps = self.ref_attr.captures(tag)?;
        caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
    }

    /// Set `t="inlineStr"` on an opening `<c ...>` tag, leaving every other
    /// attribute byte-identical.
    fn force_inline_type(&self, open: &str) -> String {
        if let Some(m) = self.type_attr.find(open) {
            let before = open.get(..m.start()).unwrap_or_default();
            let after = open.get(m.end()..).unwrap_or_default();
            return format!(r#"{before} t="inlineStr"{after}"#);
        }
        match open.strip_suffix('>') {
            Some(head) => format!(r#"{head} t="inlineStr">"#),
            None => open.to_string(),
        }
    }
}
