//! Test fixtures for generating XLSX templates in memory.
//!
//! A template is a minimal but valid package whose single worksheet carries
//! the pre-styled cells an inspection form prints into.
//!
//! # Example
//!
//! ```rust
//! use fixtures::TemplateBuilder;
//!
//! let xlsx = TemplateBuilder::new()
//!     .styled_cell("C10", 5)
//!     .value_cell("D10", 2, "42")
//!     .build();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};
use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

pub const SHEET_PATH: &str = "xl/worksheets/sheet1.xml";

/// One template cell, rendered in row order.
#[derive(Debug, Clone)]
enum TemplateCell {
    /// `<c r=".." s=".."/>`
    StyledEmpty { style: u32 },
    /// `<c r=".." s=".."><v>..</v></c>`
    Value { style: u32, value: String },
    /// `<c r=".." s=".." t="s"><v>..</v></c>`
    Shared { style: u32, index: u32 },
    /// Written verbatim.
    Raw(String),
}

/// Builder for template packages.
#[derive(Debug, Clone, Default)]
pub struct TemplateBuilder {
    /// row -> (address, cell), in insertion order per row
    rows: BTreeMap<u32, Vec<(String, TemplateCell)>>,
    sheet_path: Option<String>,
    extra_entries: Vec<(String, Vec<u8>, bool)>,
    skip_worksheet: bool,
}

fn row_of(address: &str) -> u32 {
    address
        .trim_start_matches(|c: char| c.is_ascii_alphabetic())
        .parse()
        .expect("fixture address needs a row")
}

impl TemplateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, address: &str, cell: TemplateCell) -> Self {
        self.rows
            .entry(row_of(address))
            .or_default()
            .push((address.to_string(), cell));
        self
    }

    /// Pre-styled empty cell (`<c r="C10" s="5"/>`).
    #[must_use]
    pub fn styled_cell(self, address: &str, style: u32) -> Self {
        self.push(address, TemplateCell::StyledEmpty { style })
    }

    /// Cell with a numeric cached value.
    #[must_use]
    pub fn value_cell(self, address: &str, style: u32, value: &str) -> Self {
        self.push(
            address,
            TemplateCell::Value {
                style,
                value: value.to_string(),
            },
        )
    }

    /// Cell pointing into the shared string table.
    #[must_use]
    pub fn shared_cell(self, address: &str, style: u32, index: u32) -> Self {
        self.push(address, TemplateCell::Shared { style, index })
    }

    /// Verbatim cell markup placed in the row of `address`.
    #[must_use]
    pub fn raw_cell(self, address: &str, xml: &str) -> Self {
        self.push(address, TemplateCell::Raw(xml.to_string()))
    }

    /// Store the worksheet under another entry name.
    #[must_use]
    pub fn sheet_path(mut self, path: &str) -> Self {
        self.sheet_path = Some(path.to_string());
        self
    }

    /// Add another package entry. `stored` skips compression.
    #[must_use]
    pub fn entry(mut self, name: &str, data: &[u8], stored: bool) -> Self {
        self.extra_entries
            .push((name.to_string(), data.to_vec(), stored));
        self
    }

    /// Leave the worksheet out of the package entirely.
    #[must_use]
    pub fn without_worksheet(mut self) -> Self {
        self.skip_worksheet = true;
        self
    }

    /// Render the worksheet XML.
    pub fn sheet_xml(&self) -> String {
        let mut out = String::new();
        out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        out.push('\n');
        out.push_str(
            r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        );
        out.push_str("\n  <dimension ref=\"A1:H40\"/>\n");
        out.push_str("  <cols><col min=\"1\" max=\"8\" width=\"14.5\" customWidth=\"1\"/></cols>\n");
        out.push_str("  <sheetData>\n");
        for (row, cells) in &self.rows {
            out.push_str(&format!("    <row r=\"{row}\" spans=\"1:8\">"));
            for (address, cell) in cells {
                match cell {
                    TemplateCell::StyledEmpty { style } => {
                        out.push_str(&format!("<c r=\"{address}\" s=\"{style}\"/>"));
                    }
                    TemplateCell::Value { style, value } => {
                        out.push_str(&format!(
                            "<c r=\"{address}\" s=\"{style}\"><v>{value}</v></c>"
                        ));
                    }
                    TemplateCell::Shared { style, index } => {
                        out.push_str(&format!(
                            "<c r=\"{address}\" s=\"{style}\" t=\"s\"><v>{index}</v></c>"
                        ));
                    }
                    TemplateCell::Raw(xml) => out.push_str(xml),
                }
            }
            out.push_str("</row>\n");
        }
        out.push_str("  </sheetData>\n");
        out.push_str("  <mergeCells count=\"1\"><mergeCell ref=\"B30:G30\"/></mergeCells>\n");
        out.push_str("  <pageMargins left=\"0.7\" right=\"0.7\" top=\"0.75\" bottom=\"0.75\" header=\"0.3\" footer=\"0.3\"/>\n");
        out.push_str("</worksheet>");
        out
    }

    /// Build the template package.
    pub fn build(&self) -> Vec<u8> {
        let sheet_path = self.sheet_path.as_deref().unwrap_or(SHEET_PATH);
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut zip = ZipWriter::new(&mut buffer);
            let deflated =
                FileOptions::default().compression_method(zip::CompressionMethod::Deflated);
            let stored = FileOptions::default().compression_method(zip::CompressionMethod::Stored);

            zip.start_file("[Content_Types].xml", deflated).unwrap();
            zip.write_all(content_types(sheet_path).as_bytes()).unwrap();

            zip.start_file("_rels/.rels", deflated).unwrap();
            zip.write_all(RELS_XML.as_bytes()).unwrap();

            zip.start_file("xl/workbook.xml", deflated).unwrap();
            zip.write_all(WORKBOOK_XML.as_bytes()).unwrap();

            zip.start_file("xl/_rels/workbook.xml.rels", deflated)
                .unwrap();
            zip.write_all(workbook_rels(sheet_path).as_bytes()).unwrap();

            if !self.skip_worksheet {
                zip.start_file(sheet_path, deflated).unwrap();
                zip.write_all(self.sheet_xml().as_bytes()).unwrap();
            }

            zip.start_file("xl/styles.xml", deflated).unwrap();
            zip.write_all(STYLES_XML.as_bytes()).unwrap();

            zip.start_file("xl/sharedStrings.xml", deflated).unwrap();
            zip.write_all(SHARED_STRINGS_XML.as_bytes()).unwrap();

            for (name, data, is_stored) in &self.extra_entries {
                let options = if *is_stored { stored } else { deflated };
                zip.start_file(name.as_str(), options).unwrap();
                zip.write_all(data).unwrap();
            }

            zip.finish().unwrap();
        }
        buffer.into_inner()
    }
}

/// Raw (still compressed) bytes and CRC of every entry, keyed by name.
pub fn raw_entries(data: &[u8]) -> BTreeMap<String, (u32, Vec<u8>)> {
    let mut archive = ZipArchive::new(Cursor::new(data)).unwrap();
    let mut out = BTreeMap::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index_raw(i).unwrap();
        let mut raw = Vec::new();
        entry.read_to_end(&mut raw).unwrap();
        out.insert(entry.name().to_string(), (entry.crc32(), raw));
    }
    out
}

/// Entry names in archive order.
pub fn entry_names(data: &[u8]) -> Vec<String> {
    let mut archive = ZipArchive::new(Cursor::new(data)).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index_raw(i).unwrap().name().to_string())
        .collect()
}

/// Decompressed text of one entry.
pub fn entry_text(data: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(data)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut text = String::new();
    file.read_to_string(&mut text).unwrap();
    text
}

fn content_types(sheet_path: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
  <Override PartName="/{sheet_path}" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
  <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
  <Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>
</Types>"#
    )
}

fn workbook_rels(sheet_path: &str) -> String {
    let target = sheet_path.trim_start_matches("xl/");
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="{target}"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>
</Relationships>"#
    )
}

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const WORKBOOK_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="Inspection" sheetId="1" r:id="rId1"/>
  </sheets>
</workbook>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <fonts count="2"><font><sz val="11"/><name val="Calibri"/></font><font><b/><sz val="11"/><name val="Calibri"/></font></fonts>
  <fills count="1"><fill><patternFill patternType="none"/></fill></fills>
  <borders count="2"><border/><border><left style="thin"/><right style="thin"/><top style="thin"/><bottom style="thin"/></border></borders>
  <cellXfs count="3"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/><xf numFmtId="0" fontId="1" fillId="0" borderId="1" applyBorder="1"/><xf numFmtId="0" fontId="0" fillId="0" borderId="1" applyBorder="1"/></cellXfs>
</styleSheet>"#;

const SHARED_STRINGS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="2" uniqueCount="2">
  <si><t>Inspector</t></si>
  <si><t>Placeholder</t></si>
</sst>"#;
