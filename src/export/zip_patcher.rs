//! Replace the worksheet entry of an XLSX ZIP archive.
//!
//! Untouched entries are copied via `raw_copy_file` (compressed bytes are
//! carried over as-is, no recompression). Only the worksheet gets new data.

use std::io::{Cursor, Read, Seek, Write};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::error::{Result, XlfillError};

/// Folder holding worksheet parts inside the package.
pub const WORKSHEET_PREFIX: &str = "xl/worksheets/";
/// Worksheet preferred when the package holds more than one.
pub const DEFAULT_WORKSHEET: &str = "xl/worksheets/sheet1.xml";

fn is_worksheet_entry(name: &str) -> bool {
    name.starts_with(WORKSHEET_PREFIX) && name.ends_with(".xml") && !name.contains("/_rels/")
}

/// Find the worksheet entry to patch.
///
/// `preferred` must exist if given. Otherwise `xl/worksheets/sheet1.xml` wins,
/// then the first worksheet entry in archive order.
pub fn locate_worksheet<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    preferred: Option<&str>,
) -> Result<String> {
    let mut first = None;
    let mut has_default = false;

    for i in 0..archive.len() {
        let entry = archive.by_index_raw(i)?;
        let name = entry.name();
        if let Some(wanted) = preferred {
            if name == wanted {
                return Ok(name.to_string());
            }
            continue;
        }
        if !is_worksheet_entry(name) {
            continue;
        }
        if name == DEFAULT_WORKSHEET {
            has_default = true;
        }
        if first.is_none() {
            first = Some(name.to_string());
        }
    }

    if let Some(wanted) = preferred {
        return Err(XlfillError::Template(format!(
            "worksheet entry {wanted} not found in template"
        )));
    }
    if has_default {
        return Ok(DEFAULT_WORKSHEET.to_string());
    }
    first.ok_or_else(|| XlfillError::Template("no worksheet entry found in template".into()))
}

/// Read one entry of the archive as UTF-8 text.
pub fn read_entry_text<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<String> {
    let mut file = archive.by_name(path)?;
    let mut text = String::with_capacity(usize::try_from(file.size()).unwrap_or(0));
    file.read_to_string(&mut text)?;
    Ok(text)
}

/// Check that patched worksheet text is still well-formed XML.
pub fn ensure_well_formed(xml: &str) -> Result<()> {
    let mut reader = Reader::from_str(xml);
    loop {
        if let Event::Eof = reader.read_event()? {
            return Ok(());
        }
    }
}

/// Rewrite `original_data` with `worksheet_path` replaced by `xml`.
///
/// Entry order, names and every other entry's compressed bytes are kept.
/// The new worksheet is deflated with the original entry's timestamp, so
/// the same input always yields the same output.
pub fn replace_worksheet(original_data: &[u8], worksheet_path: &str, xml: &str) -> Result<Vec<u8>> {
    let cursor = Cursor::new(original_data);
    let mut archive = ZipArchive::new(cursor)?;

    let buf: Vec<u8> = Vec::with_capacity(original_data.len() + xml.len() / 4);
    let mut writer = ZipWriter::new(Cursor::new(buf));
    let mut replaced = false;

    for i in 0..archive.len() {
        let entry = archive.by_index_raw(i)?;

        if entry.name() == worksheet_path {
            let options = FileOptions::default()
                .compression_method(zip::CompressionMethod::Deflated)
                .last_modified_time(entry.last_modified());
            writer.start_file(entry.name(), options)?;
            writer.write_all(xml.as_bytes())?;
            replaced = true;
            continue;
        }

        // Pass through unmodified entry (raw copy, no re-compression)
        writer.raw_copy_file(entry)?;
    }

    if !replaced {
        return Err(XlfillError::Template(format!(
            "worksheet entry {worksheet_path} not found in template"
        )));
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}
