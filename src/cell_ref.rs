//! Utilities for parsing and normalizing Excel-style cell references.

/// Parse a cell reference like "A1" into (col, row) where col and row are 0-indexed.
///
/// Absolute markers (`$`) are ignored. Letters must precede digits, so
/// strings like `"1A"` or `"A1B"` are rejected.
pub fn parse_cell_ref(cell_ref: &str) -> Option<(u32, u32)> {
    let mut col: u32 = 0;
    let mut row: u32 = 0;
    let mut saw_col = false;
    let mut saw_row = false;

    for ch in cell_ref.trim().chars() {
        if ch == '$' {
            continue;
        }
        if ch.is_ascii_alphabetic() {
            if saw_row {
                return None;
            }
            let upper = ch.to_ascii_uppercase();
            col = col
                .checked_mul(26)?
                .checked_add(upper as u32 - 'A' as u32 + 1)?;
            saw_col = true;
        } else if ch.is_ascii_digit() {
            row = row.checked_mul(10)?.checked_add(ch as u32 - '0' as u32)?;
            saw_row = true;
        } else {
            return None;
        }
    }

    if !saw_col || !saw_row || row == 0 {
        return None;
    }

    Some((col.saturating_sub(1), row.saturating_sub(1)))
}

/// Convert a 0-indexed column number to its letter form (0 -> "A", 27 -> "AB").
pub fn col_to_letter(col: u32) -> String {
    let mut result = String::new();
    let mut n = col.saturating_add(1); // Convert to 1-based
    while n > 0 {
        n -= 1;
        let c = char::from_u32('A' as u32 + n % 26).unwrap_or('A');
        result.insert(0, c);
        n /= 26;
    }
    result
}

/// Build an address like "C10" from a 0-indexed column and a 1-based row.
pub fn cell_address(col: u32, row: u32) -> String {
    format!("{}{}", col_to_letter(col), row)
}

/// Canonical form of a single-cell address as it appears in worksheet `r` attributes.
///
/// `" $c$10 "` becomes `"C10"`. Returns `None` for anything that is not a
/// single cell address.
pub fn normalize_cell_ref(cell_ref: &str) -> Option<String> {
    let (col, row) = parse_cell_ref(cell_ref)?;
    Some(cell_address(col, row + 1))
}

/// Parse a bare column reference like "H" into its 0-indexed number.
pub fn parse_column(column: &str) -> Option<u32> {
    let trimmed = column.trim().trim_start_matches('$');
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    parse_cell_ref(&format!("{trimmed}1")).map(|(col, _)| col)
}
