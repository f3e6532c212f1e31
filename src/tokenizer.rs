//! CSV tokenizer: row splitting, quoted-comma masking and cell splitting.
//!
//! Splits raw content into logical rows and rows into raw cell values on a
//! fixed comma delimiter, with a masking pre-pass that hides commas inside
//! double-quoted spans so they are not mistaken for delimiters.

use once_cell::sync::Lazy;
use regex::Regex;

/// The fixed cell delimiter. Not configurable in the public surface.
pub const DELIMITER: char = ',';

/// Double-quoted span scanner. No escaped-quote support.
static QUOTED_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new("\"[^\"]*\"").expect("quoted span pattern"));

/// Split raw content into logical rows.
///
/// Handles both `\r\n` and `\n` line endings and discards empty entries,
/// so trailing newlines and blank lines produce no rows.
pub fn split_rows(content: &str) -> Vec<String> {
    content
        .split("\r\n")
        .flat_map(|chunk| chunk.split('\n'))
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect()
}

/// Replace every comma inside a double-quoted span with a hyphen.
///
/// This is the lossy quoted-comma workaround, not an RFC 4180 grammar: the
/// span (quotes included) stays in the row text and only its commas are
/// rewritten, so the original commas are not recoverable.
pub fn mask_quoted_commas(row: &str) -> String {
    QUOTED_SPAN
        .replace_all(row, |caps: &regex::Captures<'_>| caps[0].replace(',', "-"))
        .into_owned()
}

/// Split a row into raw cell values on the delimiter.
///
/// Empty entries are preserved: an empty cell between two delimiters stays
/// an empty string so positional alignment with the header holds.
pub fn split_cells(row: &str) -> Vec<String> {
    row.split(DELIMITER).map(|cell| cell.to_string()).collect()
}
