//! Spreadsheet cell handling.
//!
//! Extraction from spreadsheets emits one cell per column, each prefixed
//! with its column letters (`A:`, `AB:`, `XFD:`) and joined with `|`. This
//! module recognises such rows and reshapes them into `key: value` prose, and
//! strips cell prefixes that survive on their own.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A single column-letter cell prefix at the start of a cell.
    static ref CELL_PREFIX: Regex = Regex::new(r"^[A-Z]{1,3}:").unwrap();
    /// One or more leading cell prefixes, with the whitespace around them.
    static ref LEADING_CELL_PREFIXES: Regex = Regex::new(r"^\s*(?:[A-Z]{1,3}:\s*)+").unwrap();
}

const CELL_DELIMITER: char = '|';
const PAIR_SEPARATOR: &str = " / ";

/// Returns `line` without its leading cell prefixes. Lines without a prefix
/// come back untouched, whitespace included.
pub fn strip_cell_prefix(line: &str) -> &str {
    match LEADING_CELL_PREFIXES.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

/// Reshapes a pipe-delimited row of prefixed cells into `key: value` pairs.
///
/// Every non-empty cell must carry a column prefix, otherwise the line is not
/// a cell row and `None` is returned. Values pair up positionally; an odd
/// trailing value renders bare.
pub fn reshape_cell_row(line: &str) -> Option<String> {
    if !line.contains(CELL_DELIMITER) {
        return None;
    }

    let cells: Vec<&str> = line
        .split(CELL_DELIMITER)
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .collect();

    if cells.is_empty() || !cells.iter().all(|cell| CELL_PREFIX.is_match(cell)) {
        return None;
    }

    let values: Vec<&str> = cells.iter().map(|cell| strip_cell_prefix(cell).trim()).collect();
    let rendered: Vec<String> = values.chunks(2).map(|pair| pair.join(": ")).collect();
    Some(rendered.join(PAIR_SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reshapes_key_value_pair() {
        assert_eq!(reshape_cell_row("A:主訴 | B:右下腹部痛").as_deref(), Some("主訴: 右下腹部痛"));
    }

    #[test]
    fn pairs_positionally_and_leaves_odd_value_bare() {
        let row = "A:氏名|B:山田太郎|C:生年月日|D:1970/01/01|E:備考";
        assert_eq!(
            reshape_cell_row(row).as_deref(),
            Some("氏名: 山田太郎 / 生年月日: 1970/01/01 / 備考")
        );
    }

    #[test]
    fn accepts_three_letter_columns_and_skips_empty_cells() {
        assert_eq!(reshape_cell_row("XFD:経過 | | AA: 良好 |").as_deref(), Some("経過: 良好"));
    }

    #[test]
    fn rejects_rows_with_unprefixed_cells() {
        assert_eq!(reshape_cell_row("A:主訴 | 右下腹部痛"), None);
        assert_eq!(reshape_cell_row("a:lower | b:case"), None);
        assert_eq!(reshape_cell_row("ABCD:too long | B:x"), None);
        assert_eq!(reshape_cell_row("A:no delimiter"), None);
        assert_eq!(reshape_cell_row(" | "), None);
    }

    #[test]
    fn strips_leading_prefixes_only() {
        assert_eq!(strip_cell_prefix("A:主訴"), "主訴");
        assert_eq!(strip_cell_prefix("  AB: 主訴"), "主訴");
        assert_eq!(strip_cell_prefix("A:B:痛み"), "痛み");
        assert_eq!(strip_cell_prefix("血圧 A:120"), "血圧 A:120");
        assert_eq!(strip_cell_prefix("  indented"), "  indented");
    }
}
