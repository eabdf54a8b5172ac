use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::cell::Cell;

// A row number is a digit run right after a column letter. `$` anchored rows
// (`B$5`) are not preceded by a letter and stay put.
static ROW_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z](\d+)").expect("row reference pattern is valid"));

/// Moves every row reference in a formula one row down.
///
/// The result is rebuilt into a fresh buffer while a cursor walks the input,
/// so a rewritten number is never scanned again even when it grows a digit.
///
/// # Examples
/// ```
/// use utilities_counter_importer::domain::sheets::formula_shift::shift_formula;
/// assert_eq!(shift_formula("=B5+C5"), "=B6+C6");
/// assert_eq!(shift_formula("=SUM(D9:D99)"), "=SUM(D10:D100)");
/// ```
pub fn shift_formula(formula: &str) -> String {
    let mut shifted = String::with_capacity(formula.len() + 2);
    let mut cursor = 0;

    for captures in ROW_REFERENCE.captures_iter(formula) {
        let Some(digits) = captures.get(1) else {
            continue;
        };
        shifted.push_str(&formula[cursor..digits.start()]);
        match digits
            .as_str()
            .parse::<u64>()
            .ok()
            .and_then(|row| row.checked_add(1))
        {
            Some(next_row) => shifted.push_str(&next_row.to_string()),
            None => shifted.push_str(digits.as_str()),
        }
        cursor = digits.end();
    }

    shifted.push_str(&formula[cursor..]);
    shifted
}

/// Shifts the row references of a textual cell. Other cells pass through.
pub fn shift_row_refs(cell: &Cell) -> Cell {
    match cell {
        Value::String(text) => Value::String(shift_formula(text)),
        other => other.clone(),
    }
}
