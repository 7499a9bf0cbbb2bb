//! Cell reference substitution.
//!
//! Before a formula reaches the restricted evaluator, every reference token
//! like `B12` is replaced with the number it stands for, leaving plain
//! arithmetic text.
//!
//! Formula cells are followed one level: a formula referenced directly has
//! its own references substituted, but formula cells reached from there are
//! evaluated as bare arithmetic text. References inside those make the
//! operand degrade to `0`, so reference cycles always terminate.

use std::sync::OnceLock;

use log::trace;
use regex::{Captures, Regex};

use super::arith::eval_restricted;
use super::cell_ref::CellRef;
use super::sheet::CellSource;

/// Regex for whole-word uppercase cell references inside formulas.
///
/// Captures:
/// - group 1: column letters
/// - group 2: row digits
pub fn cell_ref_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b([A-Z]+)([0-9]+)\b").expect("cell reference regex must compile")
    })
}

/// Deepest reference level at which a formula cell still has its own
/// references substituted.
pub const MAX_FORMULA_DEPTH: usize = 1;

/// Replace every cell reference in `expr` with its numeric value.
pub fn substitute_references(expr: &str, sheet: &impl CellSource) -> String {
    substitute_at_depth(expr, sheet, 1)
}

/// Numeric value of the cell named by a reference token.
///
/// Out-of-range (or unrepresentable) references are `0`.
pub fn resolve_reference(letters: &str, digits: &str, sheet: &impl CellSource) -> f64 {
    resolve_at_depth(letters, digits, sheet, 1)
}

fn substitute_at_depth(expr: &str, sheet: &impl CellSource, depth: usize) -> String {
    cell_ref_re()
        .replace_all(expr, |caps: &Captures| {
            let value = resolve_at_depth(&caps[1], &caps[2], sheet, depth);
            trace!("{} -> {} (depth {})", &caps[0], value, depth);
            // Plain positional notation; non-finite values become "inf"/"NaN"
            // and are rejected by the allow-list. Negatives stay a single
            // operand next to `**` and `-`.
            if value < 0.0 {
                format!("({value})")
            } else {
                value.to_string()
            }
        })
        .into_owned()
}

fn resolve_at_depth(letters: &str, digits: &str, sheet: &impl CellSource, depth: usize) -> f64 {
    let Some(cell) = CellRef::from_parts(letters, digits) else {
        return 0.0;
    };
    if !cell.in_bounds(sheet.rows(), sheet.cols()) {
        return 0.0;
    }
    let Some(raw) = sheet.raw_at(&cell) else {
        return 0.0;
    };

    if raw.trim().starts_with('=') {
        // The first character is dropped as-is, so " =1" keeps its '='.
        let mut chars = raw.chars();
        chars.next();
        let body = chars.as_str();
        if depth <= MAX_FORMULA_DEPTH {
            eval_restricted(&substitute_at_depth(body, sheet, depth + 1))
        } else {
            eval_restricted(body)
        }
    } else {
        coerce_number(raw)
    }
}

/// Numeric value of literal cell text; non-numeric text is `0`.
pub fn coerce_number(text: &str) -> f64 {
    let trimmed = text.trim();
    match trimmed {
        "" => return 0.0,
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    // `f64::from_str` also accepts "inf"/"nan" spellings; only decimal
    // literals count here.
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if !n.is_nan() => n,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Sheet;

    fn sheet_with(cells: &[(usize, usize, &str)]) -> Sheet {
        let mut sheet = Sheet::new(10, 5);
        for (row, col, text) in cells {
            sheet.set(*row, *col, *text).unwrap();
        }
        sheet
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("  "), 0.0);
        assert_eq!(coerce_number("5"), 5.0);
        assert_eq!(coerce_number(" -2.5 "), -2.5);
        assert_eq!(coerce_number("1e3"), 1000.0);
        assert_eq!(coerce_number(".5"), 0.5);
        assert_eq!(coerce_number("hello"), 0.0);
        assert_eq!(coerce_number("12abc"), 0.0);
        assert_eq!(coerce_number("inf"), 0.0);
        assert_eq!(coerce_number("NaN"), 0.0);
        assert_eq!(coerce_number("Infinity"), f64::INFINITY);
        assert_eq!(coerce_number("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_substitute_literals() {
        let sheet = sheet_with(&[(0, 0, "5"), (1, 1, "-2")]);
        assert_eq!(substitute_references("A1*2", &sheet), "5*2");
        assert_eq!(substitute_references("A1+B2", &sheet), "5+(-2)");
        assert_eq!(substitute_references("C3", &sheet), "0");
    }

    #[test]
    fn test_negative_values_keep_their_sign_together() {
        let sheet = sheet_with(&[(0, 0, "-2"), (0, 1, "=0-3")]);
        assert_eq!(eval_restricted(&substitute_references("A1**2", &sheet)), 4.0);
        assert_eq!(eval_restricted(&substitute_references("5-A1", &sheet)), 7.0);
        assert_eq!(substitute_references("B1*A1", &sheet), "(-3)*(-2)");
    }

    #[test]
    fn test_substitute_out_of_bounds_is_zero() {
        let sheet = sheet_with(&[(0, 0, "5")]);
        assert_eq!(substitute_references("F1", &sheet), "0");
        assert_eq!(substitute_references("A11", &sheet), "0");
        assert_eq!(substitute_references("A0", &sheet), "0");
        assert_eq!(substitute_references("AA1", &sheet), "0");
    }

    #[test]
    fn test_substitute_ignores_lowercase_and_embedded_tokens() {
        let sheet = sheet_with(&[(0, 0, "5")]);
        assert_eq!(substitute_references("a1", &sheet), "a1");
        assert_eq!(substitute_references("A1A1", &sheet), "A1A1");
        assert_eq!(substitute_references("1A1", &sheet), "1A1");
    }

    #[test]
    fn test_formula_reference_resolves_one_level() {
        let sheet = sheet_with(&[(0, 0, "5"), (0, 1, "=3*4"), (0, 2, "=A1*2")]);
        assert_eq!(resolve_reference("B", "1", &sheet), 12.0);
        assert_eq!(resolve_reference("C", "1", &sheet), 10.0);
    }

    #[test]
    fn test_second_level_formula_is_bare_arithmetic() {
        // A1 -> B1 -> C1: B1 is evaluated as text, so its reference to C1 fails.
        let sheet = sheet_with(&[(0, 0, "=B1"), (0, 1, "=C1"), (0, 2, "5")]);
        assert_eq!(resolve_reference("A", "1", &sheet), 0.0);

        let sheet = sheet_with(&[(0, 0, "=B1+1"), (0, 1, "=2*3")]);
        assert_eq!(resolve_reference("A", "1", &sheet), 7.0);
    }

    #[test]
    fn test_self_reference_terminates() {
        let sheet = sheet_with(&[(0, 0, "=A1+1")]);
        assert_eq!(resolve_reference("A", "1", &sheet), 1.0);
    }

    #[test]
    fn test_formula_reference_drops_exactly_first_char() {
        let sheet = sheet_with(&[(0, 0, " =1+2"), (0, 1, "=1+2")]);
        assert_eq!(resolve_reference("A", "1", &sheet), 0.0);
        assert_eq!(resolve_reference("B", "1", &sheet), 3.0);
    }

    #[test]
    fn test_large_values_substitute_without_exponent() {
        let sheet = sheet_with(&[(0, 0, "1e21")]);
        assert_eq!(
            substitute_references("A1", &sheet),
            "1000000000000000000000"
        );
    }
}
