//! Formula evaluation.
//!
//! [`evaluate`] is the single entry point callers use to turn a cell's raw
//! text into something to display. Literals pass through untouched,
//! `=sum(...)` is handled as an aggregate, and everything else goes through
//! reference substitution followed by the restricted arithmetic evaluator.

use std::fmt;
use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use super::arith::eval_restricted;
use super::format::format_number;
use super::preprocess::substitute_references;
use super::sheet::CellSource;
use crate::error::FormulaError;

/// Display text for a formula that could not be evaluated.
pub const ERROR_MARKER: &str = "#ERR";

/// Result of evaluating a cell's raw text.
#[derive(Clone, Debug, PartialEq)]
pub enum Evaluation {
    /// Literal text, returned unchanged.
    Text(String),
    Number(f64),
    /// Displayed as [`ERROR_MARKER`].
    Error,
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evaluation::Text(s) => f.write_str(s),
            Evaluation::Number(n) => f.write_str(&format_number(*n)),
            Evaluation::Error => f.write_str(ERROR_MARKER),
        }
    }
}

/// True when raw cell text should be shown as a formula result.
pub fn is_formula(raw: &str) -> bool {
    raw.trim().starts_with('=')
}

fn sum_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^sum\s*\(").expect("sum prefix regex must compile"))
}

fn sum_call_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^sum\s*\((.*)\)$").expect("sum call regex must compile"))
}

/// Evaluate a cell's raw text against a sheet.
///
/// Text not starting with `=` is returned as [`Evaluation::Text`]. Formulas
/// produce a number, or [`Evaluation::Error`] when the `sum(...)` call is
/// malformed. Evaluation is pure: repeated calls against the same sheet
/// give the same result.
pub fn evaluate(raw: &str, sheet: &impl CellSource) -> Evaluation {
    let Some(formula) = raw.strip_prefix('=') else {
        return Evaluation::Text(raw.to_string());
    };

    match evaluate_formula(formula.trim(), sheet) {
        Ok(n) => Evaluation::Number(n),
        Err(e) => {
            debug!("formula {raw:?} evaluated to {ERROR_MARKER}: {e}");
            Evaluation::Error
        }
    }
}

fn evaluate_formula(expr: &str, sheet: &impl CellSource) -> Result<f64, FormulaError> {
    if sum_prefix_re().is_match(expr) {
        return evaluate_sum(expr);
    }
    let substituted = substitute_references(expr, sheet);
    Ok(eval_restricted(&substituted))
}

/// `sum(a, b, ...)`: each argument is evaluated as bare arithmetic.
fn evaluate_sum(expr: &str) -> Result<f64, FormulaError> {
    let caps = sum_call_re()
        .captures(expr)
        .ok_or_else(|| FormulaError::MalformedAggregate(expr.to_string()))?;
    Ok(caps[1]
        .split(',')
        .map(|arg| eval_restricted(arg.trim()))
        .sum())
}
