//! Display formatting for raw expressions.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Every operator character, to be wrapped in spaces.
    static ref OPERATOR: Regex = Regex::new(r"[-+x/]").unwrap();

    /// The `+` of exponential notation, re-joined after padding.
    static ref EXPONENT_PLUS: Regex = Regex::new(r"e\s\+\s").unwrap();

    /// A padded `-` right after another padded operator: a unary sign.
    static ref UNARY_MINUS: Regex = Regex::new(r"\s\s-\s").unwrap();

    /// A padded `-` at the very start of the expression.
    static ref LEADING_MINUS: Regex = Regex::new(r"^\s-\s").unwrap();
}

/// Render a raw expression with single spaces around every operator.
///
/// Two exceptions keep the result readable: the `+` inside exponential
/// notation (`e+12`) stays unspaced, and a `-` acting as a unary sign is
/// attached to the number it signs (`5x-2-1` becomes `5 x -2 - 1`).
pub fn pad_operators(expression: &str) -> String {
    let padded = OPERATOR.replace_all(expression, " ${0} ");
    let padded = EXPONENT_PLUS.replace_all(&padded, "e+");
    let padded = UNARY_MINUS.replace_all(&padded, " -");
    LEADING_MINUS.replace(&padded, "-").into_owned()
}
