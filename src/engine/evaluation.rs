//! Expression evaluation using fend.
//!
//! Wraps fend-core behind the [`Evaluate`] trait so the engine can treat it
//! as an opaque arbitrary-precision arithmetic service, and so tests can
//! substitute their own backend. The adapter owns the two translations the
//! backend needs: the keypad's `x` multiplication symbol becomes `*` on the
//! way in, and fend's answer is normalized to a plain decimal string on the
//! way out.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// Longest result shown in plain decimal notation. Anything wider is
/// reformatted as an exponential.
const MAX_PLAIN_WIDTH: usize = 10;

/// Mantissa digits of an exponentially formatted result.
const EXPONENT_PRECISION: usize = 6;

/// fend marks non-terminating decimals with this prefix.
const APPROX_PREFIX: &str = "approx. ";

lazy_static! {
    /// A plain decimal number, optionally signed.
    static ref PLAIN_NUMBER: Regex = Regex::new(r"^-?\d+(\.\d+)?$").unwrap();
}

/// Why an expression failed to evaluate.
#[derive(Debug, Error)]
pub enum EvalError {
    /// The backend could not parse or evaluate the expression.
    #[error("expression could not be evaluated: {0}")]
    Parse(String),
    /// The backend answered with something that is not a plain number.
    #[error("expression did not produce a numeric value: {0:?}")]
    NotNumeric(String),
}

/// An arbitrary-precision evaluator for flattened infix expressions.
///
/// Implementations receive the raw expression (multiplication written as
/// `x`) and return the plain decimal representation of its value.
pub trait Evaluate {
    fn evaluate(&self, expression: &str) -> Result<String, EvalError>;
}

/// The fend-core backed evaluator used in production.
pub struct FendEvaluator;

impl Evaluate for FendEvaluator {
    fn evaluate(&self, expression: &str) -> Result<String, EvalError> {
        let input = expression.replace('x', "*");
        let mut context = fend_core::Context::new();
        let result = fend_core::evaluate(&input, &mut context).map_err(EvalError::Parse)?;

        let answer = result.get_main_result().trim();
        let answer = answer.strip_prefix(APPROX_PREFIX).unwrap_or(answer);
        if !PLAIN_NUMBER.is_match(answer) {
            return Err(EvalError::NotNumeric(answer.to_string()));
        }
        Ok(answer.to_string())
    }
}

/// Format a plain decimal result for the display.
///
/// Values up to ten characters are shown verbatim; anything longer collapses
/// to exponential notation with six mantissa digits, bounding the on-screen
/// width regardless of magnitude or precision.
pub fn format_result(value: &str) -> String {
    if value.len() > MAX_PLAIN_WIDTH {
        to_exponential(value, EXPONENT_PRECISION)
    } else {
        value.to_string()
    }
}

/// Rewrite a plain decimal string as `d.dddddde±x` with `precision` digits
/// after the mantissa's decimal point, rounding half away from zero.
fn to_exponential(value: &str, precision: usize) -> String {
    let (sign, magnitude) = match value.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", value),
    };
    let (int_part, frac_part) = match magnitude.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (magnitude, ""),
    };

    let digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes())
        .map(|b| b - b'0')
        .collect();
    let first = match digits.iter().position(|&d| d != 0) {
        Some(index) => index,
        None => return format!("0.{}e+0", "0".repeat(precision)),
    };
    let mut exponent = int_part.len() as i64 - 1 - first as i64;

    let mut mantissa: Vec<u8> = digits[first..].iter().copied().take(precision + 1).collect();
    while mantissa.len() < precision + 1 {
        mantissa.push(0);
    }

    if digits.get(first + precision + 1).is_some_and(|&d| d >= 5) {
        let mut index = mantissa.len();
        loop {
            if index == 0 {
                // Carried past the leading digit: 9.999999 rounds to 10, so
                // the mantissa shifts and the exponent grows.
                mantissa.insert(0, 1);
                mantissa.pop();
                exponent += 1;
                break;
            }
            index -= 1;
            if mantissa[index] == 9 {
                mantissa[index] = 0;
            } else {
                mantissa[index] += 1;
                break;
            }
        }
    }

    let rendered: String = mantissa.iter().map(|d| char::from(d + b'0')).collect();
    let (exponent_sign, exponent_abs) = if exponent < 0 {
        ("-", -exponent)
    } else {
        ("+", exponent)
    };
    format!(
        "{sign}{}.{}e{exponent_sign}{exponent_abs}",
        &rendered[..1],
        &rendered[1..]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluates_plain_arithmetic() {
        let evaluator = FendEvaluator;
        assert_eq!(evaluator.evaluate("3+2-1").unwrap(), "4");
        assert_eq!(evaluator.evaluate("9/2").unwrap(), "4.5");
    }

    #[test]
    fn test_translates_multiply_symbol() {
        let evaluator = FendEvaluator;
        assert_eq!(evaluator.evaluate("6x7").unwrap(), "42");
    }

    #[test]
    fn test_decimal_addition_is_exact() {
        let evaluator = FendEvaluator;
        assert_eq!(evaluator.evaluate("0.1+0.2").unwrap(), "0.3");
    }

    #[test]
    fn test_unary_minus_after_operator() {
        let evaluator = FendEvaluator;
        assert_eq!(evaluator.evaluate("5+-3").unwrap(), "2");
    }

    #[test]
    fn test_non_terminating_decimal_is_normalized() {
        let evaluator = FendEvaluator;
        let value = evaluator.evaluate("1/3").unwrap();
        assert!(value.starts_with("0.333"), "got {value:?}");
    }

    #[test]
    fn test_rejects_dangling_operator() {
        let evaluator = FendEvaluator;
        assert!(evaluator.evaluate("5+").is_err());
        assert!(evaluator.evaluate("5x").is_err());
    }

    #[test]
    fn test_rejects_empty_expression() {
        assert!(FendEvaluator.evaluate("").is_err());
    }

    #[test]
    fn test_rejects_division_by_zero() {
        assert!(FendEvaluator.evaluate("1/0").is_err());
    }

    #[test]
    fn test_short_results_pass_through() {
        assert_eq!(format_result("4"), "4");
        assert_eq!(format_result("0.3"), "0.3");
        assert_eq!(format_result("1234567890"), "1234567890");
    }

    #[test]
    fn test_long_results_become_exponential() {
        assert_eq!(format_result("999998000001"), "9.999980e+11");
    }

    #[test]
    fn test_exponential_rounds_the_mantissa() {
        assert_eq!(to_exponential("123456789012", 6), "1.234568e+11");
        assert_eq!(to_exponential("-123456789012", 6), "-1.234568e+11");
    }

    #[test]
    fn test_exponential_carry_shifts_the_exponent() {
        assert_eq!(to_exponential("99999999999", 6), "1.000000e+11");
    }

    #[test]
    fn test_exponential_fractions() {
        assert_eq!(to_exponential("0.000123456789", 6), "1.234568e-4");
        assert_eq!(to_exponential("0.5", 6), "5.000000e-1");
    }
}
