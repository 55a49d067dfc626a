//! Keystroke admission for the calculator engine.
//!
//! Decides, per incoming character, whether appending it (possibly after
//! eliding the previous character) still leaves a syntactically sound partial
//! expression. The final word belongs to the evaluator itself: a candidate
//! expression is completed with a placeholder digit and dry-run through the
//! backend, so validation and evaluation can never disagree about what is
//! parseable.

use lazy_static::lazy_static;
use regex::Regex;

use super::evaluation::Evaluate;

/// The operator characters an expression may contain. Multiplication is
/// stored as `x` and only translated to `*` at evaluation time.
pub const OPERATORS: [char; 4] = ['+', '-', 'x', '/'];

lazy_static! {
    /// Splits an expression into its numbers.
    static ref OPERATOR_SPLIT: Regex = Regex::new(r"[-+x/]").unwrap();
}

/// Check if a character is one of the four operators.
pub fn is_operator(input: char) -> bool {
    OPERATORS.contains(&input)
}

/// The number currently being typed: the substring after the most recent
/// operator, or the whole expression when it is exactly one character.
fn last_full_number(expression: &str) -> &str {
    if expression.chars().count() == 1 {
        return expression;
    }
    OPERATOR_SPLIT
        .split(expression)
        .last()
        .unwrap_or(expression)
}

/// Operator-replace check: a new operator other than `-` replaces a trailing
/// operator or decimal point, so the user can change their mind (`5+` then
/// `-` gives `5-`). `-` is excluded because an operator followed by `-` is a
/// unary-negation prefix (`5+-3`), not a correction.
fn replaces_operator(expression: &str, input: char) -> bool {
    if !is_operator(input) || input == '-' {
        return false;
    }
    match expression.chars().last() {
        Some(last) => is_operator(last) || last == '.',
        None => false,
    }
}

/// Leading-zero-replace check: a digit typed onto a lone `0` replaces it, so
/// `0` then `5` gives `5` rather than `05`. A `.` keeps the zero.
fn replaces_leading_zero(expression: &str, input: char) -> bool {
    input.is_ascii_digit() && last_full_number(expression) == "0"
}

/// Should the expression's trailing character be dropped before appending?
pub fn should_replace_last(expression: &str, input: char) -> bool {
    replaces_operator(expression, input) || replaces_leading_zero(expression, input)
}

/// Decimal-prefix check: a `.` typed on an empty display or right after an
/// operator needs a `0` prefixed, yielding `0.` instead of a bare `.`.
pub fn needs_zero_prefix(expression: &str, input: char) -> bool {
    if input != '.' {
        return false;
    }
    match expression.chars().last() {
        Some(last) => is_operator(last),
        None => true,
    }
}

/// Decide whether `input` may be appended to `expression`.
///
/// Identical doubled operators are rejected outright; the replace rules only
/// apply to a *different* operator. An operator may follow another operator
/// only as a unary `-`. Everything that survives those checks is settled by a
/// dry-run: the elided expression plus the (zero-prefixed) input plus a
/// placeholder `0` must evaluate to some numeric value.
pub fn is_valid_append<E: Evaluate>(expression: &str, input: char, evaluator: &E) -> bool {
    if !input.is_ascii_digit() && !is_operator(input) && input != '.' {
        return false;
    }
    if is_operator(input) && expression.chars().last() == Some(input) {
        return false;
    }

    let elided = if replaces_operator(expression, input) {
        &expression[..expression.len() - 1]
    } else {
        expression
    };

    // An operator may only follow another operator as a unary minus.
    if is_operator(input) && input != '-' {
        if let Some(last) = elided.chars().last() {
            if is_operator(last) {
                return false;
            }
        }
    }

    let mut candidate = String::with_capacity(elided.len() + 3);
    candidate.push_str(elided);
    if needs_zero_prefix(elided, input) {
        candidate.push('0');
    }
    candidate.push(input);
    candidate.push('0');

    evaluator.evaluate(&candidate).is_ok()
}
