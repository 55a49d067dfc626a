//! Calculator state and keystroke dispatch.

use tracing::debug;

use super::display;
use super::evaluation::{Evaluate, FendEvaluator, format_result};
use super::validation;

/// Completion marker appended to a solved expression in the history line.
const COMPLETION_MARKER: &str = " =";

/// Label the history line carries once the user types on top of a result.
const ANSWER_LABEL: &str = "Ans";

/// A single normalized keystroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    /// Reset expression and history.
    Clear,
    /// Remove the last character of the expression.
    Delete,
    /// Evaluate the expression and commit the result.
    Evaluate,
    /// Append one raw character: a digit, `.`, `+`, `-`, `x`, or `/`.
    Char(char),
}

/// Whether the last keystroke was accepted. A rejection is the caller's cue
/// to flash the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Rejected,
}

/// Transient display validity. Invalid only for the duration of a
/// rejected-keystroke flash.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Validity {
    #[default]
    Valid,
    Invalid,
}

/// The calculator: a raw expression, one line of history, and the transient
/// validity flag. All keystrokes funnel through [`Calculator::handle_input`].
pub struct Calculator<E = FendEvaluator> {
    expression: String,
    history: String,
    validity: Validity,
    evaluator: E,
}

impl Calculator<FendEvaluator> {
    pub fn new() -> Self {
        Self::with_evaluator(FendEvaluator)
    }
}

impl Default for Calculator<FendEvaluator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Evaluate> Calculator<E> {
    /// Create a calculator over a custom evaluation backend.
    pub fn with_evaluator(evaluator: E) -> Self {
        Self {
            expression: String::new(),
            history: String::new(),
            validity: Validity::Valid,
            evaluator,
        }
    }

    /// The raw expression as typed, before display formatting.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The secondary display line: a solved expression or the answer label.
    pub fn history(&self) -> &str {
        &self.history
    }

    pub fn validity(&self) -> Validity {
        self.validity
    }

    /// The expression formatted for display.
    pub fn display(&self) -> String {
        display::pad_operators(&self.expression)
    }

    /// Revert the validity flag once an invalid flash has run out.
    pub fn reset_validity(&mut self) {
        self.validity = Validity::Valid;
    }

    /// Process one keystroke. Rejected keystrokes leave expression and
    /// history untouched and mark the display invalid.
    pub fn handle_input(&mut self, input: Input) -> Outcome {
        match input {
            Input::Clear => {
                self.clear();
                Outcome::Accepted
            }
            Input::Delete => {
                self.delete_last();
                Outcome::Accepted
            }
            Input::Evaluate => self.evaluate(),
            Input::Char(character) => {
                if validation::is_valid_append(&self.expression, character, &self.evaluator) {
                    self.append(character);
                    Outcome::Accepted
                } else {
                    self.validity = Validity::Invalid;
                    Outcome::Rejected
                }
            }
        }
    }

    fn clear(&mut self) {
        self.expression.clear();
        self.history.clear();
    }

    fn delete_last(&mut self) {
        self.expression.pop();
    }

    /// Append an accepted character, eliding or zero-prefixing as the
    /// validation rules dictate.
    fn append(&mut self, character: char) {
        // The instant a new expression is started on top of a shown result,
        // the solved expression in the history gives way to the answer label.
        if !self.history.is_empty() && !self.history.starts_with(ANSWER_LABEL) {
            self.history = format!("{ANSWER_LABEL} = {}", self.expression);
        }
        if validation::should_replace_last(&self.expression, character) {
            self.expression.pop();
        }
        if validation::needs_zero_prefix(&self.expression, character) {
            self.expression.push('0');
        }
        self.expression.push(character);
    }

    /// Committing evaluation: on success the result becomes the expression
    /// and the solved expression moves to the history line.
    fn evaluate(&mut self) -> Outcome {
        match self.evaluator.evaluate(&self.expression) {
            Ok(value) => {
                self.history = format!("{}{COMPLETION_MARKER}", self.expression);
                self.expression = format_result(&value);
                Outcome::Accepted
            }
            Err(error) => {
                debug!(expression = %self.expression, %error, "evaluation rejected");
                self.validity = Validity::Invalid;
                Outcome::Rejected
            }
        }
    }
}
