//! Incremental calculator engine.
//!
//! This module provides functionality to:
//! - Validate every incoming character against the current expression
//! - Mutate the expression state (append with elision rules, delete, clear)
//! - Evaluate committed expressions through an arbitrary-precision backend
//! - Format the raw expression for display

mod display;
mod evaluation;
mod state;
mod validation;

pub use display::pad_operators;
pub use evaluation::{EvalError, Evaluate, FendEvaluator, format_result};
pub use state::{Calculator, Input, Outcome, Validity};
