//! # Symbolic Engine
//!
//! A local [`Evaluator`] that delegates parsing and evaluation to the `evalexpr`
//! crate. The engine implements no parser of its own; its job is adapting
//! calculator notation to what `evalexpr` expects before handing the string over.
//!
//! ## Notation
//!
//! - **Arithmetic**: `+`, `-`, `*`, `/`, and both `**` and `^` for exponentiation
//! - **Functions**: `sin()`, `cos()`, `tan()`, `asin()`, `acos()`, `atan()`,
//!   `sqrt()`, `exp()` (trigonometry in radians)
//! - **Logarithms**: `ln()` is the natural log, `log()` is base 10
//! - **Constants**: `pi`, `e`
//!
//! Integer literals are evaluated in floating point, so `7/2` is `3.5` rather
//! than a truncated `3`. Results that come back non-finite (division by zero,
//! `sqrt(-1)`, `log` of a non-positive number) are reported as errors.
//!
//! ## Quick Start
//!
//! ```rust
//! use calcpad::SymbolicEngine;
//!
//! let engine = SymbolicEngine::new();
//! assert_eq!(engine.evaluate_number("2 + 3 * 4").unwrap(), 14.0);
//! assert_eq!(engine.evaluate_number("log(100)").unwrap(), 2.0);
//! ```
//!
//! Through the [`Evaluator`] trait the engine mimics a calculation backend:
//! evaluation failures come back as `Evaluation::Text` carrying an
//! `Error: Invalid mathematical expression - ...` message with success status,
//! the same shape a remote backend reports them in.
//!
//! The engine is stateless and thread-safe; share one instance freely.

use std::error::Error;
use std::fmt;

use async_trait::async_trait;
use evalexpr::ContextWithMutableVariables;

use crate::calcpad::evaluator::{Evaluation, Evaluator, EvaluatorError};

/// Error type for engine operations.
#[derive(Debug, Clone)]
pub struct EngineError {
    message: String,
}

impl EngineError {
    /// Create a new engine error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        EngineError {
            message: message.into(),
        }
    }

    /// The bare message, without the `Display` prefix.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "engine error: {}", self.message)
    }
}

impl Error for EngineError {}

/// Function names forwarded to `evalexpr`'s `math::` namespace when they are
/// used in call position. `log` is absent: it is rewritten to a quotient of
/// natural logs before this table is consulted.
const MATH_FUNCTIONS: [&str; 9] = [
    "sin", "cos", "tan", "asin", "acos", "atan", "sqrt", "exp", "ln",
];

/// A local scientific-expression evaluator backed by `evalexpr`.
#[derive(Clone)]
pub struct SymbolicEngine {
    // Stateless engine, no fields needed
}

impl SymbolicEngine {
    /// Create a new engine instance. Stateless, so creating instances is cheap.
    pub fn new() -> Self {
        SymbolicEngine {}
    }

    /// Evaluate an expression and return the numeric result.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression is empty or has invalid syntax, uses
    /// an unknown identifier, or produces a non-finite value (division by zero
    /// and domain errors such as `sqrt(-1)`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// let engine = calcpad::SymbolicEngine::new();
    ///
    /// assert_eq!(engine.evaluate_number("sqrt(16)").unwrap(), 4.0);
    /// assert_eq!(engine.evaluate_number("2**3").unwrap(), 8.0);
    /// assert!(engine.evaluate_number("2 +* 3").is_err());
    /// ```
    pub fn evaluate_number(&self, expression: &str) -> Result<f64, EngineError> {
        let prepared = prepare_expression(expression)?;

        // Context carrying the math constants referenced after preparation.
        let mut context =
            evalexpr::HashMapContext::<evalexpr::DefaultNumericTypes>::new();
        let _ = context.set_value(
            "math::PI".to_string(),
            evalexpr::Value::Float(std::f64::consts::PI),
        );
        let _ = context.set_value(
            "math::E".to_string(),
            evalexpr::Value::Float(std::f64::consts::E),
        );

        match evalexpr::eval_with_context(&prepared, &context) {
            Ok(value) => match value.as_number() {
                Ok(number) if number.is_finite() => Ok(number),
                Ok(_) => Err(EngineError::new("result is not a finite number")),
                Err(_) => Err(EngineError::new("result is not a number")),
            },
            Err(err) => Err(EngineError::new(format!("{}", err))),
        }
    }
}

impl Default for SymbolicEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Evaluator for SymbolicEngine {
    /// Evaluation failures are reported the way a calculation backend reports
    /// them: as a textual payload with success status, never as a rejected or
    /// failed call.
    async fn evaluate(&self, expression: &str) -> Result<Evaluation, EvaluatorError> {
        match self.evaluate_number(expression) {
            Ok(value) => Ok(Evaluation::Number(value)),
            Err(err) => Ok(Evaluation::Text(format!(
                "Error: Invalid mathematical expression - {}",
                err.message()
            ))),
        }
    }
}

/// Rewrite calculator notation into the dialect `evalexpr` understands.
fn prepare_expression(expression: &str) -> Result<String, EngineError> {
    let expression = expression.trim();
    if expression.is_empty() {
        return Err(EngineError::new("empty expression"));
    }

    // log(x) means log base 10, which evalexpr lacks; rewrite before the
    // identifier pass so the emitted math::ln calls are left untouched by it.
    let expression = rewrite_log_base10(expression);
    let expression = qualify_identifiers(&expression);
    let expression = expression.replace("**", "^");
    Ok(promote_integer_literals(&expression))
}

/// Replace each standalone `log(...)` call with `math::ln(...)/math::ln(10)`,
/// matching parentheses so nested calls keep their arguments intact. Calls with
/// no closing parenthesis are left as-is for the parser to reject.
fn rewrite_log_base10(expression: &str) -> String {
    if !expression.contains("log(") {
        return expression.to_string();
    }

    let chars: Vec<char> = expression.chars().collect();
    let mut result = String::new();
    let mut i = 0;

    while i < chars.len() {
        let at_call = i + 4 <= chars.len()
            && chars[i..i + 4] == ['l', 'o', 'g', '(']
            && (i == 0 || !chars[i - 1].is_alphanumeric());

        if at_call {
            let mut depth = 1usize;
            let mut j = i + 4;
            while j < chars.len() && depth > 0 {
                match chars[j] {
                    '(' => depth += 1,
                    ')' => depth -= 1,
                    _ => {}
                }
                j += 1;
            }

            if depth == 0 {
                let argument: String = chars[i + 4..j - 1].iter().collect();
                result.push_str("math::ln(");
                result.push_str(&rewrite_log_base10(&argument));
                result.push_str(")/math::ln(10)");
                i = j;
                continue;
            }
        }

        result.push(chars[i]);
        i += 1;
    }

    result
}

/// Map function names in call position to evalexpr's `math::` namespace and the
/// standalone constants `pi` and `e` to `math::PI` / `math::E`. Replacement is
/// word-boundary aware so `exp` never loses its `e` and identifiers like
/// `asin` are never mangled into `a` + `sin`. Already-qualified `math::` names
/// pass through untouched.
fn qualify_identifiers(expression: &str) -> String {
    let chars: Vec<char> = expression.chars().collect();
    let mut result = String::new();
    let mut i = 0;

    while i < chars.len() {
        let at_word_start =
            chars[i].is_ascii_alphabetic() && (i == 0 || !chars[i - 1].is_alphanumeric());
        if !at_word_start {
            result.push(chars[i]);
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && chars[i].is_ascii_alphabetic() {
            i += 1;
        }
        let word: String = chars[start..i].iter().collect();

        // Pre-qualified names (emitted by the log rewrite) are copied verbatim.
        if word == "math" && chars.get(i) == Some(&':') && chars.get(i + 1) == Some(&':') {
            result.push_str("math::");
            i += 2;
            while i < chars.len() && chars[i].is_ascii_alphanumeric() {
                result.push(chars[i]);
                i += 1;
            }
            continue;
        }

        let standalone = !chars.get(i).map_or(false, |c| c.is_ascii_digit());
        let mut k = i;
        while k < chars.len() && chars[k].is_whitespace() {
            k += 1;
        }
        let in_call_position = chars.get(k) == Some(&'(');

        if standalone && in_call_position && MATH_FUNCTIONS.contains(&word.as_str()) {
            result.push_str("math::");
            result.push_str(&word);
        } else if standalone && word == "pi" {
            result.push_str("math::PI");
        } else if standalone && word == "e" {
            result.push_str("math::E");
        } else {
            result.push_str(&word);
        }
    }

    result
}

/// Append `.0` to integer literals so arithmetic happens in floating point.
/// evalexpr divides integers integrally; a calculator answering `3` for `7/2`
/// would not survive first contact with a user.
fn promote_integer_literals(expression: &str) -> String {
    let chars: Vec<char> = expression.chars().collect();
    let mut result = String::new();
    let mut i = 0;

    while i < chars.len() {
        let at_literal_start =
            chars[i].is_ascii_digit() && (i == 0 || (!chars[i - 1].is_ascii_digit() && chars[i - 1] != '.'));
        if at_literal_start {
            while i < chars.len() && chars[i].is_ascii_digit() {
                result.push(chars[i]);
                i += 1;
            }
            if chars.get(i) != Some(&'.') {
                result.push_str(".0");
            }
        } else {
            result.push(chars[i]);
            i += 1;
        }
    }

    result
}
