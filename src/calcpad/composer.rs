//! The `composer` module turns discrete calculator key events into two strings that
//! must never drift apart: the human-facing display and the machine-facing
//! expression. It also owns the submit round trip that hands the expression to an
//! [`Evaluator`] and folds the outcome back into state.
//!
//! **Key pieces:**
//! - [`ComposerState`]: one immutable record of `{display, expression, is_result}`
//!   with pure transitions; every key press produces a new state.
//! - [`Composer`]: a session owning one state plus an `Arc<dyn Evaluator>`, the way
//!   an interactive frontend would hold it.
//!
//! The machine has exactly two logical states. While composing, digit, operator,
//! function and delete presses append (or positionally remove) input. After a
//! submit, the state shows a result; the next digit press starts a fresh number and
//! the next operator or function press continues the calculation from the shown
//! value. `clear` forces the empty composing state from anywhere.

use std::sync::Arc;

use log::{debug, error};

use crate::calcpad::evaluator::{Evaluation, Evaluator, EvaluatorError};

/// Display token shown when the evaluator answered with a non-success status.
pub const ERROR_TOKEN: &str = "Error";

/// Display token shown when the evaluator could not be reached at all.
pub const CONNECTION_ERROR_TOKEN: &str = "Connection Error";

/// Operator and constant keys of the calculator pad.
///
/// Each key carries exactly one token, appended verbatim to both the display and
/// the expression. Multiplication, division and π use their rendering glyphs
/// (`×`, `÷`, `π`); [`ComposerState::submission`] projects them to evaluator
/// syntax (`*`, `/`, `pi`) on the way out. π stays symbolic end to end so the
/// backend keeps full precision; a decimal approximation is never inserted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// Exponentiation, rendered as `**`.
    Power,
    OpenParen,
    CloseParen,
    /// The π shortcut key.
    Pi,
}

impl Operator {
    /// The token this key appends to the composition.
    pub fn token(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
            Operator::Power => "**",
            Operator::OpenParen => "(",
            Operator::CloseParen => ")",
            Operator::Pi => "π",
        }
    }
}

/// Function keys of the calculator pad.
///
/// Pressing one mid-composition appends `name(` and leaves the call unclosed for
/// the user to complete; an unmatched `(` is a perfectly normal intermediate
/// state, and truly malformed input is the evaluator's problem to report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    /// Base-10 logarithm.
    Log,
    /// Natural logarithm.
    Ln,
    Sqrt,
    Exp,
}

impl Function {
    /// The function name as it appears in the composition and on the wire.
    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Log => "log",
            Function::Ln => "ln",
            Function::Sqrt => "sqrt",
            Function::Exp => "exp",
        }
    }
}

/// What the user has typed so far.
///
/// The three fields move together: every transition updates `display` and
/// `expression` atomically, so the strings cannot drift out of sync the way they
/// can when a frontend keeps them in separate ad hoc variables. The cleared state
/// is `{display: "0", expression: "", is_result: false}`; `display` is never the
/// empty string.
///
/// # Examples
///
/// ```rust
/// use calcpad::{ComposerState, Operator};
///
/// let state = ComposerState::new()
///     .digit('2')
///     .operator(Operator::Add)
///     .digit('3');
///
/// assert_eq!(state.display(), "2+3");
/// assert_eq!(state.expression(), "2+3");
/// assert!(!state.is_result());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposerState {
    display: String,
    expression: String,
    is_result: bool,
}

impl ComposerState {
    /// The cleared state: display `"0"`, empty expression, composing.
    pub fn new() -> Self {
        ComposerState {
            display: "0".to_string(),
            expression: String::new(),
            is_result: false,
        }
    }

    /// The text currently rendered to the user. Never empty.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The machine-facing accumulation of the same input. Empty in the cleared
    /// state; otherwise in lockstep with the display.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// True immediately after a submit produced a displayed value (result or
    /// error token), until the next key press.
    pub fn is_result(&self) -> bool {
        self.is_result
    }

    /// Press a digit key (`'0'..='9'` or `'.'`).
    ///
    /// Starting from the fresh `"0"` display, or from a shown result, the digit
    /// begins a new number and replaces both strings. Otherwise it appends. No
    /// numeric well-formedness is enforced here; `"1.2.3"` is composed happily
    /// and surfaces later as an evaluator error.
    pub fn digit(&self, digit: char) -> Self {
        if self.display == "0" || self.is_result {
            ComposerState {
                display: digit.to_string(),
                expression: digit.to_string(),
                is_result: false,
            }
        } else {
            let mut next = self.clone();
            next.display.push(digit);
            next.expression.push(digit);
            next
        }
    }

    /// Press an operator or constant key.
    ///
    /// After a result, the shown value seeds the new expression and the operator
    /// continues from it. On the fresh `"0"` display the token replaces the
    /// placeholder zero. Otherwise it appends.
    pub fn operator(&self, operator: Operator) -> Self {
        let token = operator.token();
        if self.is_result {
            let seeded = format!("{}{}", self.display, token);
            ComposerState {
                display: seeded.clone(),
                expression: seeded,
                is_result: false,
            }
        } else if self.display == "0" {
            ComposerState {
                display: token.to_string(),
                expression: token.to_string(),
                is_result: false,
            }
        } else {
            let mut next = self.clone();
            next.display.push_str(token);
            next.expression.push_str(token);
            next
        }
    }

    /// Press a function key.
    ///
    /// After a result, the function wraps the shown value (`sin(14)`), which is
    /// how "apply sin to the answer" works. Otherwise `name(` is appended and
    /// the call is left unclosed for the user to finish.
    pub fn function(&self, function: Function) -> Self {
        let name = function.name();
        if self.is_result {
            let wrapped = format!("{}({})", name, self.display);
            ComposerState {
                display: wrapped.clone(),
                expression: wrapped,
                is_result: false,
            }
        } else {
            let mut next = self.clone();
            next.display.push_str(name);
            next.display.push('(');
            next.expression.push_str(name);
            next.expression.push('(');
            next
        }
    }

    /// Press the delete key.
    ///
    /// Removes the last character of both strings. Deletion is strictly
    /// positional: deleting inside `sin(` yields `sin`, not an empty string.
    /// Once the display is down to a single character it resets to the cleared
    /// strings instead, so the display never empties.
    pub fn delete_last(&self) -> Self {
        if self.display.chars().count() > 1 {
            let mut next = self.clone();
            next.display.pop();
            next.expression.pop();
            next
        } else {
            ComposerState {
                display: "0".to_string(),
                expression: String::new(),
                is_result: self.is_result,
            }
        }
    }

    /// Press the clear key. Unconditionally returns the cleared state.
    pub fn clear(&self) -> Self {
        ComposerState::new()
    }

    /// The string to hand to an evaluator, as a pure projection.
    ///
    /// Takes the expression (or the display when the expression is empty) and
    /// replaces the rendering glyphs with evaluator syntax: `×` becomes `*`,
    /// `÷` becomes `/`, `π` becomes `pi`. The substitutions are never written
    /// back into the state.
    pub fn submission(&self) -> String {
        let source = if self.expression.is_empty() {
            &self.display
        } else {
            &self.expression
        };
        source.replace('×', "*").replace('÷', "/").replace('π', "pi")
    }

    /// Fold an evaluation outcome back into the state.
    ///
    /// The shown text becomes both strings, so a follow-up operator or function
    /// press continues the calculation from it.
    pub fn show_result(&self, shown: impl Into<String>) -> Self {
        let shown = shown.into();
        ComposerState {
            display: shown.clone(),
            expression: shown,
            is_result: true,
        }
    }
}

impl Default for ComposerState {
    fn default() -> Self {
        Self::new()
    }
}

/// A calculator session: one [`ComposerState`] plus the evaluator it submits to.
///
/// The composer performs no interpretation of evaluation failures. Whatever comes
/// back (number, verbatim error text, or one of the fixed error tokens) is shown
/// and seeds the next composition; there is no retry and no separate error
/// channel.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use calcpad::{Composer, Operator, SymbolicEngine};
///
/// #[tokio::main]
/// async fn main() {
///     let mut composer = Composer::new(Arc::new(SymbolicEngine::new()));
///
///     composer.press_digit('2');
///     composer.press_operator(Operator::Add);
///     composer.press_digit('3');
///
///     let state = composer.submit().await;
///     assert_eq!(state.display(), "5");
/// }
/// ```
pub struct Composer {
    evaluator: Arc<dyn Evaluator>,
    state: ComposerState,
}

impl Composer {
    /// Create a session in the cleared state.
    pub fn new(evaluator: Arc<dyn Evaluator>) -> Self {
        Composer {
            evaluator,
            state: ComposerState::new(),
        }
    }

    /// The current state.
    pub fn state(&self) -> &ComposerState {
        &self.state
    }

    /// Shortcut for `state().display()`.
    pub fn display(&self) -> &str {
        self.state.display()
    }

    pub fn press_digit(&mut self, digit: char) {
        self.state = self.state.digit(digit);
    }

    pub fn press_operator(&mut self, operator: Operator) {
        self.state = self.state.operator(operator);
    }

    pub fn press_function(&mut self, function: Function) {
        self.state = self.state.function(function);
    }

    pub fn delete_last(&mut self) {
        self.state = self.state.delete_last();
    }

    pub fn clear(&mut self) {
        self.state = self.state.clear();
    }

    /// Submit the current composition for evaluation.
    ///
    /// Normalizes the outgoing copy, awaits the evaluator, and shows the outcome:
    /// numbers are formatted for display, textual payloads are shown verbatim,
    /// rejected requests show [`ERROR_TOKEN`] and transport failures show
    /// [`CONNECTION_ERROR_TOKEN`]. All four paths leave the session showing a
    /// result; a failed submit is terminal for that submission and the user can
    /// immediately clear or keep composing from the token.
    pub async fn submit(&mut self) -> &ComposerState {
        let submission = self.state.submission();
        debug!("submitting expression {:?}", submission);

        let shown = match self.evaluator.evaluate(&submission).await {
            Ok(Evaluation::Number(value)) => format_number(value),
            Ok(Evaluation::Text(text)) => text,
            Err(err) => {
                error!("Composer::submit(): {}", err);
                match err {
                    EvaluatorError::Rejected(_) => ERROR_TOKEN.to_string(),
                    EvaluatorError::Unreachable(_) => CONNECTION_ERROR_TOKEN.to_string(),
                }
            }
        };

        self.state = self.state.show_result(shown);
        &self.state
    }
}

/// Format a numeric result for display.
///
/// Integral values below 1e15 in magnitude render without a fractional part,
/// everything else with up to ten fractional digits and trailing zeros trimmed.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let formatted = format!("{:.10}", value);
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}
