//! # calcpad
//!
//! calcpad is a Rust toolkit for building scientific-calculator frontends. It owns the
//! part of a calculator that is easy to get subtly wrong (turning a stream of button
//! presses into a display string and a submittable expression) and delegates the part
//! that is easy to get catastrophically wrong, parsing and evaluating math, to
//! substitutable evaluator backends.
//!
//! The crate provides:
//!
//! * **Composition**: [`ComposerState`], an immutable record of what the user has typed
//!   so far, with pure transition methods for digit, operator, function, delete and
//!   clear presses
//! * **Sessions**: [`Composer`], which owns one `ComposerState` plus an evaluator and
//!   drives the submit → evaluate → show-result round trip
//! * **Evaluator Flexibility**: the [`Evaluator`] trait, implemented by
//!   [`RemoteEvaluator`] (HTTP client for a calculation backend) and
//!   [`SymbolicEngine`] (local, `evalexpr`-backed), and trivially stubbable in tests
//!
//! ## Core Concepts
//!
//! ### ComposerState: Pure Transitions (The Foundation)
//!
//! [`ComposerState`] keeps the human-facing display and the machine-facing expression
//! in lockstep. Every transition returns a new state, so the two strings can never
//! drift apart behind your back:
//!
//! ```rust
//! use calcpad::{ComposerState, Function, Operator};
//!
//! let state = ComposerState::new()
//!     .digit('2')
//!     .operator(Operator::Add)
//!     .function(Function::Sin);
//!
//! assert_eq!(state.display(), "2+sin(");
//! assert_eq!(state.expression(), "2+sin(");
//! ```
//!
//! Multiplication, division and π render as `×`, `÷` and `π`; the evaluator-syntax
//! substitutions (`*`, `/`, `pi`) are a pure projection computed by
//! [`ComposerState::submission`] and are never written back into the state:
//!
//! ```rust
//! use calcpad::{ComposerState, Operator};
//!
//! let state = ComposerState::new()
//!     .digit('6')
//!     .operator(Operator::Multiply)
//!     .operator(Operator::Pi);
//!
//! assert_eq!(state.display(), "6×π");
//! assert_eq!(state.submission(), "6*pi");
//! assert_eq!(state.expression(), "6×π");
//! ```
//!
//! ### Composer: The Session
//!
//! [`Composer`] wires a state to an [`Evaluator`] and exposes the asynchronous
//! [`submit`](Composer::submit) step. Every evaluation outcome (a numeric result,
//! verbatim error text from the backend, the generic `"Error"` token for rejected
//! requests, or `"Connection Error"` when the backend is unreachable) lands back in
//! the display and seeds the next composition:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use calcpad::{Composer, Operator, RemoteEvaluator};
//!
//! #[tokio::main]
//! async fn main() {
//!     calcpad::init_logger();
//!
//!     let evaluator = Arc::new(RemoteEvaluator::new("http://localhost:8000"));
//!     let mut composer = Composer::new(evaluator);
//!
//!     composer.press_digit('2');
//!     composer.press_operator(Operator::Add);
//!     composer.press_digit('3');
//!
//!     let state = composer.submit().await;
//!     println!("= {}", state.display());
//! }
//! ```
//!
//! ### Evaluator Backends
//!
//! [`RemoteEvaluator`] speaks the calculation backend's wire protocol
//! (`POST /calculate`, `GET /health`). [`SymbolicEngine`] evaluates locally through
//! the `evalexpr` crate with calculator notation (`log` base 10, `ln` natural,
//! `**` exponentiation, `pi`/`e` constants). Both implement [`Evaluator`], so a
//! `Composer` cannot tell them apart, and neither can your tests. That is the point.

use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialise the global [`env_logger`] subscriber exactly once.
///
/// The helper is intentionally lightweight so that applications embedding calcpad can
/// opt in to simple `RUST_LOG` driven diagnostics without having to choose a specific
/// logging backend upfront.
///
/// ```rust
/// calcpad::init_logger();
/// log::info!("Logger is ready");
/// ```
pub fn init_logger() {
    INIT_LOGGER.call_once(|| {
        env_logger::init();
    });
}

// Import the top-level `calcpad` module.
pub mod calcpad;

// Re-exporting key items for easier external access.
pub use crate::calcpad::composer::{
    Composer, ComposerState, Function, Operator, CONNECTION_ERROR_TOKEN, ERROR_TOKEN,
};
pub use crate::calcpad::config::CalcpadConfig;
pub use crate::calcpad::evaluator;
pub use crate::calcpad::evaluator::{Evaluation, Evaluator, EvaluatorError};
pub use crate::calcpad::evaluators;
pub use crate::calcpad::evaluators::remote::RemoteEvaluator;
pub use crate::calcpad::evaluators::symbolic::SymbolicEngine;
