use async_trait::async_trait;
use std::error::Error;
use std::fmt;

/// An Evaluator turns a normalized expression string into a numeric result or a
/// human-readable error. It is the collaborator boundary of the crate: the
/// [`Composer`](crate::Composer) composes, an Evaluator computes, and neither knows
/// how the other works. Implementations may call a remote service, run a local
/// engine, or return canned answers from a test stub.
// src/calcpad/evaluator.rs

/// A successful evaluator response.
///
/// Backends report two kinds of success: an actual number, or a textual payload
/// delivered with success status. The text variant carries evaluation errors the
/// backend understood and phrased itself (malformed expression, domain error); the
/// composer renders it verbatim, without interpreting why evaluation failed.
#[derive(Clone, Debug, PartialEq)]
pub enum Evaluation {
    /// A computed numeric value.
    Number(f64),
    /// A human-readable message returned in place of a number.
    Text(String),
}

/// A failed evaluator call, split along the one line the composer cares about:
/// did the evaluator answer at all?
#[derive(Clone, Debug, PartialEq)]
pub enum EvaluatorError {
    /// The evaluator responded, but with a non-success status or an unusable
    /// payload. Rendered as the generic error token.
    Rejected(String),
    /// The request never settled at the transport level (connection refused, DNS
    /// failure, timeout). Rendered as the connection-error token so a user can
    /// tell "bad math" from "can't reach the service".
    Unreachable(String),
}

impl fmt::Display for EvaluatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluatorError::Rejected(reason) => {
                write!(f, "evaluator rejected the request: {}", reason)
            }
            EvaluatorError::Unreachable(reason) => {
                write!(f, "evaluator unreachable: {}", reason)
            }
        }
    }
}

impl Error for EvaluatorError {}

/// Trait defining the interface between the composer and an evaluation backend.
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Evaluate a single free-form expression string.
    ///
    /// The expression uses evaluator syntax: digits and decimal points, `+ - * / **`,
    /// parentheses, `name(...)` calls for
    /// `sin, cos, tan, asin, acos, atan, log, ln, sqrt, exp`, and the symbolic
    /// constants `pi` and `e`. Rendering glyphs have already been normalized away by
    /// the caller.
    async fn evaluate(&self, expression: &str) -> Result<Evaluation, EvaluatorError>;
}
