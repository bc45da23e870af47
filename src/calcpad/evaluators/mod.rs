//! Concrete [`Evaluator`](crate::calcpad::evaluator::Evaluator) implementations.
//!
//! Each submodule offers one backend that speaks a particular evaluation surface
//! while conforming to the uniform calcpad contract.

pub mod remote;
pub mod symbolic;

pub use remote::RemoteEvaluator;
pub use symbolic::SymbolicEngine;
