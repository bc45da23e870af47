//! Configuration for calcpad.
//!
//! Provides the [`CalcpadConfig`] struct for pointing a
//! [`RemoteEvaluator`](crate::RemoteEvaluator) at a calculation backend.
//! Users construct this manually; no file parsing dependencies are required.
//!
//! # Example
//!
//! ```rust
//! use calcpad::CalcpadConfig;
//! use std::time::Duration;
//!
//! // Use the default (a backend on localhost:8000)
//! let config = CalcpadConfig::default();
//!
//! // Or specify a custom endpoint and timeout
//! let config = CalcpadConfig {
//!     evaluator_url: "https://calc.example.com".to_string(),
//!     request_timeout: Duration::from_secs(5),
//! };
//! ```

use std::time::Duration;

/// Connection settings for a remote evaluation backend.
///
/// This struct is intentionally minimal and users construct it however they want.
/// No TOML, YAML, or other config-file parsing dependencies are introduced.
pub struct CalcpadConfig {
    /// Base URL of the calculation backend, without a trailing slash. The
    /// evaluator appends `/calculate` and `/health` to it.
    pub evaluator_url: String,
    /// Per-request timeout applied to every call against the backend.
    pub request_timeout: Duration,
}

impl Default for CalcpadConfig {
    /// Create a config pointing at `http://localhost:8000` with a 30 second
    /// request timeout.
    ///
    /// # Example
    ///
    /// ```rust
    /// use calcpad::CalcpadConfig;
    ///
    /// let config = CalcpadConfig::default();
    /// assert_eq!(config.evaluator_url, "http://localhost:8000");
    /// ```
    fn default() -> Self {
        Self {
            evaluator_url: "http://localhost:8000".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}
