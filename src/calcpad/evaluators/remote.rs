//! HTTP client for a remote calculation backend.
//!
//! The backend exposes two routes: `POST /calculate`, which accepts
//! `{"expression": "..."}` and answers `{"result": <number or string>,
//! "original_expression": "..."}`, and `GET /health` for liveness probes. The
//! backend reports evaluation errors it understood as *string* results with
//! success status; only broken requests and broken transport surface as
//! [`EvaluatorError`]s.
//!
//! # Example
//!
//! ```rust,no_run
//! use calcpad::{Evaluator, RemoteEvaluator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let evaluator = RemoteEvaluator::new("http://localhost:8000");
//!     let outcome = evaluator.evaluate("2+3*4").await?;
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::calcpad::config::CalcpadConfig;
use crate::calcpad::evaluator::{Evaluation, Evaluator, EvaluatorError};

#[derive(Serialize)]
struct CalculationRequest<'a> {
    expression: &'a str,
}

/// The backend echoes the submitted expression alongside the result.
#[derive(Deserialize)]
struct CalculationResponse {
    result: ResultPayload,
    original_expression: String,
}

/// `result` is a JSON number on success and a string when the backend phrased
/// an evaluation error itself.
#[derive(Deserialize)]
#[serde(untagged)]
enum ResultPayload {
    Number(f64),
    Text(String),
}

#[derive(Deserialize)]
struct HealthResponse {
    status: String,
    message: String,
}

/// Client wrapper for a remote calculation backend.
///
/// The client is cheap to clone and safe to share; it holds a pooled
/// [`reqwest::Client`] and applies its timeout per request.
#[derive(Clone)]
pub struct RemoteEvaluator {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl RemoteEvaluator {
    /// Create an evaluator for the backend at `base_url`, with the default
    /// 30 second request timeout. A trailing slash on the URL is tolerated.
    pub fn new(base_url: &str) -> Self {
        RemoteEvaluator {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: CalcpadConfig::default().request_timeout,
        }
    }

    /// Create an evaluator from a [`CalcpadConfig`].
    pub fn from_config(config: &CalcpadConfig) -> Self {
        let mut evaluator = Self::new(&config.evaluator_url);
        evaluator.timeout = config.request_timeout;
        evaluator
    }

    /// Set the per-request timeout.
    pub fn with_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = timeout;
        self
    }

    /// Probe the backend's `/health` route and return its reported status
    /// (`"healthy"` for the reference backend).
    ///
    /// Failures map exactly like [`evaluate`](Self::evaluate) failures:
    /// transport problems are [`EvaluatorError::Unreachable`], everything else
    /// is [`EvaluatorError::Rejected`].
    pub async fn health(&self) -> Result<String, EvaluatorError> {
        let url = format!("{}/health", self.base_url);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| {
                error!("RemoteEvaluator::health(): transport failure: {}", err);
                EvaluatorError::Unreachable(err.to_string())
            })?;

        if !response.status().is_success() {
            return Err(EvaluatorError::Rejected(format!(
                "health probe answered with status {}",
                response.status()
            )));
        }

        let health: HealthResponse = response.json().await.map_err(|err| {
            EvaluatorError::Rejected(format!("unreadable health payload: {}", err))
        })?;

        debug!("backend health: {} ({})", health.status, health.message);
        Ok(health.status)
    }
}

#[async_trait]
impl Evaluator for RemoteEvaluator {
    async fn evaluate(&self, expression: &str) -> Result<Evaluation, EvaluatorError> {
        let url = format!("{}/calculate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&CalculationRequest { expression })
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| {
                error!("RemoteEvaluator::evaluate(): transport failure: {}", err);
                EvaluatorError::Unreachable(err.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                "RemoteEvaluator::evaluate(): backend answered {}: {}",
                status, body
            );
            return Err(EvaluatorError::Rejected(format!(
                "backend answered with status {}",
                status
            )));
        }

        let payload: CalculationResponse = response.json().await.map_err(|err| {
            error!("RemoteEvaluator::evaluate(): unreadable payload: {}", err);
            EvaluatorError::Rejected(format!("unreadable evaluator payload: {}", err))
        })?;

        debug!(
            "evaluated {:?} via {}",
            payload.original_expression, self.base_url
        );

        match payload.result {
            ResultPayload::Number(value) => Ok(Evaluation::Number(value)),
            ResultPayload::Text(text) => Ok(Evaluation::Text(text)),
        }
    }
}
