//! Shared request handling for sequence services.
//!
//! Every builtin service is the same [`SequenceService`] wrapped around a
//! different [`ComputeSequence`] algorithm: identity, bounds validation,
//! fault capture, and request logging live here, the arithmetic lives in
//! [`crate::domain::seq`].

use std::time::Instant;

use async_trait::async_trait;

use sequences_sdk::{InvokeError, Response, SequenceApi, SequenceInfo};

/// One sequence algorithm.
///
/// Indices arrive already validated against the declared bounds. A
/// returned error is captured into an error response for that element
/// rather than failing the whole request.
pub trait ComputeSequence: Send + Sync {
    fn compute(&self, index: i32) -> anyhow::Result<Response>;
}

/// A sequence service: identity plus an algorithm behind shared
/// validation and logging.
pub struct SequenceService {
    info: SequenceInfo,
    algorithm: Box<dyn ComputeSequence>,
}

impl SequenceService {
    #[must_use]
    pub fn new(info: SequenceInfo, algorithm: Box<dyn ComputeSequence>) -> Self {
        Self { info, algorithm }
    }

    #[must_use]
    pub fn info(&self) -> &SequenceInfo {
        &self.info
    }

    /// Validate, compute, and capture any algorithm fault.
    fn get(&self, index: i32) -> Response {
        if index < 0 {
            return Response::error("index cannot be negative");
        }
        if index > self.info.max_index {
            return Response::error(format!(
                "index is too big: maximal supported index is {}",
                self.info.max_index
            ));
        }
        match self.algorithm.compute(index) {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(
                    sequence = %self.info.display_name,
                    index,
                    error = %error,
                    "computation failed"
                );
                Response::error(error.to_string())
            }
        }
    }
}

#[async_trait]
impl SequenceApi for SequenceService {
    async fn info(&self) -> Result<SequenceInfo, InvokeError> {
        Ok(self.info.clone())
    }

    async fn number(&self, index: i32) -> Result<Response, InvokeError> {
        tracing::info!(sequence = %self.info.display_name, index, "requested number");
        let started = Instant::now();
        let response = self.get(index);
        tracing::info!(
            sequence = %self.info.display_name,
            elapsed_ms = started.elapsed().as_millis(),
            "spent on computation"
        );
        Ok(response)
    }

    async fn numbers(&self, indices: &[i32]) -> Result<Vec<Response>, InvokeError> {
        tracing::info!(sequence = %self.info.display_name, ?indices, "requested numbers");
        let started = Instant::now();
        let responses = indices.iter().map(|&index| self.get(index)).collect();
        tracing::info!(
            sequence = %self.info.display_name,
            elapsed_ms = started.elapsed().as_millis(),
            "spent on computation"
        );
        Ok(responses)
    }
}
