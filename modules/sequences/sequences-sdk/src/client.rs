//! Client-side proxy for a resolved sequence service.
//!
//! Wraps a resolved [`SequenceApi`] reference with request and latency
//! logging, and renders responses for display.

use std::sync::Arc;
use std::time::Instant;

use seqhub_directory::ServiceName;

use crate::api::{InvokeError, Response, SequenceApi, SequenceInfo};

/// Digit strings longer than this are elided when shortening is on.
const ELIDE_THRESHOLD: usize = 50;
/// How many digits survive on each side of an elision.
const ELIDE_KEEP: usize = 20;

/// Proxy over a resolved sequence service.
///
/// With `shorten` set, rendered digit strings longer than 50 characters
/// are cut down to their first and last 20 digits with the elided count
/// in between.
pub struct SequenceClient {
    service: Arc<dyn SequenceApi>,
    name: ServiceName,
    shorten: bool,
}

impl SequenceClient {
    #[must_use]
    pub fn new(service: Arc<dyn SequenceApi>, name: ServiceName, shorten: bool) -> Self {
        Self {
            service,
            name,
            shorten,
        }
    }

    #[must_use]
    pub fn name(&self) -> &ServiceName {
        &self.name
    }

    /// Identity of the connected service.
    pub async fn info(&self) -> Result<SequenceInfo, InvokeError> {
        self.service.info().await
    }

    /// One element, with request and latency logs around the call.
    pub async fn number(&self, index: i32) -> Result<Response, InvokeError> {
        tracing::info!(name = %self.name, index, "performing request");
        let started = Instant::now();
        let response = self.service.number(index).await?;
        tracing::info!(
            name = %self.name,
            index,
            elapsed_ms = started.elapsed().as_millis(),
            "request completed"
        );
        Ok(response)
    }

    /// One batch, logged as a single request.
    pub async fn numbers(&self, indices: &[i32]) -> Result<Vec<Response>, InvokeError> {
        tracing::info!(name = %self.name, count = indices.len(), "performing batch request");
        let started = Instant::now();
        let responses = self.service.numbers(indices).await?;
        tracing::info!(
            name = %self.name,
            count = indices.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "batch request completed"
        );
        Ok(responses)
    }

    /// Render a response for display, e.g. `fib(10) = 55`.
    #[must_use]
    pub fn render(&self, index: i32, response: &Response) -> String {
        match response {
            Response::Int { value } => format!("{}({index}) = {value}", self.name.id()),
            Response::Digits { value } if self.shorten => {
                format!("{}({index}) = {}", self.name.id(), shorten_digits(value))
            }
            Response::Digits { value } => format!("{}({index}) = {value}", self.name.id()),
            Response::Error { message } => {
                format!("error getting {}({index}): {message}", self.name.id())
            }
        }
    }
}

/// Elide the middle of digit strings longer than the threshold.
fn shorten_digits(digits: &str) -> String {
    if digits.len() <= ELIDE_THRESHOLD {
        return digits.to_owned();
    }
    let skipped = digits.len() - 2 * ELIDE_KEEP;
    format!(
        "{}...[{skipped} digits skipped]...{}",
        &digits[..ELIDE_KEEP],
        &digits[digits.len() - ELIDE_KEEP..]
    )
}
