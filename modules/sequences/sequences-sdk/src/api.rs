//! Sequence API trait and types
//!
//! Contract trait and types shared by sequence services and their clients.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use seqhub_directory::Directory;

/// Directory instantiated for the sequence interface.
pub type SequenceDirectory = Directory<dyn SequenceApi>;

/// Default cap on the number of indices in one batch request.
///
/// Enforced by callers before a request goes out; services themselves
/// accept batches of any size.
pub const DEFAULT_MAX_BATCH: usize = 100;

/// Immutable identity of a sequence implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceInfo {
    /// Human-readable sequence name, e.g. "Fibonacci numbers".
    pub display_name: String,
    /// Largest index the implementation accepts.
    pub max_index: i32,
    /// Free-form description of the sequence and the algorithm behind it.
    pub description: String,
}

/// Result of a single element request.
///
/// Small values travel as machine integers, large ones as decimal digit
/// strings, and a per-element failure as an error message in place of the
/// value. Batches carry one response per slot and never fail as a whole
/// because one element did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Response {
    /// Value small enough for a machine integer.
    Int { value: i32 },
    /// Decimal digits of a value beyond machine-integer range.
    #[serde(rename = "string")]
    Digits { value: String },
    /// Why this element could not be produced.
    Error { message: String },
}

impl Response {
    #[must_use]
    pub fn int(value: i32) -> Self {
        Self::Int { value }
    }

    #[must_use]
    pub fn digits(value: impl Into<String>) -> Self {
        Self::Digits {
            value: value.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// Error type for sequence invocations.
///
/// Covers the call path only; element-level failures travel inside
/// [`Response::Error`].
#[derive(thiserror::Error, Debug)]
pub enum InvokeError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Sequence service interface.
///
/// Implementations are bound into a [`SequenceDirectory`] and resolved by
/// clients; the same trait serves both sides.
#[async_trait]
pub trait SequenceApi: Send + Sync {
    /// Identity of this implementation.
    async fn info(&self) -> Result<SequenceInfo, InvokeError>;

    /// One element of the sequence.
    async fn number(&self, index: i32) -> Result<Response, InvokeError>;

    /// One response per requested index, in request order.
    async fn numbers(&self, indices: &[i32]) -> Result<Vec<Response>, InvokeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn responses_serialize_with_kind_tags() {
        assert_eq!(
            serde_json::to_string(&Response::int(55)).unwrap(),
            r#"{"kind":"int","value":55}"#
        );
        assert_eq!(
            serde_json::to_string(&Response::digits("3628800")).unwrap(),
            r#"{"kind":"string","value":"3628800"}"#
        );
        assert_eq!(
            serde_json::to_string(&Response::error("boom")).unwrap(),
            r#"{"kind":"error","message":"boom"}"#
        );
    }

    #[test]
    fn responses_roundtrip_through_json() {
        for response in [
            Response::int(-1),
            Response::digits("0"),
            Response::error("x"),
        ] {
            let json = serde_json::to_string(&response).unwrap();
            assert_eq!(serde_json::from_str::<Response>(&json).unwrap(), response);
        }
    }

    #[test]
    fn error_arm_is_recognized() {
        assert!(Response::error("nope").is_error());
        assert!(!Response::int(0).is_error());
        assert!(!Response::digits("1").is_error());
    }
}
