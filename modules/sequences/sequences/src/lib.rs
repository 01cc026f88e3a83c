//! Sequences Module Implementation
//!
//! Builtin integer-sequence services (Fibonacci, factorials, primes)
//! behind the shared `SequenceApi` contract, plus the catalog that binds
//! them into a directory. The public API lives in `sequences-sdk` and is
//! re-exported here.

pub use sequences_sdk::{Response, SequenceApi, SequenceDirectory, SequenceInfo};

pub mod catalog;
pub mod domain;

pub use catalog::{FAMILY_TAG, builtin_services, host_builtins, is_family};
pub use domain::service::{ComputeSequence, SequenceService};
