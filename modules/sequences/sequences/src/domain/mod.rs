//! Domain layer: the service wrapper and the sequence algorithms.

pub mod seq;
pub mod service;

pub use service::{ComputeSequence, SequenceService};
