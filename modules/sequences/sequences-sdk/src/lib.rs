//! Sequences SDK
//!
//! Contract crate for integer-sequence services:
//! - `SequenceApi` trait implemented by services and consumed by clients
//! - `Response`, the per-element result (int / digit string / error)
//! - `SequenceInfo`, the identity block every service carries
//! - `SequenceClient`, the logging and rendering proxy used by callers
//!
//! ## Usage
//!
//! ```ignore
//! use sequences_sdk::{SequenceClient, SequenceDirectory};
//!
//! let service = directory.resolve(&name).await?;
//! let client = SequenceClient::new(service, name, false);
//! let response = client.number(10).await?;
//! println!("{}", client.render(10, &response));
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod client;

// Re-export main types at crate root for convenience
pub use api::{
    DEFAULT_MAX_BATCH, InvokeError, Response, SequenceApi, SequenceDirectory, SequenceInfo,
};
pub use client::SequenceClient;
