//! Service directory over pluggable brokers
//!
//! This crate provides the naming layer shared by every seqhub process:
//! - `ServiceName`, the two-part `id.kind` name
//! - `Broker`, the substrate trait (namespaces, bindings, liveness)
//! - `LocalBroker`, the in-process substrate
//! - `Directory<S>`, the typed facade services are registered with and
//!   resolved from
//!
//! ## Usage
//!
//! ```ignore
//! use seqhub_directory::{Directory, DirectoryConfig, LocalBroker, ServiceName};
//!
//! let broker = Arc::new(LocalBroker::new());
//! let dir: Directory<dyn MyApi> = Directory::new(broker, DirectoryConfig::default());
//!
//! let name: ServiceName = "fib.core".parse()?;
//! let _guard = dir.bind(&name, implementation).await?;
//! let service = dir.resolve(&name).await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod broker;
pub mod directory;
pub mod local;
pub mod name;

// Re-export main types at crate root for convenience
pub use broker::{Broker, BrokerError, ListPage, NamespaceRef, ObjectRef, ServiceBinding};
pub use directory::{
    DEFAULT_NAMESPACE, DEFAULT_PAGE_SIZE, Directory, DirectoryConfig, DirectoryError,
};
pub use local::LocalBroker;
pub use name::{NameError, ServiceName};
