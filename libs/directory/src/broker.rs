//! The broker seam: naming contexts, bindings, and liveness probes.
//!
//! A [`Broker`] is the substrate a [`crate::Directory`] runs on. Bound
//! objects are type-erased here; the directory layer restores the concrete
//! service type on resolution.

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::name::ServiceName;

/// Type-erased reference to a bound service object.
///
/// By convention the erased value is an `Arc<S>` (with `S` the service
/// interface), so readers recover it with `downcast_ref::<Arc<S>>()`.
pub type ObjectRef = Arc<dyn Any + Send + Sync>;

/// Opaque handle to a naming context held by a broker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespaceRef(Arc<str>);

impl NamespaceRef {
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// One page of a listing, plus the cursor for the next page.
///
/// `next` is `None` once the listing is exhausted. Cursors are opaque to
/// callers; only the broker that produced one can interpret it.
#[derive(Debug, Clone)]
pub struct ListPage {
    pub names: Vec<ServiceName>,
    pub next: Option<String>,
}

/// Errors surfaced by broker operations.
#[derive(Debug, thiserror::Error)]
pub enum BrokerError {
    #[error("invalid namespace name '{0}'")]
    InvalidNamespace(String),
    #[error("namespace '{0}' already exists")]
    NamespaceExists(String),
    #[error("namespace '{0}' not found")]
    NamespaceNotFound(String),
    #[error("name '{0}' is not bound")]
    NotBound(ServiceName),
    #[error("name '{0}' is bound but its service is unreachable")]
    Unreachable(ServiceName),
    #[error("invalid list cursor '{0}'")]
    InvalidCursor(String),
    #[error("broker transport failed: {0}")]
    Transport(String),
}

/// Guard for a live registration.
///
/// Dropping the guard marks the binding unreachable without removing the
/// name: later lookups still see the name, but liveness probes against it
/// fail. This mirrors what happens when a hosting process dies while its
/// registration is still on record.
#[derive(Debug)]
pub struct ServiceBinding {
    name: ServiceName,
    live: Arc<AtomicBool>,
}

impl ServiceBinding {
    /// Intended for [`Broker`] implementations handing out guards.
    #[must_use]
    pub fn new(name: ServiceName, live: Arc<AtomicBool>) -> Self {
        Self { name, live }
    }

    #[must_use]
    pub fn name(&self) -> &ServiceName {
        &self.name
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

impl Drop for ServiceBinding {
    fn drop(&mut self) {
        self.live.store(false, Ordering::Release);
        tracing::debug!(name = %self.name, "service binding dropped");
    }
}

/// Naming and connectivity substrate for service directories.
#[async_trait]
pub trait Broker: Send + Sync {
    /// Create a namespace. Fails with [`BrokerError::NamespaceExists`] when
    /// it is already present.
    async fn create_namespace(&self, name: &str) -> Result<NamespaceRef, BrokerError>;

    /// Resolve an existing namespace.
    async fn namespace(&self, name: &str) -> Result<NamespaceRef, BrokerError>;

    /// Bind `object` under `name`, replacing any previous binding for the
    /// same name in one step.
    async fn bind(
        &self,
        ns: &NamespaceRef,
        name: &ServiceName,
        object: ObjectRef,
    ) -> Result<ServiceBinding, BrokerError>;

    /// Remove the binding for `name`.
    async fn unbind(&self, ns: &NamespaceRef, name: &ServiceName) -> Result<(), BrokerError>;

    /// Look up the object bound to `name`. Does not check liveness.
    async fn resolve(&self, ns: &NamespaceRef, name: &ServiceName)
    -> Result<ObjectRef, BrokerError>;

    /// Actively probe the binding for liveness.
    async fn touch(&self, ns: &NamespaceRef, name: &ServiceName) -> Result<(), BrokerError>;

    /// One page of bound names, ordered by canonical form.
    async fn list(
        &self,
        ns: &NamespaceRef,
        page_size: usize,
        cursor: Option<&str>,
    ) -> Result<ListPage, BrokerError>;
}
