//! Typed directory facade over a [`Broker`].

use std::any::type_name;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use crate::broker::{Broker, BrokerError, NamespaceRef, ObjectRef, ServiceBinding};
use crate::name::ServiceName;

/// Namespace used by the integer-sequence deployment.
pub const DEFAULT_NAMESPACE: &str = "integer-seq";

/// Page size for walking listings.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Settings for a [`Directory`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Namespace the directory works in.
    pub namespace: String,
    /// Create the namespace on first use instead of failing.
    pub create_if_absent: bool,
    /// Page size used when walking listings.
    pub page_size: usize,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_owned(),
            create_if_absent: false,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Errors surfaced by [`Directory`] operations.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("failed to create namespace '{name}'")]
    NamespaceCreate {
        name: String,
        #[source]
        source: BrokerError,
    },
    #[error("failed to resolve namespace '{name}'")]
    NamespaceResolve {
        name: String,
        #[source]
        source: BrokerError,
    },
    /// Nothing is bound under the name.
    #[error("no service bound to name '{0}'")]
    NotFound(ServiceName),
    /// The name is on record but its service no longer answers probes.
    #[error("service '{0}' is bound but not reachable")]
    Unavailable(ServiceName, #[source] BrokerError),
    /// A service resolved, but not to the expected interface.
    #[error("service '{name}' does not implement {expected}")]
    Narrow {
        name: ServiceName,
        expected: &'static str,
    },
    #[error("directory operation failed")]
    Broker(#[from] BrokerError),
}

/// Directory of services sharing the interface `S`.
///
/// A thin, typed layer over a [`Broker`]: it owns the namespace handling
/// and the type restoration, nothing else. `S` is usually a `dyn` trait;
/// bound objects are stored as type-erased `Arc<S>` and recovered on
/// resolution.
pub struct Directory<S: ?Sized> {
    broker: Arc<dyn Broker>,
    config: DirectoryConfig,
    namespace: OnceCell<NamespaceRef>,
    _marker: PhantomData<fn() -> Arc<S>>,
}

impl<S: ?Sized + Send + Sync + 'static> Directory<S> {
    #[must_use]
    pub fn new(broker: Arc<dyn Broker>, config: DirectoryConfig) -> Self {
        Self {
            broker,
            config,
            namespace: OnceCell::new(),
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Namespace handle, acquired lazily on first use.
    ///
    /// With `create_if_absent` set, a missing namespace is created first.
    /// Losing the creation race to another party is not an error; the
    /// existing namespace is resolved instead.
    async fn namespace(&self) -> Result<&NamespaceRef, DirectoryError> {
        self.namespace
            .get_or_try_init(|| self.acquire_namespace())
            .await
    }

    async fn acquire_namespace(&self) -> Result<NamespaceRef, DirectoryError> {
        let name = self.config.namespace.as_str();
        if self.config.create_if_absent {
            match self.broker.create_namespace(name).await {
                Ok(ns) => {
                    tracing::info!(namespace = name, "created namespace");
                    return Ok(ns);
                }
                Err(BrokerError::NamespaceExists(_)) => {}
                Err(source) => {
                    return Err(DirectoryError::NamespaceCreate {
                        name: name.to_owned(),
                        source,
                    });
                }
            }
        }
        self.broker
            .namespace(name)
            .await
            .map_err(|source| DirectoryError::NamespaceResolve {
                name: name.to_owned(),
                source,
            })
    }

    /// Bind `service` under `name`, replacing any previous binding for the
    /// same name.
    ///
    /// The returned guard keeps the binding alive; see [`ServiceBinding`].
    pub async fn bind(
        &self,
        name: &ServiceName,
        service: Arc<S>,
    ) -> Result<ServiceBinding, DirectoryError> {
        let ns = self.namespace().await?;
        let object: ObjectRef = Arc::new(service);
        let binding = self.broker.bind(ns, name, object).await?;
        tracing::info!(name = %name, "bound service");
        Ok(binding)
    }

    /// Resolve `name` to a live service of type `S`.
    ///
    /// Fails with [`DirectoryError::NotFound`] when nothing is bound,
    /// [`DirectoryError::Unavailable`] when the binding no longer answers
    /// the liveness probe, and [`DirectoryError::Narrow`] when the bound
    /// object has a different interface.
    pub async fn resolve(&self, name: &ServiceName) -> Result<Arc<S>, DirectoryError> {
        let ns = self.namespace().await?;
        let object = self.broker.resolve(ns, name).await.map_err(|e| match e {
            BrokerError::NotBound(n) => DirectoryError::NotFound(n),
            other => DirectoryError::Broker(other),
        })?;
        self.broker.touch(ns, name).await.map_err(|e| match e {
            BrokerError::NotBound(n) => DirectoryError::NotFound(n),
            unreachable @ BrokerError::Unreachable(_) => {
                DirectoryError::Unavailable(name.clone(), unreachable)
            }
            other => DirectoryError::Broker(other),
        })?;
        object
            .downcast_ref::<Arc<S>>()
            .cloned()
            .ok_or_else(|| DirectoryError::Narrow {
                name: name.clone(),
                expected: type_name::<S>(),
            })
    }

    /// Remove the binding for `name`.
    pub async fn unbind(&self, name: &ServiceName) -> Result<(), DirectoryError> {
        let ns = self.namespace().await?;
        self.broker.unbind(ns, name).await.map_err(|e| match e {
            BrokerError::NotBound(n) => DirectoryError::NotFound(n),
            other => DirectoryError::Broker(other),
        })?;
        tracing::info!(name = %name, "unbound service");
        Ok(())
    }

    /// Every name currently bound in the namespace, in canonical order.
    ///
    /// Pages through the broker until the cursor runs out; listings are
    /// never truncated.
    pub async fn list(&self) -> Result<Vec<ServiceName>, DirectoryError> {
        let ns = self.namespace().await?;
        let page_size = self.config.page_size.max(1);
        let mut names = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let page = self.broker.list(ns, page_size, cursor.as_deref()).await?;
            names.extend(page.names);
            match page.next {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }
        Ok(names)
    }

    /// Unbind every name accepted by `matches`, returning the removed
    /// names.
    ///
    /// Works on a snapshot of [`Self::list`]; names bound while the sweep
    /// runs may be missed.
    pub async fn unbind_all(
        &self,
        matches: impl Fn(&ServiceName) -> bool,
    ) -> Result<Vec<ServiceName>, DirectoryError> {
        let snapshot = self.list().await?;
        let mut removed = Vec::new();
        for name in snapshot {
            if !matches(&name) {
                continue;
            }
            self.unbind(&name).await?;
            removed.push(name);
        }
        Ok(removed)
    }
}
