//! In-process broker backed by plain maps.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::broker::{Broker, BrokerError, ListPage, NamespaceRef, ObjectRef, ServiceBinding};
use crate::name::ServiceName;

struct Entry {
    object: ObjectRef,
    live: Arc<AtomicBool>,
}

type Bindings = Arc<RwLock<BTreeMap<ServiceName, Entry>>>;

/// Broker keeping every namespace and binding in process memory.
///
/// Shared via `Arc` between the hosting and the querying side. Listing
/// order is the canonical name order; cursors are the canonical form of
/// the last name already returned.
#[derive(Default)]
pub struct LocalBroker {
    namespaces: RwLock<HashMap<String, Bindings>>,
}

impl LocalBroker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn bindings(&self, ns: &NamespaceRef) -> Result<Bindings, BrokerError> {
        self.namespaces
            .read()
            .get(ns.name())
            .cloned()
            .ok_or_else(|| BrokerError::NamespaceNotFound(ns.name().to_owned()))
    }
}

#[async_trait]
impl Broker for LocalBroker {
    async fn create_namespace(&self, name: &str) -> Result<NamespaceRef, BrokerError> {
        if name.is_empty() {
            return Err(BrokerError::InvalidNamespace(name.to_owned()));
        }
        let mut namespaces = self.namespaces.write();
        if namespaces.contains_key(name) {
            return Err(BrokerError::NamespaceExists(name.to_owned()));
        }
        namespaces.insert(name.to_owned(), Bindings::default());
        Ok(NamespaceRef::new(name))
    }

    async fn namespace(&self, name: &str) -> Result<NamespaceRef, BrokerError> {
        if self.namespaces.read().contains_key(name) {
            Ok(NamespaceRef::new(name))
        } else {
            Err(BrokerError::NamespaceNotFound(name.to_owned()))
        }
    }

    async fn bind(
        &self,
        ns: &NamespaceRef,
        name: &ServiceName,
        object: ObjectRef,
    ) -> Result<ServiceBinding, BrokerError> {
        let bindings = self.bindings(ns)?;
        let live = Arc::new(AtomicBool::new(true));
        // Replacing an entry detaches the previous guard's flag, so a stale
        // guard dropping later cannot kill the new binding.
        bindings.write().insert(
            name.clone(),
            Entry {
                object,
                live: live.clone(),
            },
        );
        Ok(ServiceBinding::new(name.clone(), live))
    }

    async fn unbind(&self, ns: &NamespaceRef, name: &ServiceName) -> Result<(), BrokerError> {
        let bindings = self.bindings(ns)?;
        bindings
            .write()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| BrokerError::NotBound(name.clone()))
    }

    async fn resolve(
        &self,
        ns: &NamespaceRef,
        name: &ServiceName,
    ) -> Result<ObjectRef, BrokerError> {
        let bindings = self.bindings(ns)?;
        let guard = bindings.read();
        guard
            .get(name)
            .map(|entry| entry.object.clone())
            .ok_or_else(|| BrokerError::NotBound(name.clone()))
    }

    async fn touch(&self, ns: &NamespaceRef, name: &ServiceName) -> Result<(), BrokerError> {
        let bindings = self.bindings(ns)?;
        let guard = bindings.read();
        let entry = guard
            .get(name)
            .ok_or_else(|| BrokerError::NotBound(name.clone()))?;
        if entry.live.load(std::sync::atomic::Ordering::Acquire) {
            Ok(())
        } else {
            Err(BrokerError::Unreachable(name.clone()))
        }
    }

    async fn list(
        &self,
        ns: &NamespaceRef,
        page_size: usize,
        cursor: Option<&str>,
    ) -> Result<ListPage, BrokerError> {
        let bindings = self.bindings(ns)?;
        let guard = bindings.read();

        let start = match cursor {
            Some(c) => {
                let after: ServiceName = c
                    .parse()
                    .map_err(|_| BrokerError::InvalidCursor(c.to_owned()))?;
                Bound::Excluded(after)
            }
            None => Bound::Unbounded,
        };

        let mut range = guard.range((start, Bound::Unbounded));
        let mut names = Vec::with_capacity(page_size.min(guard.len()));
        for (name, _) in range.by_ref().take(page_size) {
            names.push(name.clone());
        }
        let next = if range.next().is_some() {
            names.last().map(ToString::to_string)
        } else {
            None
        };
        Ok(ListPage { names, next })
    }
}
