// Path: crates/api/src/services/access.rs

//! Read-only access to shared blockchain services.

use crate::services::BlockchainService;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A helper macro to reduce boilerplate for simple services that don't
/// hook into the block lifecycle.
#[macro_export]
macro_rules! impl_service_base {
    ($type:ty, $id:expr) => {
        impl $crate::services::BlockchainService for $type {
            fn id(&self) -> &str {
                $id
            }
            fn state_schema(&self) -> &str {
                "v1"
            }
            fn capabilities(&self) -> $crate::types::service_configs::Capabilities {
                $crate::types::service_configs::Capabilities::empty()
            }
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }
    };
}

/// A read-only, type-safe service locator.
#[derive(Clone, Default)]
pub struct ServiceDirectory {
    /// Services sorted by id, the order lifecycle hooks run in.
    ordered: Vec<Arc<dyn BlockchainService>>,
    /// The same services keyed by concrete type, for downcasting lookups.
    by_type: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl fmt::Debug for ServiceDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceDirectory")
            .field(
                "services",
                &self.ordered.iter().map(|s| s.id()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl ServiceDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a service. Services are kept sorted lexicographically by their
    /// `id()` to ensure deterministic iteration order. Registering a second service
    /// of the same concrete type replaces the lookup entry for that type.
    pub fn with_service<T: BlockchainService>(mut self, service: Arc<T>) -> Self {
        let any: Arc<dyn Any + Send + Sync> = service.clone();
        self.by_type.insert(TypeId::of::<T>(), any);
        let dynamic: Arc<dyn BlockchainService> = service;
        self.ordered.push(dynamic);
        self.ordered.sort_by(|a, b| a.id().cmp(b.id()));
        self
    }

    /// Gets a service by its concrete type.
    pub fn get<T: BlockchainService>(&self) -> Option<Arc<T>> {
        let svc = self.by_type.get(&TypeId::of::<T>())?.clone();
        svc.downcast::<T>().ok()
    }

    /// Returns a deterministically ordered iterator over all stored services.
    pub fn services_in_deterministic_order(
        &self,
    ) -> impl Iterator<Item = &Arc<dyn BlockchainService>> {
        self.ordered.iter()
    }

    /// The number of registered services.
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// True if no services are registered.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Alpha;
    struct Beta;
    crate::impl_service_base!(Alpha, "alpha");
    crate::impl_service_base!(Beta, "beta");

    #[test]
    fn lookup_by_type_and_order_by_id() {
        let dir = ServiceDirectory::new()
            .with_service(Arc::new(Beta))
            .with_service(Arc::new(Alpha));

        assert!(dir.get::<Alpha>().is_some());
        assert!(dir.get::<Beta>().is_some());
        let ids: Vec<&str> = dir.services_in_deterministic_order().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["alpha", "beta"]);
    }

    #[test]
    fn missing_service_is_none() {
        let dir = ServiceDirectory::new().with_service(Arc::new(Alpha));
        assert!(dir.get::<Beta>().is_none());
        assert_eq!(dir.len(), 1);
    }
}
