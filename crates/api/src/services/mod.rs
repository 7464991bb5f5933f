// Path: crates/api/src/services/mod.rs
//! Traits for pluggable blockchain services.

use crate::lifecycle::OnEndBlock;
use meridian_types::service_configs::Capabilities;
use std::any::Any;

pub mod access;

/// The base trait for any service managed by the chain.
///
/// Services are stateless handles: everything they persist lives in the
/// `StateAccess` passed to each call, under the service's own key prefixes
/// (see `meridian_types::keys`).
pub trait BlockchainService: Any + Send + Sync {
    /// A unique, static, lowercase string identifier for the service.
    /// This is used for deterministic ordering of lifecycle hooks.
    fn id(&self) -> &str;

    /// A string identifying the schema of the state this service reads/writes.
    fn state_schema(&self) -> &str;

    /// Returns a bitmask of the lifecycle capabilities (hooks) this service implements.
    fn capabilities(&self) -> Capabilities;

    /// Provides access to the concrete type for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Attempts to downcast this service to an `OnEndBlock` trait object.
    fn as_on_end_block(&self) -> Option<&dyn OnEndBlock> {
        None
    }
}
