// Path: crates/services/src/multisig/router.rs
//! The dispatch table for approved calls.
//!
//! Each [`CallKind`] maps to exactly one handler. The table is checked for
//! completeness when it is built, so dispatch never meets an unknown kind.

use meridian_api::state::StateAccess;
use meridian_api::transaction::context::TxContext;
use meridian_types::app::{CallKind, CallPayload, KernelEvent};
use meridian_types::error::{CoreError, TransactionError};
use std::collections::BTreeMap;
use std::fmt;

/// Executes the payload of an approved call against state.
pub type CallHandler = fn(
    &mut dyn StateAccess,
    &CallPayload,
    &TxContext<'_>,
) -> Result<Vec<KernelEvent>, TransactionError>;

/// The error a handler returns when routed a payload of the wrong kind.
pub fn payload_mismatch(expected: CallKind, payload: &CallPayload) -> TransactionError {
    TransactionError::Invalid(format!(
        "handler for '{}' received a '{}' payload",
        expected,
        payload.kind()
    ))
}

/// A complete, immutable map from payload kind to handler.
#[derive(Clone)]
pub struct DispatchRouter {
    routes: BTreeMap<CallKind, CallHandler>,
}

impl fmt::Debug for DispatchRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchRouter")
            .field("routes", &self.routes.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Collects routes for a [`DispatchRouter`].
#[derive(Default)]
pub struct RouterBuilder {
    routes: BTreeMap<CallKind, CallHandler>,
    duplicates: Vec<CallKind>,
}

impl RouterBuilder {
    /// Routes `kind` to `handler`.
    pub fn route(mut self, kind: CallKind, handler: CallHandler) -> Self {
        if self.routes.insert(kind, handler).is_some() {
            self.duplicates.push(kind);
        }
        self
    }

    /// Finalizes the table. Fails if a kind is routed twice or not at all.
    pub fn build(self) -> Result<DispatchRouter, CoreError> {
        if let Some(kind) = self.duplicates.first() {
            return Err(CoreError::InvalidRouter(format!(
                "kind '{}' is routed more than once",
                kind
            )));
        }
        let missing: Vec<&str> = CallKind::ALL
            .iter()
            .filter(|k| !self.routes.contains_key(k))
            .map(|k| k.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(CoreError::InvalidRouter(format!(
                "no handler for: {}",
                missing.join(", ")
            )));
        }
        Ok(DispatchRouter {
            routes: self.routes,
        })
    }
}

impl DispatchRouter {
    /// Starts an empty table.
    pub fn builder() -> RouterBuilder {
        RouterBuilder::default()
    }

    /// The table of built-in handlers.
    pub fn standard() -> Result<Self, CoreError> {
        use crate::{authority, bank, upgrade};

        Self::builder()
            .route(CallKind::AddValidator, authority::handle_add_validator)
            .route(CallKind::RemoveValidator, authority::handle_remove_validator)
            .route(CallKind::ReplaceValidator, authority::handle_replace_validator)
            .route(CallKind::UpdateAuthorityParams, authority::handle_update_params)
            .route(CallKind::IssueCurrency, bank::handle_issue)
            .route(CallKind::DestroyCurrency, bank::handle_destroy)
            .route(CallKind::ScheduleUpgrade, upgrade::handle_schedule)
            .route(CallKind::CancelUpgrade, upgrade::handle_cancel)
            .build()
    }

    /// Invokes the handler for `payload`'s kind.
    pub fn dispatch(
        &self,
        state: &mut dyn StateAccess,
        payload: &CallPayload,
        ctx: &TxContext<'_>,
    ) -> Result<Vec<KernelEvent>, TransactionError> {
        let kind = payload.kind();
        let handler = self.routes.get(&kind).ok_or_else(|| {
            TransactionError::Invalid(format!("no handler registered for '{}'", kind))
        })?;
        handler(state, payload, ctx)
    }
}
