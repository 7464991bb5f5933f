// Path: crates/services/src/lib.rs
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]

//! Built-in services of the Meridian kernel.
//!
//! * [`authority`]: the Proof-of-Authority validator registry.
//! * [`multisig`]: the call ledger, the voting engine and the dispatch router that
//!   executes approved calls.
//! * [`bank`]: currency balances, the target of issue/destroy calls.
//! * [`upgrade`]: protocol upgrade scheduling.

pub mod authority;
pub mod bank;
pub mod multisig;
pub mod upgrade;

#[cfg(test)]
pub(crate) mod testing;

use meridian_api::services::access::ServiceDirectory;
use meridian_types::error::CoreError;
use meridian_types::service_configs::MultisigParams;
use std::sync::Arc;

/// Builds the directory of built-in services with the standard dispatch table.
pub fn standard_services(params: MultisigParams) -> Result<ServiceDirectory, CoreError> {
    let router = multisig::DispatchRouter::standard()?;
    Ok(ServiceDirectory::new()
        .with_service(Arc::new(authority::AuthorityRegistry))
        .with_service(Arc::new(bank::BankModule))
        .with_service(Arc::new(multisig::MultisigModule::new(params, router)))
        .with_service(Arc::new(upgrade::UpgradeModule)))
}
