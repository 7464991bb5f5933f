// Path: crates/execution/src/app/query.rs
//! Read-only queries against committed state.

use super::ExecutionMachine;
use meridian_api::state::{StateAccess, StateAccessExt};
use meridian_services::authority::AuthorityRegistry;
use meridian_services::bank::BankModule;
use meridian_services::multisig::MultisigModule;
use meridian_services::upgrade::UpgradeModule;
use meridian_types::app::{ChainStatus, QueryRequest, QueryResponse};
use meridian_types::error::{AuthorityError, ErrorResponse, TransactionError};
use meridian_types::keys::STATUS_KEY;

impl<S: StateAccess> ExecutionMachine<S> {
    /// Answers `request` against the last committed block.
    pub fn query(&self, request: &QueryRequest) -> Result<QueryResponse, ErrorResponse> {
        self.answer(request).map_err(|e| {
            tracing::debug!(target: "execution", ?request, error = %e, "Query failed.");
            ErrorResponse::from_error(&e)
        })
    }

    fn answer(&self, request: &QueryRequest) -> Result<QueryResponse, TransactionError> {
        let state = &self.store;
        let response = match request {
            QueryRequest::Validators => {
                let registry = self.service::<AuthorityRegistry>()?;
                let validators = registry.validators(state)?;
                let quorum = u32::try_from(registry.quorum(state)?).unwrap_or(u32::MAX);
                QueryResponse::Validators { validators, quorum }
            }
            QueryRequest::Validator { address } => {
                let registry = self.service::<AuthorityRegistry>()?;
                let validator = registry
                    .validator(state, address)?
                    .ok_or(AuthorityError::ValidatorDoesntExist(*address))?;
                QueryResponse::Validator(validator)
            }
            QueryRequest::AuthorityParams => {
                QueryResponse::AuthorityParams(self.service::<AuthorityRegistry>()?.params(state)?)
            }
            QueryRequest::Call { call_id } => {
                QueryResponse::Call(self.service::<MultisigModule>()?.get_call(state, *call_id)?)
            }
            QueryRequest::CallByUniqueId { unique_id } => QueryResponse::Call(
                self.service::<MultisigModule>()?
                    .get_call_by_unique_id(state, unique_id)?,
            ),
            QueryRequest::PendingCalls => {
                QueryResponse::Calls(self.service::<MultisigModule>()?.pending_calls(state)?)
            }
            QueryRequest::LastCallId => {
                QueryResponse::LastCallId(self.service::<MultisigModule>()?.last_call_id(state)?)
            }
            QueryRequest::Balance { denom, address } => {
                QueryResponse::Amount(self.service::<BankModule>()?.balance(state, denom, address)?)
            }
            QueryRequest::Supply { denom } => {
                QueryResponse::Amount(self.service::<BankModule>()?.supply(state, denom)?)
            }
            QueryRequest::UpgradePlan => {
                QueryResponse::UpgradePlan(self.service::<UpgradeModule>()?.scheduled_plan(state)?)
            }
            QueryRequest::UpgradeApplied { name } => QueryResponse::UpgradeApplied(
                self.service::<UpgradeModule>()?.applied_height(state, name)?,
            ),
            QueryRequest::Status => QueryResponse::Status(
                state
                    .get_decoded::<ChainStatus>(STATUS_KEY)?
                    .unwrap_or_else(|| self.status.clone()),
            ),
        };
        Ok(response)
    }
}
