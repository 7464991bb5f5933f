// Path: crates/types/src/app/query.rs
//! Read-only queries against committed state.

use crate::app::{AccountId, AuthorityParams, Call, CallId, ChainStatus, UpgradePlan, Validator};
use serde::{Deserialize, Serialize};

/// A query answered against the last committed block.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "query", rename_all = "snake_case")]
pub enum QueryRequest {
    /// The full validator set and the current quorum.
    Validators,
    /// A single validator by address.
    Validator {
        /// The validator's account.
        address: AccountId,
    },
    /// The registry bounds.
    AuthorityParams,
    /// A call by numeric id.
    Call {
        /// The call id.
        call_id: CallId,
    },
    /// A call by its caller-chosen unique id.
    CallByUniqueId {
        /// The unique id given at submission.
        unique_id: String,
    },
    /// All calls still collecting votes, in id order.
    PendingCalls,
    /// The last assigned call id.
    LastCallId,
    /// An account balance.
    Balance {
        /// Denomination.
        denom: String,
        /// Holder.
        address: AccountId,
    },
    /// The total supply of a denomination.
    Supply {
        /// Denomination.
        denom: String,
    },
    /// The scheduled upgrade plan, if any.
    UpgradePlan,
    /// The height at which a named upgrade was applied, if it was.
    UpgradeApplied {
        /// Plan name.
        name: String,
    },
    /// Height and transaction count of the chain.
    Status,
}

/// The answer to a [`QueryRequest`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "result", content = "value", rename_all = "snake_case")]
pub enum QueryResponse {
    /// Answer to [`QueryRequest::Validators`].
    Validators {
        /// Validators in address order.
        validators: Vec<Validator>,
        /// `floor(n / 2) + 1` for the current set.
        quorum: u32,
    },
    /// Answer to [`QueryRequest::Validator`].
    Validator(Validator),
    /// Answer to [`QueryRequest::AuthorityParams`].
    AuthorityParams(AuthorityParams),
    /// Answer to call lookups.
    Call(Call),
    /// Answer to [`QueryRequest::PendingCalls`].
    Calls(Vec<Call>),
    /// Answer to [`QueryRequest::LastCallId`].
    LastCallId(CallId),
    /// Answer to balance and supply queries.
    Amount(u128),
    /// Answer to [`QueryRequest::UpgradePlan`].
    UpgradePlan(Option<UpgradePlan>),
    /// Answer to [`QueryRequest::UpgradeApplied`].
    UpgradeApplied(Option<u64>),
    /// Answer to [`QueryRequest::Status`].
    Status(ChainStatus),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_are_tagged_by_name() {
        let req: QueryRequest = serde_json::from_str(r#"{"query":"call","call_id":3}"#).unwrap();
        assert_eq!(req, QueryRequest::Call { call_id: 3 });

        let req: QueryRequest = serde_json::from_str(r#"{"query":"pending_calls"}"#).unwrap();
        assert_eq!(req, QueryRequest::PendingCalls);
    }

    #[test]
    fn response_shape() {
        let json = serde_json::to_value(QueryResponse::LastCallId(4)).unwrap();
        assert_eq!(json, serde_json::json!({"result": "last_call_id", "value": 4}));
    }
}
