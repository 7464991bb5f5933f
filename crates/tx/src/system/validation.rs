// Path: crates/tx/src/system/validation.rs

//! Stateless transaction validation.
//!
//! These checks need neither state nor services, so the executor can run them
//! before opening an overlay for the transaction.

use meridian_types::app::{ChainId, ChainTransaction, TxPayload};
use meridian_types::error::{MultisigError, TransactionError};
use meridian_types::MAX_UNIQUE_ID_BYTES;

/// Rejects a transaction addressed to another chain.
pub fn verify_chain_id(tx: &ChainTransaction, expected: ChainId) -> Result<(), TransactionError> {
    if tx.header.chain_id != expected {
        return Err(TransactionError::ChainIdMismatch {
            expected: expected.0,
            got: tx.header.chain_id.0,
        });
    }
    Ok(())
}

/// Performs the shape checks that do not depend on state.
pub fn validate_stateless(tx: &ChainTransaction) -> Result<(), TransactionError> {
    match &tx.payload {
        TxPayload::SubmitCall { unique_id, .. } => {
            if unique_id.is_empty() || unique_id.len() > MAX_UNIQUE_ID_BYTES {
                return Err(MultisigError::InvalidUniqueId(format!(
                    "length must be 1..={} bytes",
                    MAX_UNIQUE_ID_BYTES
                ))
                .into());
            }
        }
        TxPayload::Transfer { amount, .. } => {
            if *amount == 0 {
                return Err(TransactionError::Invalid("transfer amount must be positive".into()));
            }
        }
        TxPayload::ConfirmCall { .. }
        | TxPayload::RevokeConfirm { .. }
        | TxPayload::Privileged(_) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_types::app::{AccountId, CallPayload};
    use meridian_types::error::ErrorCode;

    fn tx(payload: TxPayload) -> ChainTransaction {
        ChainTransaction::new(AccountId([1; 32]), ChainId(7), payload)
    }

    #[test]
    fn chain_id_must_match() {
        let t = tx(TxPayload::ConfirmCall { call_id: 1 });
        assert!(verify_chain_id(&t, ChainId(7)).is_ok());
        match verify_chain_id(&t, ChainId(8)) {
            Err(TransactionError::ChainIdMismatch { expected, got }) => {
                assert_eq!((expected, got), (8, 7));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn unique_id_bounds() {
        let submit = |unique_id: String| {
            tx(TxPayload::SubmitCall {
                payload: CallPayload::CancelUpgrade,
                unique_id,
            })
        };
        assert!(validate_stateless(&submit("ok".into())).is_ok());
        assert!(validate_stateless(&submit("x".repeat(MAX_UNIQUE_ID_BYTES))).is_ok());

        let err = validate_stateless(&submit(String::new())).unwrap_err();
        assert_eq!(err.code(), "MULTISIG_INVALID_UNIQUE_ID");
        assert!(validate_stateless(&submit("x".repeat(MAX_UNIQUE_ID_BYTES + 1))).is_err());
    }

    #[test]
    fn zero_transfer_is_invalid() {
        let zero = tx(TxPayload::Transfer {
            to: AccountId([2; 32]),
            denom: "mer".into(),
            amount: 0,
        });
        assert!(validate_stateless(&zero).is_err());
    }
}
