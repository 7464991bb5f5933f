// Path: crates/services/src/bank/mod.rs
//! Currency balances.
//!
//! Transfers are ordinary transactions. Issuing and destroying currency change the
//! total supply and are only reachable through approved multisig calls.

use crate::multisig::payload_mismatch;
use meridian_api::impl_service_base;
use meridian_api::state::{StateAccess, StateAccessExt};
use meridian_api::transaction::context::TxContext;
use meridian_types::app::{AccountId, CallKind, CallPayload, KernelEvent};
use meridian_types::error::{StateError, TransactionError};
use meridian_types::keys::{balance_key, supply_key};

/// The bank service. Stateless; balances live under the `bank::` prefix as `u128`.
#[derive(Default, Debug, Clone, Copy)]
pub struct BankModule;

impl_service_base!(BankModule, "bank");

fn validate_denom(denom: &str) -> Result<(), TransactionError> {
    let mut chars = denom.chars();
    let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || "/:._-".contains(c));
    if !starts_alpha || !rest_ok || !(3..=128).contains(&denom.len()) {
        return Err(TransactionError::Invalid(format!("invalid denom '{denom}'")));
    }
    Ok(())
}

fn validate_amount(amount: u128) -> Result<(), TransactionError> {
    if amount == 0 {
        return Err(TransactionError::Invalid("amount must be positive".into()));
    }
    Ok(())
}

impl BankModule {
    /// The balance of `account` in `denom`.
    pub fn balance<S: StateAccess + ?Sized>(
        &self,
        state: &S,
        denom: &str,
        account: &AccountId,
    ) -> Result<u128, StateError> {
        Ok(state
            .get_decoded::<u128>(&balance_key(denom, account))?
            .unwrap_or(0))
    }

    /// The total supply of `denom`.
    pub fn supply<S: StateAccess + ?Sized>(&self, state: &S, denom: &str) -> Result<u128, StateError> {
        Ok(state.get_decoded::<u128>(&supply_key(denom))?.unwrap_or(0))
    }

    fn write_balance(
        state: &mut dyn StateAccess,
        denom: &str,
        account: &AccountId,
        amount: u128,
    ) -> Result<(), StateError> {
        let key = balance_key(denom, account);
        if amount == 0 {
            state.delete(&key)
        } else {
            state.insert_encoded(&key, &amount)
        }
    }

    /// Moves `amount` of `denom` from `from` to `to`.
    pub fn transfer(
        &self,
        state: &mut dyn StateAccess,
        from: &AccountId,
        to: &AccountId,
        denom: &str,
        amount: u128,
    ) -> Result<(), TransactionError> {
        validate_denom(denom)?;
        validate_amount(amount)?;
        let from_bal = self.balance(&*state, denom, from)?;
        let new_from = from_bal
            .checked_sub(amount)
            .ok_or(TransactionError::InsufficientFunds)?;
        Self::write_balance(state, denom, from, new_from)?;

        let to_bal = self.balance(&*state, denom, to)?;
        let new_to = to_bal
            .checked_add(amount)
            .ok_or(TransactionError::BalanceOverflow)?;
        Self::write_balance(state, denom, to, new_to)?;
        Ok(())
    }

    /// Mints `amount` of `denom` into `to`, growing the supply.
    pub fn mint(
        &self,
        state: &mut dyn StateAccess,
        denom: &str,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), TransactionError> {
        validate_denom(denom)?;
        validate_amount(amount)?;
        let new_supply = self
            .supply(&*state, denom)?
            .checked_add(amount)
            .ok_or(TransactionError::BalanceOverflow)?;
        let new_balance = self
            .balance(&*state, denom, to)?
            .checked_add(amount)
            .ok_or(TransactionError::BalanceOverflow)?;
        state.insert_encoded(&supply_key(denom), &new_supply)?;
        Self::write_balance(state, denom, to, new_balance)?;
        Ok(())
    }

    /// Burns `amount` of `denom` held by `from`, shrinking the supply.
    pub fn burn(
        &self,
        state: &mut dyn StateAccess,
        denom: &str,
        from: &AccountId,
        amount: u128,
    ) -> Result<(), TransactionError> {
        validate_denom(denom)?;
        validate_amount(amount)?;
        let new_balance = self
            .balance(&*state, denom, from)?
            .checked_sub(amount)
            .ok_or(TransactionError::InsufficientFunds)?;
        let new_supply = self
            .supply(&*state, denom)?
            .checked_sub(amount)
            .ok_or_else(|| TransactionError::Invalid("supply underflow".into()))?;
        state.insert_encoded(&supply_key(denom), &new_supply)?;
        Self::write_balance(state, denom, from, new_balance)?;
        Ok(())
    }
}

// --- Dispatch handlers ---

/// Executes an approved `IssueCurrency` call.
pub fn handle_issue(
    state: &mut dyn StateAccess,
    payload: &CallPayload,
    ctx: &TxContext<'_>,
) -> Result<Vec<KernelEvent>, TransactionError> {
    let CallPayload::IssueCurrency {
        denom,
        amount,
        recipient,
    } = payload
    else {
        return Err(payload_mismatch(CallKind::IssueCurrency, payload));
    };
    ctx.service::<BankModule>()?
        .mint(state, denom, recipient, *amount)?;
    log::info!("[Bank] Issued {} {} to {}", amount, denom, recipient);
    Ok(vec![KernelEvent::CurrencyIssued {
        denom: denom.clone(),
        amount: *amount,
        recipient: *recipient,
    }])
}

/// Executes an approved `DestroyCurrency` call.
pub fn handle_destroy(
    state: &mut dyn StateAccess,
    payload: &CallPayload,
    ctx: &TxContext<'_>,
) -> Result<Vec<KernelEvent>, TransactionError> {
    let CallPayload::DestroyCurrency {
        denom,
        amount,
        holder,
    } = payload
    else {
        return Err(payload_mismatch(CallKind::DestroyCurrency, payload));
    };
    ctx.service::<BankModule>()?
        .burn(state, denom, holder, *amount)?;
    log::info!("[Bank] Destroyed {} {} held by {}", amount, denom, holder);
    Ok(vec![KernelEvent::CurrencyDestroyed {
        denom: denom.clone(),
        amount: *amount,
        holder: *holder,
    }])
}
