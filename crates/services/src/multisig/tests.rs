// Path: crates/services/src/multisig/tests.rs
use super::*;
use crate::authority::AuthorityRegistry;
use crate::testing::{account, context, directory, seeded_state, validator};
use meridian_api::services::access::ServiceDirectory;
use meridian_api::state::StateAccessExt;
use meridian_types::app::{CallKind, KernelEvent};
use meridian_types::error::AuthorityError;
use std::sync::Arc;

fn engine(dir: &ServiceDirectory) -> Arc<MultisigModule> {
    dir.get::<MultisigModule>().unwrap()
}

fn add(n: u8) -> CallPayload {
    CallPayload::AddValidator {
        validator: validator(n),
    }
}

fn multisig_err(err: TransactionError) -> MultisigError {
    match err {
        TransactionError::Multisig(e) => e,
        other => panic!("expected a multisig error, got {other:?}"),
    }
}

#[test]
fn submit_requires_validator() {
    let dir = directory(100);
    let mut state = seeded_state(3, 10);
    let err = engine(&dir)
        .submit_call(&mut state, &context(&dir, 1, 9), add(4), "u1".into())
        .unwrap_err();
    assert_eq!(multisig_err(err), MultisigError::NotValidator(account(9)));
    assert_eq!(CallLedger::last_id(&state).unwrap(), 0);
}

#[test]
fn unique_id_is_never_reused() {
    let dir = directory(100);
    let mut state = seeded_state(3, 10);
    let ms = engine(&dir);
    ms.submit_call(&mut state, &context(&dir, 1, 1), add(4), "dup".into())
        .unwrap();

    // Different creator and payload, same unique id.
    let err = ms
        .submit_call(
            &mut state,
            &context(&dir, 2, 2),
            CallPayload::CancelUpgrade,
            "dup".into(),
        )
        .unwrap_err();
    assert_eq!(
        multisig_err(err),
        MultisigError::CallUniqueIdExists("dup".into())
    );
}

#[test]
fn empty_unique_id_is_rejected() {
    let dir = directory(100);
    let mut state = seeded_state(3, 10);
    let err = engine(&dir)
        .submit_call(&mut state, &context(&dir, 1, 1), add(4), String::new())
        .unwrap_err();
    assert!(matches!(multisig_err(err), MultisigError::InvalidUniqueId(_)));
}

#[test]
fn single_validator_executes_on_submit() {
    let dir = directory(100);
    let mut state = seeded_state(1, 10);
    let ms = engine(&dir);
    let events = ms
        .submit_call(&mut state, &context(&dir, 1, 1), add(2), "solo".into())
        .unwrap();

    let call = ms.get_call(&state, 1).unwrap();
    assert!(call.approved && call.executed && !call.failed);
    assert!(ms.pending_calls(&state).unwrap().is_empty());
    assert!(AuthorityRegistry.is_validator(&state, &account(2)).unwrap());
    assert!(events.contains(&KernelEvent::ValidatorAdded {
        address: account(2)
    }));
}

#[test]
fn seven_validators_approve_add_after_four_votes() {
    let dir = directory(100);
    let mut state = seeded_state(7, 10);
    let ms = engine(&dir);
    ms.submit_call(&mut state, &context(&dir, 1, 1), add(8), "add-v8".into())
        .unwrap();

    for voter in [2, 3] {
        ms.confirm_call(&mut state, &context(&dir, 1, voter), 1)
            .unwrap();
    }
    assert_eq!(ms.pending_calls(&state).unwrap().len(), 1);
    assert!(!ms.get_call(&state, 1).unwrap().approved);

    let events = ms
        .confirm_call(&mut state, &context(&dir, 2, 4), 1)
        .unwrap();
    assert!(events.contains(&KernelEvent::CallApproved {
        call_id: 1,
        votes: 4,
        quorum: 4
    }));

    let call = ms.get_call_by_unique_id(&state, "add-v8").unwrap();
    assert!(call.approved && call.executed && !call.failed);
    assert_eq!(call.votes, vec![account(1), account(2), account(3), account(4)]);
    assert!(ms.pending_calls(&state).unwrap().is_empty());
    assert_eq!(AuthorityRegistry.validator_amount(&state).unwrap(), 8);
}

#[test]
fn one_vote_per_voter() {
    let dir = directory(100);
    let mut state = seeded_state(7, 10);
    let ms = engine(&dir);
    ms.submit_call(&mut state, &context(&dir, 1, 1), add(8), "u".into())
        .unwrap();
    ms.confirm_call(&mut state, &context(&dir, 1, 2), 1).unwrap();

    for voter in [1, 2] {
        let err = ms
            .confirm_call(&mut state, &context(&dir, 1, voter), 1)
            .unwrap_err();
        assert!(matches!(
            multisig_err(err),
            MultisigError::VoteAlreadyConfirmed { call_id: 1, .. }
        ));
    }
    assert_eq!(ms.get_call(&state, 1).unwrap().votes.len(), 2);
}

#[test]
fn confirm_checks_call_and_voter() {
    let dir = directory(100);
    let mut state = seeded_state(3, 10);
    let ms = engine(&dir);
    let err = ms
        .confirm_call(&mut state, &context(&dir, 1, 1), 42)
        .unwrap_err();
    assert_eq!(multisig_err(err), MultisigError::WrongCallId(42));

    ms.submit_call(&mut state, &context(&dir, 1, 1), add(4), "u".into())
        .unwrap();
    let err = ms
        .confirm_call(&mut state, &context(&dir, 1, 9), 1)
        .unwrap_err();
    assert_eq!(multisig_err(err), MultisigError::NotValidator(account(9)));
}

#[test]
fn approval_is_final() {
    let dir = directory(100);
    let mut state = seeded_state(3, 10);
    let ms = engine(&dir);
    ms.submit_call(&mut state, &context(&dir, 1, 1), add(4), "u".into())
        .unwrap();
    ms.confirm_call(&mut state, &context(&dir, 1, 2), 1).unwrap();
    assert!(ms.get_call(&state, 1).unwrap().approved);

    let err = ms
        .confirm_call(&mut state, &context(&dir, 1, 3), 1)
        .unwrap_err();
    assert_eq!(multisig_err(err), MultisigError::VoteAlreadyApproved(1));

    let err = ms
        .revoke_confirm(&mut state, &context(&dir, 1, 2), 1)
        .unwrap_err();
    assert_eq!(multisig_err(err), MultisigError::VoteAlreadyApproved(1));
}

#[test]
fn revoking_last_vote_drops_call() {
    let dir = directory(100);
    let mut state = seeded_state(7, 10);
    let ms = engine(&dir);
    ms.submit_call(&mut state, &context(&dir, 1, 1), add(8), "gone".into())
        .unwrap();

    let events = ms
        .revoke_confirm(&mut state, &context(&dir, 1, 1), 1)
        .unwrap();
    assert_eq!(events.last(), Some(&KernelEvent::CallDropped { call_id: 1 }));
    assert!(ms.pending_calls(&state).unwrap().is_empty());
    assert_eq!(
        multisig_err(ms.get_call(&state, 1).unwrap_err()),
        MultisigError::WrongCallId(1)
    );
    assert_eq!(
        multisig_err(ms.get_call_by_unique_id(&state, "gone").unwrap_err()),
        MultisigError::NotFoundUniqueId("gone".into())
    );

    // The unique id stays reserved and the numeric id is not reused.
    let err = ms
        .submit_call(&mut state, &context(&dir, 2, 1), add(8), "gone".into())
        .unwrap_err();
    assert!(matches!(
        multisig_err(err),
        MultisigError::CallUniqueIdExists(_)
    ));
    ms.submit_call(&mut state, &context(&dir, 2, 1), add(8), "again".into())
        .unwrap();
    assert_eq!(ms.last_call_id(&state).unwrap(), 2);
}

#[test]
fn revoke_requires_existing_vote_and_keeps_order() {
    let dir = directory(100);
    let mut state = seeded_state(7, 10);
    let ms = engine(&dir);
    ms.submit_call(&mut state, &context(&dir, 1, 1), add(8), "u".into())
        .unwrap();
    ms.confirm_call(&mut state, &context(&dir, 1, 2), 1).unwrap();
    ms.confirm_call(&mut state, &context(&dir, 1, 3), 1).unwrap();

    let err = ms
        .revoke_confirm(&mut state, &context(&dir, 1, 5), 1)
        .unwrap_err();
    assert!(matches!(
        multisig_err(err),
        MultisigError::VoteNotApproved { call_id: 1, .. }
    ));

    ms.revoke_confirm(&mut state, &context(&dir, 1, 2), 1)
        .unwrap();
    let call = ms.get_call(&state, 1).unwrap();
    assert_eq!(call.votes, vec![account(1), account(3)]);
    assert!(call.is_pending());
}

#[test]
fn expiry_is_deterministic_at_interval_plus_one() {
    let dir = directory(5);
    let mut state = seeded_state(7, 10);
    let ms = engine(&dir);
    ms.submit_call(&mut state, &context(&dir, 10, 1), add(8), "slow".into())
        .unwrap();

    let events = ms.on_end_block(&mut state, &context(&dir, 15, 1)).unwrap();
    assert!(events.is_empty());
    assert!(ms.get_call(&state, 1).unwrap().is_pending());

    let events = ms.on_end_block(&mut state, &context(&dir, 16, 1)).unwrap();
    assert_eq!(events, vec![KernelEvent::CallRejected { call_id: 1 }]);
    let call = ms.get_call(&state, 1).unwrap();
    assert!(call.rejected && !call.approved && !call.executed);
    assert!(ms.pending_calls(&state).unwrap().is_empty());

    let err = ms
        .confirm_call(&mut state, &context(&dir, 17, 2), 1)
        .unwrap_err();
    assert_eq!(multisig_err(err), MultisigError::VoteAlreadyRejected(1));
    let err = ms
        .revoke_confirm(&mut state, &context(&dir, 17, 1), 1)
        .unwrap_err();
    assert_eq!(multisig_err(err), MultisigError::VoteAlreadyRejected(1));
}

#[test]
fn quorum_reached_before_sweep_is_honored() {
    let dir = directory(5);
    let mut state = seeded_state(3, 10);
    let ms = engine(&dir);
    ms.submit_call(&mut state, &context(&dir, 10, 1), add(4), "late".into())
        .unwrap();

    // Height 16 is past the interval, but the vote lands before the end-block sweep.
    ms.confirm_call(&mut state, &context(&dir, 16, 2), 1)
        .unwrap();
    assert!(ms
        .on_end_block(&mut state, &context(&dir, 16, 1))
        .unwrap()
        .is_empty());
    let call = ms.get_call(&state, 1).unwrap();
    assert!(call.approved && !call.rejected);
}

#[test]
fn handler_failure_is_recorded_not_reverted() {
    let dir = directory(100);
    let mut state = seeded_state(3, 10);
    let ms = engine(&dir);
    let remove_unknown = CallPayload::RemoveValidator {
        address: account(9),
    };
    ms.submit_call(&mut state, &context(&dir, 1, 1), remove_unknown, "bad".into())
        .unwrap();
    let events = ms
        .confirm_call(&mut state, &context(&dir, 1, 2), 1)
        .unwrap();

    let call = ms.get_call(&state, 1).unwrap();
    assert!(call.approved && call.executed && call.failed);
    let expected = TransactionError::from(AuthorityError::ValidatorDoesntExist(account(9)));
    assert_eq!(call.execution_error, Some(expected.to_string()));
    assert!(events.contains(&KernelEvent::CallExecuted {
        call_id: 1,
        error: Some(expected.to_string())
    }));
    assert!(ms.pending_calls(&state).unwrap().is_empty());
}

fn write_then_fail(
    state: &mut dyn meridian_api::state::StateAccess,
    _: &CallPayload,
    _: &TxContext<'_>,
) -> Result<Vec<KernelEvent>, TransactionError> {
    state.insert(b"scratch::partial", b"1")?;
    Err(TransactionError::Invalid("handler gave up".into()))
}

#[test]
fn failed_handler_writes_are_discarded() {
    let mut builder = DispatchRouter::builder();
    for kind in CallKind::ALL {
        builder = builder.route(kind, write_then_fail);
    }
    let ms = Arc::new(MultisigModule::new(
        MultisigParams {
            interval_to_execute: 100,
        },
        builder.build().unwrap(),
    ));
    let dir = ServiceDirectory::new()
        .with_service(Arc::new(AuthorityRegistry))
        .with_service(ms.clone());
    let mut state = seeded_state(1, 10);

    ms.submit_call(&mut state, &context(&dir, 1, 1), add(2), "x".into())
        .unwrap();

    let call = ms.get_call(&state, 1).unwrap();
    assert!(call.failed);
    assert_eq!(
        call.execution_error.as_deref(),
        Some("Invalid transaction: handler gave up")
    );
    assert!(!state.contains(b"scratch::partial").unwrap());
}

#[test]
fn quorum_is_recomputed_after_set_shrinks() {
    let dir = directory(100);
    let mut state = seeded_state(4, 10);
    let ms = engine(&dir);

    // Pending call with a single vote.
    ms.submit_call(&mut state, &context(&dir, 1, 1), add(5), "later".into())
        .unwrap();

    // Quorum of 4 is 3: remove validator 4.
    let remove = CallPayload::RemoveValidator {
        address: account(4),
    };
    ms.submit_call(&mut state, &context(&dir, 1, 1), remove, "shrink".into())
        .unwrap();
    ms.confirm_call(&mut state, &context(&dir, 1, 2), 2).unwrap();
    ms.confirm_call(&mut state, &context(&dir, 1, 3), 2).unwrap();
    assert_eq!(AuthorityRegistry.quorum(&state).unwrap(), 2);

    // Two votes now meet the live quorum.
    ms.confirm_call(&mut state, &context(&dir, 2, 2), 1).unwrap();
    assert!(ms.get_call(&state, 1).unwrap().approved);
}
