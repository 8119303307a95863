use super::{LockState, TimelockError, TimelockEscrow};
use crate::{
    account::Address,
    asset::AssetId,
    config::{COIN_VALUE, NATIVE_ASSET},
    ledger::{Ledger, MemoryLedger},
    time::TimestampSeconds,
};

const DAY: TimestampSeconds = 24 * 60 * 60;
const GENESIS: TimestampSeconds = 1_700_000_000;

fn addr(tag: u8) -> Address {
    Address::new([tag; 32])
}

fn holder() -> Address {
    addr(0xEE)
}

fn beneficiary() -> Address {
    addr(0x01)
}

/// Escrow over `amount` atomic units unlocking `lock_days` after GENESIS.
fn funded_escrow(amount: u64, lock_days: u64) -> (TimelockEscrow, MemoryLedger) {
    let mut ledger = MemoryLedger::new();
    ledger
        .deposit(&NATIVE_ASSET, &holder(), amount)
        .unwrap();
    let escrow = TimelockEscrow::new(
        NATIVE_ASSET,
        holder(),
        beneficiary(),
        GENESIS + lock_days * DAY,
        GENESIS,
    )
    .unwrap();
    (escrow, ledger)
}

#[test]
fn rejects_zero_beneficiary_at_construction() {
    let result = TimelockEscrow::new(
        NATIVE_ASSET,
        holder(),
        Address::zero(),
        GENESIS + DAY,
        GENESIS,
    );
    assert!(matches!(result, Err(TimelockError::InvalidBeneficiary)));
}

#[test]
fn rejects_release_time_in_the_past() {
    let result = TimelockEscrow::new(NATIVE_ASSET, holder(), beneficiary(), GENESIS - 1, GENESIS);
    assert!(matches!(result, Err(TimelockError::InvalidReleaseTime)));

    // a deadline equal to the current time is already expired
    let result = TimelockEscrow::new(NATIVE_ASSET, holder(), beneficiary(), GENESIS, GENESIS);
    assert!(matches!(result, Err(TimelockError::InvalidReleaseTime)));
}

#[test]
fn release_before_deadline_fails_and_moves_nothing() {
    let (escrow, mut ledger) = funded_escrow(25 * COIN_VALUE, 30);

    let result = escrow.release(&beneficiary(), GENESIS + 29 * DAY, &mut ledger);
    let error = result.unwrap_err();
    assert!(matches!(error, TimelockError::TooEarly));
    assert_eq!(error.to_string(), "current time is before release time");

    assert_eq!(ledger.balance_of(&beneficiary(), &NATIVE_ASSET), 0);
    assert_eq!(ledger.balance_of(&holder(), &NATIVE_ASSET), 25 * COIN_VALUE);
}

#[test]
fn release_at_exact_deadline_succeeds() {
    let (escrow, mut ledger) = funded_escrow(COIN_VALUE, 30);

    let released = escrow
        .release(&beneficiary(), GENESIS + 30 * DAY, &mut ledger)
        .unwrap();
    assert_eq!(released, COIN_VALUE);
    assert_eq!(ledger.balance_of(&beneficiary(), &NATIVE_ASSET), COIN_VALUE);
}

#[test]
fn release_pays_full_balance_to_beneficiary() {
    let (escrow, mut ledger) = funded_escrow(25 * COIN_VALUE, 30);

    let released = escrow
        .release(&beneficiary(), GENESIS + 31 * DAY, &mut ledger)
        .unwrap();
    assert_eq!(released, 25 * COIN_VALUE);
    assert_eq!(
        ledger.balance_of(&beneficiary(), &NATIVE_ASSET),
        25 * COIN_VALUE
    );
    assert_eq!(ledger.balance_of(&holder(), &NATIVE_ASSET), 0);
}

#[test]
fn anyone_may_trigger_release() {
    let (escrow, mut ledger) = funded_escrow(25 * COIN_VALUE, 30);
    let stranger = addr(0x42);

    escrow
        .release(&stranger, GENESIS + 31 * DAY, &mut ledger)
        .unwrap();
    // funds still go to the beneficiary, not the caller
    assert_eq!(
        ledger.balance_of(&beneficiary(), &NATIVE_ASSET),
        25 * COIN_VALUE
    );
    assert_eq!(ledger.balance_of(&stranger, &NATIVE_ASSET), 0);
}

#[test]
fn second_release_has_nothing_left() {
    let (escrow, mut ledger) = funded_escrow(COIN_VALUE, 30);
    let unlock = GENESIS + 31 * DAY;

    escrow.release(&beneficiary(), unlock, &mut ledger).unwrap();
    let result = escrow.release(&beneficiary(), unlock, &mut ledger);
    assert!(matches!(result, Err(TimelockError::NothingToRelease)));
    // the first payout is untouched
    assert_eq!(ledger.balance_of(&beneficiary(), &NATIVE_ASSET), COIN_VALUE);
}

#[test]
fn stranger_cannot_reassign_beneficiary() {
    let (mut escrow, _ledger) = funded_escrow(COIN_VALUE, 30);
    let stranger = addr(0x42);

    let error = escrow
        .set_beneficiary(&stranger, stranger)
        .unwrap_err();
    assert!(matches!(error, TimelockError::Unauthorized));
    assert_eq!(error.to_string(), "unauthorized caller");
    assert_eq!(escrow.beneficiary(), &beneficiary());
}

#[test]
fn beneficiary_reassignment_redirects_release() {
    let (mut escrow, mut ledger) = funded_escrow(25 * COIN_VALUE, 30);
    let heir = addr(0x02);

    escrow.set_beneficiary(&beneficiary(), heir).unwrap();
    assert_eq!(escrow.beneficiary(), &heir);

    escrow
        .release(&beneficiary(), GENESIS + 31 * DAY, &mut ledger)
        .unwrap();
    // payout follows the beneficiary as of call time
    assert_eq!(ledger.balance_of(&heir, &NATIVE_ASSET), 25 * COIN_VALUE);
    assert_eq!(ledger.balance_of(&beneficiary(), &NATIVE_ASSET), 0);
}

#[test]
fn reassignment_is_legal_after_unlock() {
    let (mut escrow, _ledger) = funded_escrow(COIN_VALUE, 30);
    let heir = addr(0x02);

    assert_eq!(escrow.state(GENESIS + 31 * DAY), LockState::Unlocked);
    escrow.set_beneficiary(&beneficiary(), heir).unwrap();
    assert_eq!(escrow.beneficiary(), &heir);
}

#[test]
fn previous_beneficiary_loses_authority() {
    let (mut escrow, _ledger) = funded_escrow(COIN_VALUE, 30);
    let heir = addr(0x02);

    escrow.set_beneficiary(&beneficiary(), heir).unwrap();
    let result = escrow.set_beneficiary(&beneficiary(), beneficiary());
    assert!(matches!(result, Err(TimelockError::Unauthorized)));
}

#[test]
fn reassignment_rejects_zero_address() {
    let (mut escrow, _ledger) = funded_escrow(COIN_VALUE, 30);

    let result = escrow.set_beneficiary(&beneficiary(), Address::zero());
    assert!(matches!(result, Err(TimelockError::InvalidBeneficiary)));
    assert_eq!(escrow.beneficiary(), &beneficiary());
}

#[test]
fn lock_state_is_derived_from_time() {
    let (escrow, _ledger) = funded_escrow(COIN_VALUE, 30);

    assert_eq!(escrow.state(GENESIS), LockState::Locked);
    assert_eq!(escrow.state(GENESIS + 30 * DAY - 1), LockState::Locked);
    assert_eq!(escrow.state(GENESIS + 30 * DAY), LockState::Unlocked);
    assert_eq!(escrow.state(TimestampSeconds::MAX), LockState::Unlocked);
}

#[test]
fn escrow_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let escrow = TimelockEscrow::new(
        AssetId::new([9; 32]),
        holder(),
        beneficiary(),
        GENESIS + DAY,
        GENESIS,
    )?;
    let data = serde_json::to_vec(&escrow)?;
    let decoded: TimelockEscrow = serde_json::from_slice(&data)?;
    assert_eq!(escrow, decoded);
    Ok(())
}

#[test]
fn lock_state_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let state = LockState::Unlocked;
    let data = serde_json::to_vec(&state)?;
    assert_eq!(data, b"\"unlocked\"");
    let decoded: LockState = serde_json::from_slice(&data)?;
    assert_eq!(state, decoded);
    Ok(())
}
