use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    account::Address, asset::AssetId, error::BalanceError, ledger::Ledger, time::TimestampSeconds,
};

#[cfg(test)]
mod tests;

/// Failures surfaced by escrow operations.
///
/// All of them reject the operation synchronously and leave the escrow in a
/// consistent state: there is no partial mutation to undo.
#[derive(Debug, Error)]
pub enum TimelockError {
    #[error("current time is before release time")]
    TooEarly,

    #[error("unauthorized caller")]
    Unauthorized,

    #[error("invalid beneficiary")]
    InvalidBeneficiary,

    #[error("release time is before current time")]
    InvalidReleaseTime,

    #[error("no tokens to release")]
    NothingToRelease,

    #[error(transparent)]
    Balance(#[from] BalanceError),
}

/// Derived lock state.
///
/// Never stored: recomputed on each call by comparing the caller-supplied
/// time against the release time. The transition is time-driven and one-way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum LockState {
    /// Current time is before the release time.
    Locked,
    /// Release time has been reached, funds are claimable.
    Unlocked,
}

/// Token timelock escrow.
///
/// Holds whatever balance its `holder` account carries on the ledger for a
/// single `asset`, claimable in full by the current `beneficiary` once
/// `release_time` has passed. Caller identity and current time are explicit
/// parameters on every operation: the escrow itself never reads a clock.
///
/// Fields stay private so the construction invariants hold for the lifetime
/// of the value: `release_time` is immutable, `beneficiary` is never the
/// reserved zero address and only changes through [`Self::set_beneficiary`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimelockEscrow {
    /// Asset this escrow controls.
    asset: AssetId,
    /// Ledger account the escrowed funds sit under.
    holder: Address,
    /// Account entitled to the funds on release.
    beneficiary: Address,
    /// Absolute unlock deadline in seconds.
    release_time: TimestampSeconds,
}

impl TimelockEscrow {
    /// Create a new escrow unlocking at `release_time`.
    ///
    /// The beneficiary must not be the zero address and the release time must
    /// be strictly in the future of `now`; a lock that is already expired at
    /// construction is a caller bug.
    pub fn new(
        asset: AssetId,
        holder: Address,
        beneficiary: Address,
        release_time: TimestampSeconds,
        now: TimestampSeconds,
    ) -> Result<Self, TimelockError> {
        if beneficiary.is_zero() {
            return Err(TimelockError::InvalidBeneficiary);
        }
        if release_time <= now {
            return Err(TimelockError::InvalidReleaseTime);
        }

        Ok(Self {
            asset,
            holder,
            beneficiary,
            release_time,
        })
    }

    pub fn asset(&self) -> &AssetId {
        &self.asset
    }

    pub fn holder(&self) -> &Address {
        &self.holder
    }

    pub fn beneficiary(&self) -> &Address {
        &self.beneficiary
    }

    pub fn release_time(&self) -> TimestampSeconds {
        self.release_time
    }

    /// Lock state as of `now`.
    pub fn state(&self, now: TimestampSeconds) -> LockState {
        if now >= self.release_time {
            LockState::Unlocked
        } else {
            LockState::Locked
        }
    }

    /// Transfer the escrow's entire current balance to the beneficiary.
    ///
    /// Callable by anyone once `now` has reached the release time; `caller`
    /// does not affect the outcome. Pays the beneficiary as of call time, not
    /// construction time. Returns the amount moved.
    ///
    /// A release with nothing left to pay out fails with
    /// [`TimelockError::NothingToRelease`] rather than succeeding as a no-op.
    pub fn release<L: Ledger>(
        &self,
        caller: &Address,
        now: TimestampSeconds,
        ledger: &mut L,
    ) -> Result<u64, TimelockError> {
        if self.state(now) == LockState::Locked {
            return Err(TimelockError::TooEarly);
        }

        let amount = ledger.balance_of(&self.holder, &self.asset);
        if amount == 0 {
            return Err(TimelockError::NothingToRelease);
        }

        ledger.transfer(&self.asset, &self.holder, &self.beneficiary, amount)?;
        debug!(
            "released {} of asset {} to {} (triggered by {})",
            amount, self.asset, self.beneficiary, caller
        );
        Ok(amount)
    }

    /// Reassign the beneficiary.
    ///
    /// Only the current beneficiary may hand its claim over, before or after
    /// the unlock. On error the previous beneficiary stays in place.
    pub fn set_beneficiary(
        &mut self,
        caller: &Address,
        new_beneficiary: Address,
    ) -> Result<(), TimelockError> {
        if caller != &self.beneficiary {
            return Err(TimelockError::Unauthorized);
        }
        if new_beneficiary.is_zero() {
            return Err(TimelockError::InvalidBeneficiary);
        }

        debug!(
            "beneficiary reassigned from {} to {}",
            self.beneficiary, new_beneficiary
        );
        self.beneficiary = new_beneficiary;
        Ok(())
    }
}
