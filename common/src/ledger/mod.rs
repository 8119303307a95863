use indexmap::IndexMap;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::{account::Address, asset::AssetId, error::BalanceError};

/// External fungible-token ledger as seen by the escrow.
///
/// Only the two capabilities the escrow consumes are exposed so the core can
/// be exercised against a mock without pulling in any particular token
/// implementation. Minting, fees and account management stay on the other
/// side of this boundary.
pub trait Ledger {
    /// Current balance of `account` for `asset`. Unknown accounts hold zero.
    fn balance_of(&self, account: &Address, asset: &AssetId) -> u64;

    /// Move `amount` of `asset` from `from` to `to`.
    ///
    /// Must be atomic: on error, neither balance has changed.
    fn transfer(
        &mut self,
        asset: &AssetId,
        from: &Address,
        to: &Address,
        amount: u64,
    ) -> Result<(), BalanceError>;
}

/// In-memory multi-asset ledger backing the tests and the CLI.
///
/// Balances are kept in insertion order so serialized state files and status
/// listings stay stable across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryLedger {
    balances: IndexMap<AssetId, IndexMap<Address, u64>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit an account without a matching debit. Genesis and test helper.
    pub fn deposit(
        &mut self,
        asset: &AssetId,
        account: &Address,
        amount: u64,
    ) -> Result<(), BalanceError> {
        let balance = self
            .balances
            .entry(*asset)
            .or_default()
            .entry(*account)
            .or_insert(0);
        *balance = balance.checked_add(amount).ok_or(BalanceError::Overflow)?;
        Ok(())
    }

    /// Iterate all known accounts of `asset` with their balances.
    pub fn balances(&self, asset: &AssetId) -> impl Iterator<Item = (&Address, u64)> {
        self.balances
            .get(asset)
            .into_iter()
            .flat_map(|accounts| accounts.iter().map(|(address, amount)| (address, *amount)))
    }
}

impl Ledger for MemoryLedger {
    fn balance_of(&self, account: &Address, asset: &AssetId) -> u64 {
        self.balances
            .get(asset)
            .and_then(|accounts| accounts.get(account))
            .copied()
            .unwrap_or(0)
    }

    fn transfer(
        &mut self,
        asset: &AssetId,
        from: &Address,
        to: &Address,
        amount: u64,
    ) -> Result<(), BalanceError> {
        let have = self.balance_of(from, asset);
        if have < amount {
            return Err(BalanceError::Insufficient { need: amount, have });
        }

        // A self-transfer or an empty transfer is a no-op once funds are checked
        if from == to || amount == 0 {
            return Ok(());
        }

        // Validate the credited side before touching any balance
        let credited = self
            .balance_of(to, asset)
            .checked_add(amount)
            .ok_or(BalanceError::Overflow)?;

        let accounts = self.balances.entry(*asset).or_default();
        accounts.insert(*from, have.saturating_sub(amount));
        accounts.insert(*to, credited);

        trace!("transferred {} of asset {} from {} to {}", amount, asset, from, to);
        Ok(())
    }
}
