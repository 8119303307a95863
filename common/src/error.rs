use thiserror::Error;

/// Ledger-side failures surfaced to callers of balance-moving operations.
#[derive(Debug, Error)]
pub enum BalanceError {
    #[error("Balance overflow")]
    Overflow,

    #[error("Insufficient balance: need {need}, have {have}")]
    Insufficient { need: u64, have: u64 },
}
