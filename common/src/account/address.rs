use std::{fmt, str::FromStr};

use rand::RngCore;
use serde::{Deserialize, Serialize};

pub const ADDRESS_SIZE: usize = 32;

/// Account identifier on a ledger.
///
/// Rendered as lowercase hex everywhere (Display, serde, FromStr). The
/// all-zero address is reserved and is never accepted as a beneficiary.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address(#[serde(with = "hex")] [u8; ADDRESS_SIZE]);

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }

    pub const fn zero() -> Self {
        Self([0u8; ADDRESS_SIZE])
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|byte| *byte == 0)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }

    /// Generate a fresh address from the provided RNG.
    pub fn random<R: RngCore>(rng: &mut R) -> Self {
        let mut bytes = [0u8; ADDRESS_SIZE];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = hex::FromHexError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let bytes = <[u8; ADDRESS_SIZE] as hex::FromHex>::from_hex(value)?;
        Ok(Self(bytes))
    }
}
