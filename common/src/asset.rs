use std::fmt;

use serde::{Deserialize, Serialize};

pub const ASSET_ID_SIZE: usize = 32;

/// Identifier of a fungible asset tracked by a ledger.
///
/// An escrow is bound to exactly one asset at construction and that binding
/// never changes. The zero id is the native coin (`config::NATIVE_ASSET`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(#[serde(with = "hex")] [u8; ASSET_ID_SIZE]);

impl AssetId {
    pub const fn new(bytes: [u8; ASSET_ID_SIZE]) -> Self {
        Self(bytes)
    }

    pub const fn zero() -> Self {
        Self([0u8; ASSET_ID_SIZE])
    }

    pub fn is_native(&self) -> bool {
        *self == Self::zero()
    }

    pub fn as_bytes(&self) -> &[u8; ASSET_ID_SIZE] {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetId({})", self)
    }
}
