use crate::asset::AssetId;

pub const VERSION: &str = env!("BUILD_VERSION");

// Native asset (plaintext balances, id zero)
pub const NATIVE_ASSET: AssetId = AssetId::zero();

// 8 decimals numbers
pub const COIN_DECIMALS: u8 = 8;
// 100 000 000 to represent 1 coin
pub const COIN_VALUE: u64 = 10u64.pow(COIN_DECIMALS as u32);
