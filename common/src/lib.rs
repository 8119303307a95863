// Allow a few clippy lints kept consistent across the workspace
#![allow(clippy::match_like_matches_macro)]
#![allow(clippy::module_inception)]

pub mod account;
pub mod asset;
pub mod config;
pub mod error;
pub mod escrow;
pub mod ledger;
pub mod time;
pub mod utils;
