use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use tempus_common::{account::Address, config::VERSION, time::TimestampSeconds};

pub const DEFAULT_STATE_PATH: &str = "tempus-state.json";

/// Log verbosity, mapped onto the `log` facade filter.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[clap(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Options that can also be supplied through a JSON config file.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct Settings {
    /// Path to the JSON state file holding the ledger and the escrows
    #[clap(long, default_value = DEFAULT_STATE_PATH)]
    #[serde(default = "default_state_path")]
    pub state_path: String,
    /// Log level
    #[clap(long, value_enum, default_value_t = LogLevel::Info)]
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_state_path() -> String {
    String::from(DEFAULT_STATE_PATH)
}

#[derive(Debug, Parser)]
#[clap(version = VERSION, about = "Token timelock escrow over a local ledger")]
pub struct Config {
    /// JSON config file to load settings from
    #[clap(long)]
    pub config_file: Option<String>,
    /// Generate a JSON config file template at the --config-file path and exit
    #[clap(long)]
    pub generate_config_template: bool,
    #[clap(flatten)]
    pub settings: Settings,
    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an empty state file
    Init,
    /// Generate a fresh random account address
    NewAccount,
    /// Credit an account with native coins out of thin air
    Faucet {
        /// Account to credit
        account: Address,
        /// Amount in whole coins ("25" or "0.5")
        amount: String,
    },
    /// Lock coins for a beneficiary until a deadline
    Lock {
        /// Account funding the lock
        funder: Address,
        /// Account entitled to the funds once unlocked
        beneficiary: Address,
        /// Amount in whole coins
        amount: String,
        /// Lock duration in days from now
        #[clap(long, conflicts_with = "release_at")]
        duration_days: Option<u64>,
        /// Absolute unlock deadline as a Unix timestamp in seconds
        #[clap(long)]
        release_at: Option<TimestampSeconds>,
        /// Override the current time (Unix seconds), for simulations
        #[clap(long)]
        at: Option<TimestampSeconds>,
    },
    /// Trigger the release of an unlocked escrow
    Release {
        /// Escrow id as printed by status
        id: usize,
        /// Account triggering the release (any account may)
        caller: Address,
        /// Override the current time (Unix seconds), for simulations
        #[clap(long)]
        at: Option<TimestampSeconds>,
    },
    /// Reassign the beneficiary of an escrow
    SetBeneficiary {
        /// Escrow id as printed by status
        id: usize,
        /// Account requesting the change (must be the current beneficiary)
        caller: Address,
        /// New beneficiary account
        new_beneficiary: Address,
    },
    /// Show ledger balances and escrow states
    Status {
        /// Override the current time (Unix seconds), for simulations
        #[clap(long)]
        at: Option<TimestampSeconds>,
    },
}
