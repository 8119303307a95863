use std::{fs::File, io::Write, path::Path};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use log::{debug, info};
use rand::rngs::OsRng;

use tempus_common::{
    account::Address,
    config::{COIN_DECIMALS, NATIVE_ASSET, VERSION},
    escrow::TimelockEscrow,
    ledger::Ledger,
    time::{get_current_time_in_seconds, TimestampSeconds},
    utils::{format_native, from_coin},
};

mod config;
mod state;

use config::{Command, Config};
use state::AppState;

const DAY_SECONDS: TimestampSeconds = 24 * 60 * 60;

fn main() -> Result<()> {
    let mut config = Config::parse();

    if let Some(path) = config.config_file.as_ref() {
        if config.generate_config_template {
            if Path::new(path).exists() {
                eprintln!("Config file already exists at {}", path);
                return Ok(());
            }

            let mut file = File::create(path).context("Error while creating config file")?;
            let json = serde_json::to_string_pretty(&config.settings)
                .context("Error while serializing config file")?;
            file.write_all(json.as_bytes())
                .context("Error while writing config file")?;
            println!("Config file template generated at {}", path);
            return Ok(());
        }

        let file = File::open(path).context("Error while opening config file")?;
        config.settings =
            serde_json::from_reader(file).context("Error while reading config file")?;
    } else if config.generate_config_template {
        bail!("--generate-config-template requires --config-file");
    }

    setup_logger(config.settings.log_level.into())
        .context("Error while initializing logger")?;
    debug!("tempus v{}", VERSION);

    let command = match config.command {
        Some(command) => command,
        None => bail!("no command provided, see --help"),
    };

    let path = config.settings.state_path.as_str();
    match command {
        Command::Init => init(path),
        Command::NewAccount => {
            println!("{}", Address::random(&mut OsRng));
            Ok(())
        }
        Command::Faucet { account, amount } => faucet(path, account, &amount),
        Command::Lock {
            funder,
            beneficiary,
            amount,
            duration_days,
            release_at,
            at,
        } => lock(path, funder, beneficiary, &amount, duration_days, release_at, at),
        Command::Release { id, caller, at } => release(path, id, caller, at),
        Command::SetBeneficiary {
            id,
            caller,
            new_beneficiary,
        } => set_beneficiary(path, id, caller, new_beneficiary),
        Command::Status { at } => status(path, at),
    }
}

fn setup_logger(level: log::LevelFilter) -> Result<(), fern::InitError> {
    let colors = fern::colors::ColoredLevelConfig::new()
        .info(fern::colors::Color::Green)
        .warn(fern::colors::Color::Yellow)
        .error(fern::colors::Color::Red)
        .debug(fern::colors::Color::Cyan);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{}] [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}

fn parse_amount(value: &str) -> Result<u64> {
    from_coin(value, COIN_DECIMALS).ok_or_else(|| anyhow!("invalid coin amount '{}'", value))
}

fn now_or(at: Option<TimestampSeconds>) -> TimestampSeconds {
    at.unwrap_or_else(get_current_time_in_seconds)
}

fn format_timestamp(timestamp: TimestampSeconds) -> String {
    match chrono::DateTime::from_timestamp(timestamp as i64, 0) {
        Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => timestamp.to_string(),
    }
}

fn init(path: &str) -> Result<()> {
    if Path::new(path).exists() {
        bail!("State file already exists at {}", path);
    }

    AppState::default().save(path)?;
    info!("state file created at {}", path);
    Ok(())
}

fn faucet(path: &str, account: Address, amount: &str) -> Result<()> {
    let amount = parse_amount(amount)?;
    let mut state = AppState::load(path)?;

    state
        .ledger
        .deposit(&NATIVE_ASSET, &account, amount)
        .context("Error while crediting account")?;
    state.save(path)?;

    println!(
        "credited {} to {}, balance is now {}",
        format_native(amount),
        account,
        format_native(state.ledger.balance_of(&account, &NATIVE_ASSET))
    );
    Ok(())
}

fn lock(
    path: &str,
    funder: Address,
    beneficiary: Address,
    amount: &str,
    duration_days: Option<u64>,
    release_at: Option<TimestampSeconds>,
    at: Option<TimestampSeconds>,
) -> Result<()> {
    let amount = parse_amount(amount)?;
    let now = now_or(at);
    let release_time = match (release_at, duration_days) {
        (Some(timestamp), _) => timestamp,
        (None, Some(days)) => days
            .checked_mul(DAY_SECONDS)
            .and_then(|duration| now.checked_add(duration))
            .ok_or_else(|| anyhow!("lock duration overflows the clock"))?,
        (None, None) => bail!("either --duration-days or --release-at is required"),
    };

    let mut state = AppState::load(path)?;

    // dedicated account holding the locked funds
    let holder = Address::random(&mut OsRng);
    let escrow = TimelockEscrow::new(NATIVE_ASSET, holder, beneficiary, release_time, now)
        .context("Error while creating the escrow")?;
    state
        .ledger
        .transfer(&NATIVE_ASSET, &funder, &holder, amount)
        .context("Error while funding the escrow")?;
    state.escrows.push(escrow);
    state.save(path)?;

    let id = state.escrows.len() - 1;
    println!(
        "escrow #{} locked {} for {} until {}",
        id,
        format_native(amount),
        beneficiary,
        format_timestamp(release_time)
    );
    Ok(())
}

fn release(path: &str, id: usize, caller: Address, at: Option<TimestampSeconds>) -> Result<()> {
    let now = now_or(at);
    let mut state = AppState::load(path)?;

    let escrow = state
        .escrows
        .get(id)
        .ok_or_else(|| anyhow!("unknown escrow #{}", id))?;
    let released = escrow
        .release(&caller, now, &mut state.ledger)
        .with_context(|| format!("Error while releasing escrow #{}", id))?;
    let beneficiary = *escrow.beneficiary();
    state.save(path)?;

    println!(
        "escrow #{} released {} to {}",
        id,
        format_native(released),
        beneficiary
    );
    Ok(())
}

fn set_beneficiary(path: &str, id: usize, caller: Address, new_beneficiary: Address) -> Result<()> {
    let mut state = AppState::load(path)?;

    let escrow = state
        .escrows
        .get_mut(id)
        .ok_or_else(|| anyhow!("unknown escrow #{}", id))?;
    escrow
        .set_beneficiary(&caller, new_beneficiary)
        .with_context(|| format!("Error while updating escrow #{}", id))?;
    state.save(path)?;

    println!("escrow #{} beneficiary is now {}", id, new_beneficiary);
    Ok(())
}

fn status(path: &str, at: Option<TimestampSeconds>) -> Result<()> {
    let now = now_or(at);
    let state = AppState::load(path)?;

    println!("time: {}", format_timestamp(now));
    println!("escrows:");
    for (id, escrow) in state.escrows.iter().enumerate() {
        let balance = state.ledger.balance_of(escrow.holder(), &NATIVE_ASSET);
        println!(
            "  #{} [{}] {} for {}, unlocks {}",
            id,
            escrow.state(now),
            format_native(balance),
            escrow.beneficiary(),
            format_timestamp(escrow.release_time())
        );
    }
    println!("balances:");
    for (address, amount) in state.ledger.balances(&NATIVE_ASSET) {
        println!("  {} {}", address, format_native(amount));
    }
    Ok(())
}
