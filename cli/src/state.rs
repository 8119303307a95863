use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use tempus_common::{escrow::TimelockEscrow, ledger::MemoryLedger};

/// Everything the CLI persists between invocations.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub ledger: MemoryLedger,
    pub escrows: Vec<TimelockEscrow>,
}

impl AppState {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).with_context(|| {
            format!(
                "Error while reading state file {} (run `init` first?)",
                path.display()
            )
        })?;
        serde_json::from_str(&content)
            .with_context(|| format!("Error while parsing state file {}", path.display()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Error while serializing state")?;
        fs::write(path.as_ref(), json).with_context(|| {
            format!("Error while writing state file {}", path.as_ref().display())
        })
    }
}
