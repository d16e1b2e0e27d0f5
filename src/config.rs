// ⚙️ ATM Configuration
//
// Loaded from JSON, e.g.:
//
//   { "max_withdrawal": 500, "initial_vault": { "twenty": 50, "fifty": 10 } }

use crate::error::AtmError;
use crate::stash::MoneyStash;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_MAX_WITHDRAWAL: i64 = 10_000;

/// Ceiling for `max_withdrawal`; change making allocates per 5 of amount
pub const MAX_WITHDRAWAL_LIMIT: i64 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmConfig {
    /// Largest face value a single `withdraw` may pay out
    pub max_withdrawal: i64,

    /// Vault contents when the ATM is created
    pub initial_vault: MoneyStash,
}

impl Default for AtmConfig {
    fn default() -> Self {
        AtmConfig {
            max_withdrawal: DEFAULT_MAX_WITHDRAWAL,
            initial_vault: MoneyStash::empty(),
        }
    }
}

impl AtmConfig {
    /// Load and validate configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read ATM config: {:?}", path.as_ref()))?;

        let config: AtmConfig =
            serde_json::from_str(&content).context("Failed to parse ATM config JSON")?;

        config
            .validate()
            .with_context(|| format!("Invalid ATM config: {:?}", path.as_ref()))?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AtmError> {
        if self.max_withdrawal <= 0 {
            return Err(AtmError::InvalidConfig(format!(
                "max_withdrawal must be positive, got {}",
                self.max_withdrawal
            )));
        }
        if self.max_withdrawal > MAX_WITHDRAWAL_LIMIT {
            return Err(AtmError::InvalidConfig(format!(
                "max_withdrawal must be at most {}, got {}",
                MAX_WITHDRAWAL_LIMIT, self.max_withdrawal
            )));
        }
        if let Some((denomination, count)) = self.initial_vault.first_negative() {
            return Err(AtmError::InvalidAmount { denomination, count });
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
