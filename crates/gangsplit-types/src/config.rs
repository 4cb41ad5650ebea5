//! Ledger configuration.

use serde::{Deserialize, Serialize};

use crate::{GangSplitError, Money, Result, constants};

/// Tunables for one allocation ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// ISO currency code the amounts are denominated in.
    pub currency: String,
    /// Largest `|remaining|` still accepted as "fully allocated".
    /// Zero means exact equality.
    pub finalize_tolerance: Money,
    /// Upper bound on members in one ledger.
    pub max_members: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            currency: constants::DEFAULT_CURRENCY.to_string(),
            finalize_tolerance: Money::ZERO,
            max_members: constants::DEFAULT_MAX_MEMBERS,
        }
    }
}

impl LedgerConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no ledger can work with.
    pub fn validate(&self) -> Result<()> {
        if self.max_members == 0 {
            return Err(GangSplitError::Configuration(
                "max_members must be > 0".to_string(),
            ));
        }
        if self.finalize_tolerance.is_negative() {
            return Err(GangSplitError::Configuration(
                "finalize_tolerance must not be negative".to_string(),
            ));
        }
        if self.currency.trim().is_empty() {
            return Err(GangSplitError::Configuration(
                "currency must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Builder-style tolerance override.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Money) -> Self {
        self.finalize_tolerance = tolerance;
        self
    }
}
