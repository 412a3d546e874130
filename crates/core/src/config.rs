//! Ledger configuration.
//!
//! The configuration is built once at startup and handed by value to every
//! engine construction; nothing mutates it afterwards.

use core::str::FromStr;

use thiserror::Error;

use crate::value_object::ExchangeRate;

/// Environment variable holding the mizuki exchange rate.
pub const RATE_VAR: &str = "MIZUKI_RATE";

/// Environment variable selecting the [`AmountPolicy`].
pub const AMOUNT_POLICY_VAR: &str = "MIZUKI_AMOUNT_POLICY";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid exchange rate '{value}' (expecting a non-negative integer)")]
    InvalidRate { var: &'static str, value: String },

    #[error("{var}: unknown amount policy '{value}' (expecting reject or zero)")]
    InvalidAmountPolicy { var: &'static str, value: String },
}

/// How `remit` treats amount text that does not parse.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum AmountPolicy {
    /// Fail with `InvalidAmount` before any write.
    #[default]
    Reject,
    /// Carry on with a zero amount: balances are rewritten unchanged.
    TreatAsZero,
}

impl FromStr for AmountPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(AmountPolicy::Reject),
            "zero" | "treat-as-zero" => Ok(AmountPolicy::TreatAsZero),
            _ => Err(ConfigError::InvalidAmountPolicy {
                var: AMOUNT_POLICY_VAR,
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Yen cost of one mizuki, used by `exchange` with the `mizuki` unit.
    pub rate: ExchangeRate,
    pub amount_policy: AmountPolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rate: ExchangeRate::DEFAULT,
            amount_policy: AmountPolicy::Reject,
        }
    }
}

impl LedgerConfig {
    pub fn with_rate(mut self, rate: ExchangeRate) -> Self {
        self.rate = rate;
        self
    }

    pub fn with_amount_policy(mut self, policy: AmountPolicy) -> Self {
        self.amount_policy = policy;
        self
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load from an arbitrary variable lookup.
    ///
    /// Unset variables fall back to the defaults; set but malformed
    /// variables are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        match lookup(RATE_VAR) {
            Some(raw) => {
                config.rate = raw
                    .trim()
                    .parse::<i64>()
                    .ok()
                    .and_then(ExchangeRate::new)
                    .ok_or(ConfigError::InvalidRate {
                        var: RATE_VAR,
                        value: raw.clone(),
                    })?;
            }
            None => {
                tracing::warn!(
                    rate = config.rate.value(),
                    "{RATE_VAR} not set; using default exchange rate"
                );
            }
        }

        if let Some(raw) = lookup(AMOUNT_POLICY_VAR) {
            config.amount_policy = raw.parse()?;
        }

        Ok(config)
    }
}
