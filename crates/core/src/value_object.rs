//! Value objects: amounts, balances, units and the exchange rate.
//!
//! All of these are plain integers underneath. Arithmetic is checked; an
//! overflow is reported to the caller instead of wrapping.

use core::str::FromStr;

use crate::error::LedgerError;
use crate::store::StoreError;

/// Yen credited per unit when exchanging with the `yen` tag.
///
/// Fixed, and independent of the configured [`ExchangeRate`].
pub const YEN_PER_UNIT: i64 = 100;

/// Signed amount supplied by a caller.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }

    /// Parse decimal amount text (optional leading sign, no whitespace).
    pub fn parse(text: &str) -> Result<Self, LedgerError> {
        text.parse::<i64>()
            .map(Self)
            .map_err(|e| LedgerError::invalid_amount(format!("'{text}': {e}")))
    }

    pub fn checked_mul(self, factor: i64) -> Option<Amount> {
        self.0.checked_mul(factor).map(Amount)
    }
}

impl FromStr for Amount {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Balance of an account as persisted in the store.
///
/// Stored as decimal text bytes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Balance(i64);

impl Balance {
    pub const ZERO: Balance = Balance(0);

    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }

    pub fn credit(self, amount: Amount) -> Option<Balance> {
        self.0.checked_add(amount.value()).map(Balance)
    }

    pub fn debit(self, amount: Amount) -> Option<Balance> {
        self.0.checked_sub(amount.value()).map(Balance)
    }

    pub fn to_bytes(self) -> Vec<u8> {
        self.0.to_string().into_bytes()
    }

    /// Decode a stored value; anything but decimal text is a corrupt entry.
    pub fn from_bytes(key: &str, bytes: &[u8]) -> Result<Self, StoreError> {
        core::str::from_utf8(bytes)
            .ok()
            .and_then(|text| text.parse::<i64>().ok())
            .map(Balance)
            .ok_or_else(|| StoreError::corrupt(key, bytes))
    }
}

impl core::fmt::Display for Balance {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Unit tag accepted by `exchange`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Credits `amount * YEN_PER_UNIT`.
    Yen,
    /// Debits `amount * rate`.
    Mizuki,
}

impl Unit {
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Yen => "yen",
            Unit::Mizuki => "mizuki",
        }
    }
}

impl FromStr for Unit {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yen" => Ok(Unit::Yen),
            "mizuki" => Ok(Unit::Mizuki),
            other => Err(LedgerError::unsupported(format!(
                "exchange unit '{other}' (expecting yen or mizuki)"
            ))),
        }
    }
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Yen cost of one mizuki. Non-negative.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ExchangeRate(i64);

impl ExchangeRate {
    pub const DEFAULT: ExchangeRate = ExchangeRate(100);

    /// Returns `None` for a negative rate.
    pub fn new(value: i64) -> Option<Self> {
        (value >= 0).then_some(Self(value))
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl core::fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
