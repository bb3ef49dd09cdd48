//! Fixed-point decimal types for trade parameters
//!
//! Uses rust_decimal for deterministic arithmetic (no floating-point errors).
//! Each quantity the risk calculator consumes has its own newtype so a
//! percentage can never be passed where a price is expected.
//!
//! `try_new` and `FromStr` validate the domain of the value; deserialization
//! goes through the same check. `new` is unchecked and meant for values that
//! were already validated upstream.

use crate::errors::CalculatorError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str_exact(s.trim()).ok()
}

/// Quote price of a currency pair (e.g. 1.08500 for EUR/USD)
///
/// Invariant: strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Create without validation
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Create a price, rejecting zero and negative values
    pub fn try_new(value: Decimal) -> Result<Self, CalculatorError> {
        if value <= Decimal::ZERO {
            return Err(CalculatorError::InvalidPrice(format!(
                "price must be positive, got {}",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = CalculatorError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl FromStr for Price {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = parse_decimal(s)
            .ok_or_else(|| CalculatorError::InvalidPrice(format!("not a decimal: {:?}", s)))?;
        Self::try_new(value)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Percentage in the range 0..=100 (e.g. risk per trade)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Percentage(Decimal);

impl Percentage {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn try_new(value: Decimal) -> Result<Self, CalculatorError> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(CalculatorError::InvalidPercentage(format!(
                "percentage must be within 0..=100, got {}",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Fraction form (2% -> 0.02)
    pub fn as_fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }
}

impl TryFrom<Decimal> for Percentage {
    type Error = CalculatorError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Percentage> for Decimal {
    fn from(pct: Percentage) -> Self {
        pct.0
    }
}

impl FromStr for Percentage {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = parse_decimal(s).ok_or_else(|| {
            CalculatorError::InvalidPercentage(format!("not a decimal: {:?}", s))
        })?;
        Self::try_new(value)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Account balance in account currency
///
/// Invariant: non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Balance(Decimal);

impl Balance {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn try_new(value: Decimal) -> Result<Self, CalculatorError> {
        if value < Decimal::ZERO {
            return Err(CalculatorError::InvalidBalance(format!(
                "balance must not be negative, got {}",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn from_u64(value: u64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Balance {
    type Error = CalculatorError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Balance> for Decimal {
    fn from(balance: Balance) -> Self {
        balance.0
    }
}

impl FromStr for Balance {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = parse_decimal(s)
            .ok_or_else(|| CalculatorError::InvalidBalance(format!("not a decimal: {:?}", s)))?;
        Self::try_new(value)
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trade size in standard lots (1.0 = 100 000 units of base currency)
///
/// Invariant: strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct LotSize(Decimal);

impl LotSize {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn try_new(value: Decimal) -> Result<Self, CalculatorError> {
        if value <= Decimal::ZERO {
            return Err(CalculatorError::InvalidLotSize(format!(
                "lot size must be positive, got {}",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for LotSize {
    type Error = CalculatorError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<LotSize> for Decimal {
    fn from(lots: LotSize) -> Self {
        lots.0
    }
}

impl FromStr for LotSize {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = parse_decimal(s)
            .ok_or_else(|| CalculatorError::InvalidLotSize(format!("not a decimal: {:?}", s)))?;
        Self::try_new(value)
    }
}

impl fmt::Display for LotSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
