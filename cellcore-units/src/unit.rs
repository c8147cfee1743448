//! Unit representation with SI conversion factors

use crate::Dimension;
use cellcore_core::{CoreError, Number, NumberError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Largest accepted integer exponent magnitude in a unit expression
pub const MAX_EXPONENT: u32 = 64;

/// A physical unit: symbol, dimension and the affine map to SI base units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// The unit symbol (e.g. "mAh", "cm^2")
    pub symbol: String,
    /// The unit name (e.g. "milliampere-hour")
    pub name: String,
    pub dimension: Dimension,
    /// value_si = value * to_si_factor + to_si_offset
    pub to_si_factor: Number,
    /// Non-zero only for offset scales (degC, degF)
    pub to_si_offset: Number,
    /// Category for organization (e.g. "charge", "mass")
    pub category: String,
}

impl Unit {
    /// Proportional unit (no offset)
    pub fn new(symbol: &str, name: &str, dimension: Dimension, to_si_factor: Number, category: &str) -> Self {
        Self::with_offset(symbol, name, dimension, to_si_factor, Number::zero(), category)
    }

    /// Unit with an offset (temperature scales)
    pub fn with_offset(
        symbol: &str,
        name: &str,
        dimension: Dimension,
        to_si_factor: Number,
        to_si_offset: Number,
        category: &str,
    ) -> Self {
        Unit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimension,
            to_si_factor,
            to_si_offset,
            category: category.to_string(),
        }
    }

    /// The pure number "1"
    pub fn dimensionless() -> Self {
        Unit::new("", "dimensionless", Dimension::DIMENSIONLESS, Number::one(), "dimensionless")
    }

    pub fn has_offset(&self) -> bool {
        !self.to_si_offset.is_zero()
    }

    /// Units can be converted into each other when their dimensions agree
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    pub fn to_si(&self, value: &Number) -> Number {
        value.mul(&self.to_si_factor).add(&self.to_si_offset)
    }

    pub fn from_si(&self, value_si: &Number) -> Result<Number, NumberError> {
        value_si.sub(&self.to_si_offset).checked_div(&self.to_si_factor)
    }

    /// Convert a value expressed in this unit into `target`
    pub fn convert_to(&self, value: &Number, target: &Unit) -> Result<Number, UnitError> {
        if !self.is_compatible(target) {
            return Err(UnitError::IncompatibleDimensions {
                from: self.symbol.clone(),
                to: target.symbol.clone(),
                from_dim: self.dimension,
                to_dim: target.dimension,
            });
        }

        let si_value = self.to_si(value);
        Ok(target.from_si(&si_value)?)
    }

    /// Product unit (e.g. A * h). Offsets do not survive multiplication.
    pub fn multiply(&self, other: &Unit) -> Unit {
        Unit::new(
            &join_symbols(&self.symbol, "*", &other.symbol),
            &format!("{} {}", self.name, other.name),
            self.dimension.multiply(&other.dimension),
            self.to_si_factor.mul(&other.to_si_factor),
            "derived",
        )
    }

    /// Quotient unit (e.g. mAh / g)
    pub fn divide(&self, other: &Unit) -> Result<Unit, UnitError> {
        let factor = self.to_si_factor.checked_div(&other.to_si_factor)?;

        Ok(Unit::new(
            &join_symbols(&self.symbol, "/", &other.symbol),
            &format!("{} per {}", self.name, other.name),
            self.dimension.divide(&other.dimension),
            factor,
            "derived",
        ))
    }

    /// Integer power (e.g. cm^2). `|exp|` is limited to `MAX_EXPONENT`.
    pub fn power(&self, exp: i32) -> Result<Unit, UnitError> {
        let invalid = || UnitError::InvalidExponent {
            unit: self.symbol.clone(),
            exponent: exp.to_string(),
        };
        if exp.unsigned_abs() > MAX_EXPONENT {
            return Err(invalid());
        }
        let dimension = self.dimension.power(exp).ok_or_else(invalid)?;

        let symbol = if exp == 1 {
            self.symbol.clone()
        } else {
            format!("{}^{}", self.symbol, exp)
        };

        Ok(Unit::new(
            &symbol,
            &format!("{} to the {}", self.name, exp),
            dimension,
            self.to_si_factor.pow(exp)?,
            &self.category,
        ))
    }
}

fn join_symbols(left: &str, op: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, true) => String::new(),
        (false, true) => left.to_string(),
        (true, false) if op == "*" => right.to_string(),
        (true, false) => format!("1{}{}", op, right),
        (false, false) => format!("{}{}{}", left, op, right),
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Failures of the unit algebra
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    #[error("cannot convert {from} ({from_dim}) to {to} ({to_dim}): incompatible dimensions")]
    IncompatibleDimensions {
        from: String,
        to: String,
        from_dim: Dimension,
        to_dim: Dimension,
    },

    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    #[error("invalid exponent '{exponent}' in '{unit}'")]
    InvalidExponent { unit: String, exponent: String },

    #[error("expected a dimensionless result, got {symbol} ({dimension})")]
    NotDimensionless { symbol: String, dimension: Dimension },

    #[error("numeric error: {0}")]
    Number(#[from] NumberError),
}

impl From<UnitError> for CoreError {
    fn from(err: UnitError) -> Self {
        CoreError::UnitParse(err.to_string())
    }
}
