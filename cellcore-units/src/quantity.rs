//! Quantity type - a value with an associated unit

use crate::unit::UnitError;
use crate::{Dimension, Unit};
use cellcore_core::Number;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric value with its unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quantity {
    pub value: Number,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(value: Number, unit: Unit) -> Self {
        Quantity { value, unit }
    }

    /// One of `unit` (`Q(1, unit)`)
    pub fn unit_of(unit: Unit) -> Self {
        Quantity::new(Number::one(), unit)
    }

    /// Pure number
    pub fn dimensionless(value: Number) -> Self {
        Quantity::new(value, Unit::dimensionless())
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension
    }

    pub fn is_dimensionless(&self) -> bool {
        self.unit.dimension.is_dimensionless()
    }

    /// Value in SI base units
    pub fn si_value(&self) -> Number {
        self.unit.to_si(&self.value)
    }

    pub fn convert_to(&self, target: &Unit) -> Result<Quantity, UnitError> {
        let value = self.unit.convert_to(&self.value, target)?;
        Ok(Quantity::new(value, target.clone()))
    }

    /// Multiply two quantities (dimensions add)
    pub fn mul(&self, other: &Quantity) -> Quantity {
        Quantity::new(self.value.mul(&other.value), self.unit.multiply(&other.unit))
    }

    /// Divide two quantities (dimensions subtract)
    pub fn div(&self, other: &Quantity) -> Result<Quantity, UnitError> {
        let value = self.value.checked_div(&other.value)?;
        let unit = self.unit.divide(&other.unit)?;
        Ok(Quantity::new(value, unit))
    }

    /// Reduce a dimensionless quantity to its plain magnitude.
    ///
    /// `mAh / Ah` is dimensionless with magnitude 0.001; any quantity that
    /// still carries a dimension is rejected.
    pub fn to_reduced_magnitude(&self) -> Result<Number, UnitError> {
        if !self.is_dimensionless() {
            return Err(UnitError::NotDimensionless {
                symbol: self.unit.symbol.clone(),
                dimension: self.unit.dimension,
            });
        }
        Ok(self.si_value())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.symbol.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit.symbol)
        }
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.unit.is_compatible(&other.unit) && self.si_value() == other.si_value()
    }
}
