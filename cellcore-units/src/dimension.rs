//! Dimensional analysis
//!
//! A dimension is a vector of exponents over the 7 SI base quantities:
//! [length, mass, time, current, temperature, amount, luminosity]

use serde::{Deserialize, Serialize};
use std::fmt;

const SYMBOLS: [&str; 7] = ["L", "M", "T", "I", "Θ", "N", "J"];

/// Exponents of the 7 SI base dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    /// [length, mass, time, current, temperature, amount, luminosity]
    pub exponents: [i32; 7],
}

impl Dimension {
    pub const DIMENSIONLESS: Dimension = Dimension::new([0, 0, 0, 0, 0, 0, 0]);

    pub const LENGTH: Dimension = Dimension::new([1, 0, 0, 0, 0, 0, 0]);
    pub const MASS: Dimension = Dimension::new([0, 1, 0, 0, 0, 0, 0]);
    pub const TIME: Dimension = Dimension::new([0, 0, 1, 0, 0, 0, 0]);
    pub const CURRENT: Dimension = Dimension::new([0, 0, 0, 1, 0, 0, 0]);
    pub const TEMPERATURE: Dimension = Dimension::new([0, 0, 0, 0, 1, 0, 0]);
    pub const AMOUNT: Dimension = Dimension::new([0, 0, 0, 0, 0, 1, 0]);

    pub const AREA: Dimension = Dimension::new([2, 0, 0, 0, 0, 0, 0]);
    pub const VOLUME: Dimension = Dimension::new([3, 0, 0, 0, 0, 0, 0]);
    pub const FREQUENCY: Dimension = Dimension::new([0, 0, -1, 0, 0, 0, 0]);
    pub const ENERGY: Dimension = Dimension::new([2, 1, -2, 0, 0, 0, 0]);
    pub const POWER: Dimension = Dimension::new([2, 1, -3, 0, 0, 0, 0]);
    pub const PRESSURE: Dimension = Dimension::new([-1, 1, -2, 0, 0, 0, 0]);

    /// Electric charge [I T]
    pub const CHARGE: Dimension = Dimension::new([0, 0, 1, 1, 0, 0, 0]);
    /// Voltage [M L^2 T^-3 I^-1]
    pub const VOLTAGE: Dimension = Dimension::new([2, 1, -3, -1, 0, 0, 0]);
    /// Resistance [M L^2 T^-3 I^-2]
    pub const RESISTANCE: Dimension = Dimension::new([2, 1, -3, -2, 0, 0, 0]);

    /// Gravimetric specific charge, e.g. mAh/g [I T M^-1]
    pub const SPECIFIC_CHARGE: Dimension = Dimension::new([0, -1, 1, 1, 0, 0, 0]);
    /// Areal charge density, e.g. mAh/cm² [I T L^-2]
    pub const AREAL_CHARGE: Dimension = Dimension::new([-2, 0, 1, 1, 0, 0, 0]);
    /// Volumetric charge density, e.g. mAh/cm³ [I T L^-3]
    pub const VOLUMETRIC_CHARGE: Dimension = Dimension::new([-3, 0, 1, 1, 0, 0, 0]);

    pub const fn new(exponents: [i32; 7]) -> Self {
        Dimension { exponents }
    }

    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    fn zip_with(&self, other: &Dimension, f: impl Fn(i32, i32) -> i32) -> Dimension {
        let mut exponents = [0i32; 7];
        for (i, slot) in exponents.iter_mut().enumerate() {
            *slot = f(self.exponents[i], other.exponents[i]);
        }
        Dimension { exponents }
    }

    /// Multiply dimensions (add exponents)
    pub fn multiply(&self, other: &Dimension) -> Dimension {
        self.zip_with(other, |a, b| a + b)
    }

    /// Divide dimensions (subtract exponents)
    pub fn divide(&self, other: &Dimension) -> Dimension {
        self.zip_with(other, |a, b| a - b)
    }

    /// Raise to integer power (scale exponents). `None` on overflow.
    pub fn power(&self, exp: i32) -> Option<Dimension> {
        let mut exponents = [0; 7];
        for (slot, e) in exponents.iter_mut().zip(self.exponents) {
            *slot = e.checked_mul(exp)?;
        }
        Some(Dimension { exponents })
    }

    pub fn invert(&self) -> Dimension {
        Dimension { exponents: self.exponents.map(|e| -e) }
    }

    /// Name of the dimension, when it is one the battery tables use
    pub fn name(&self) -> Option<&'static str> {
        let named = [
            (Self::DIMENSIONLESS, "dimensionless"),
            (Self::LENGTH, "length"),
            (Self::MASS, "mass"),
            (Self::TIME, "time"),
            (Self::CURRENT, "current"),
            (Self::TEMPERATURE, "temperature"),
            (Self::AMOUNT, "amount"),
            (Self::AREA, "area"),
            (Self::VOLUME, "volume"),
            (Self::FREQUENCY, "frequency"),
            (Self::ENERGY, "energy"),
            (Self::POWER, "power"),
            (Self::PRESSURE, "pressure"),
            (Self::CHARGE, "charge"),
            (Self::VOLTAGE, "voltage"),
            (Self::RESISTANCE, "resistance"),
            (Self::SPECIFIC_CHARGE, "specific charge"),
            (Self::AREAL_CHARGE, "areal charge"),
            (Self::VOLUMETRIC_CHARGE, "volumetric charge"),
        ];
        named.iter().find(|(dim, _)| dim == self).map(|(_, name)| *name)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .exponents
            .iter()
            .zip(SYMBOLS)
            .filter(|(exp, _)| **exp != 0)
            .map(|(&exp, sym)| if exp == 1 { sym.to_string() } else { format!("{}^{}", sym, exp) })
            .collect();

        if parts.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::DIMENSIONLESS
    }
}
