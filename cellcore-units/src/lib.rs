//! cellcore units - unit algebra and normalization factors
//!
//! Provides unit-aware quantities with dimensional analysis, the three unit
//! systems of a cell session, and the conversion factors between them.
//!
//! Unit categories registered for cycling data:
//! - Charge (Ah, mAh, uAh, Coul, ...)
//! - Current, voltage, resistance
//! - Energy (Wh, mWh, J, ...) and power
//! - Mass, length, area, volume
//! - Time, frequency, temperature, pressure

mod convert;
mod dimension;
mod parse;
mod quantity;
mod system;
mod unit;
mod units;

pub use convert::{ConversionRequest, DataScale, NormalizationMode, UnitConverter};
pub use dimension::Dimension;
pub use parse::{parse_quantity_string, parse_unit};
pub use quantity::Quantity;
pub use system::{UnitQuantity, UnitSystem};
pub use unit::{Unit, UnitError, MAX_EXPONENT};
pub use units::{UnitRegistry, UNITS};
