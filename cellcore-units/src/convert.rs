//! Conversion factors between unit systems
//!
//! `UnitConverter` owns the conversion policy: which quantities of which
//! unit system enter a factor, and what happens for each normalization
//! mode. The unit algebra itself comes from the `UnitRegistry` it borrows.

use crate::system::{UnitQuantity, UnitSystem};
use crate::units::UnitRegistry;
use crate::{Quantity, Unit};
use cellcore_core::{CoreError, Number, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// How a capacity is normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationMode {
    /// per mass
    Gravimetric,
    /// per electrode area
    Areal,
    /// per volume
    Volumetric,
    /// not normalized
    Absolute,
}

impl NormalizationMode {
    pub const ALL: [NormalizationMode; 4] = [
        NormalizationMode::Gravimetric,
        NormalizationMode::Areal,
        NormalizationMode::Volumetric,
        NormalizationMode::Absolute,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizationMode::Gravimetric => "gravimetric",
            NormalizationMode::Areal => "areal",
            NormalizationMode::Volumetric => "volumetric",
            NormalizationMode::Absolute => "absolute",
        }
    }

    /// The (scaling quantity, specific unit quantity) pair, `None` for absolute
    fn scaling_quantities(&self) -> Option<(UnitQuantity, UnitQuantity)> {
        match self {
            NormalizationMode::Gravimetric => Some((UnitQuantity::Mass, UnitQuantity::SpecificGravimetric)),
            NormalizationMode::Areal => Some((UnitQuantity::Area, UnitQuantity::SpecificAreal)),
            NormalizationMode::Volumetric => Some((UnitQuantity::Volume, UnitQuantity::SpecificVolumetric)),
            NormalizationMode::Absolute => None,
        }
    }
}

impl fmt::Display for NormalizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NormalizationMode {
    type Err = CoreError;

    /// Unrecognized modes fail; there is no fallback factor.
    fn from_str(s: &str) -> Result<Self> {
        NormalizationMode::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnsupportedNormalizationMode(s.to_string()))
    }
}

/// Cell-level scaling values used when a request carries no explicit value
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DataScale {
    pub mass: Option<f64>,
    pub active_electrode_area: Option<f64>,
    pub volume: Option<f64>,
}

impl DataScale {
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    pub fn with_area(mut self, area: f64) -> Self {
        self.active_electrode_area = Some(area);
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    fn value_for(&self, mode: NormalizationMode) -> Option<f64> {
        match mode {
            NormalizationMode::Gravimetric => self.mass,
            NormalizationMode::Areal => self.active_electrode_area,
            NormalizationMode::Volumetric => self.volume,
            NormalizationMode::Absolute => None,
        }
    }
}

/// One conversion call's inputs. Transient: built per call, never stored.
#[derive(Debug, Clone)]
pub struct ConversionRequest<'a> {
    pub mode: NormalizationMode,
    /// Overrides the matching `DataScale` field
    pub scaling_value: Option<f64>,
    pub data_scale: DataScale,
    pub from_units: &'a UnitSystem,
    pub to_units: &'a UnitSystem,
}

impl<'a> ConversionRequest<'a> {
    pub fn new(mode: NormalizationMode, from_units: &'a UnitSystem, to_units: &'a UnitSystem) -> Self {
        ConversionRequest {
            mode,
            scaling_value: None,
            data_scale: DataScale::default(),
            from_units,
            to_units,
        }
    }

    /// Build a request from a mode name
    pub fn parse(mode: &str, from_units: &'a UnitSystem, to_units: &'a UnitSystem) -> Result<Self> {
        Ok(Self::new(mode.parse()?, from_units, to_units))
    }

    pub fn with_scaling_value(mut self, value: f64) -> Self {
        self.scaling_value = Some(value);
        self
    }

    pub fn with_data_scale(mut self, data_scale: DataScale) -> Self {
        self.data_scale = data_scale;
        self
    }

    /// Explicit value first, then the data scale; never defaulted
    fn resolve_scaling_value(&self) -> Option<f64> {
        self.scaling_value.or_else(|| self.data_scale.value_for(self.mode))
    }
}

/// Pure conversion-factor computations over a unit registry
#[derive(Debug, Clone, Copy)]
pub struct UnitConverter<'r> {
    registry: &'r UnitRegistry,
}

impl Default for UnitConverter<'static> {
    fn default() -> Self {
        UnitConverter::new(UnitRegistry::shared())
    }
}

impl<'r> UnitConverter<'r> {
    pub fn new(registry: &'r UnitRegistry) -> Self {
        UnitConverter { registry }
    }

    pub fn registry(&self) -> &'r UnitRegistry {
        self.registry
    }

    fn unit(&self, units: &UnitSystem, quantity: UnitQuantity) -> Result<Unit> {
        Ok(self.registry.parse(units.get(quantity))?)
    }

    fn quantity(&self, value: f64, units: &UnitSystem, quantity: UnitQuantity) -> Result<Quantity> {
        Ok(Quantity::new(Number::from_f64(value)?, self.unit(units, quantity)?))
    }

    /// Factor that turns an absolute quantity in `from_units` into a
    /// specific (or absolute) quantity in `to_units`:
    ///
    /// `(1 from.charge / (1 to.charge / 1 to.specific_<mode>)) / scaling_value`
    ///
    /// with the scaling value expressed in `to_units`' mass/area/volume unit.
    pub fn specific_conversion_factor(&self, request: &ConversionRequest<'_>) -> Result<f64> {
        let mode = request.mode;

        let (scaling, to_unit_specific) = match mode.scaling_quantities() {
            Some((scale_quantity, specific_quantity)) => {
                let value = request
                    .resolve_scaling_value()
                    .ok_or_else(|| CoreError::missing_scaling_value(mode.as_str(), scale_quantity.as_str()))?;
                (
                    self.quantity(value, request.to_units, scale_quantity)?,
                    Quantity::unit_of(self.unit(request.to_units, specific_quantity)?),
                )
            }
            None => (
                Quantity::dimensionless(Number::one()),
                Quantity::dimensionless(Number::one()),
            ),
        };

        let from_unit_charge = Quantity::unit_of(self.unit(request.from_units, UnitQuantity::Charge)?);
        let to_unit_charge = Quantity::unit_of(self.unit(request.to_units, UnitQuantity::Charge)?);

        let factor = from_unit_charge
            .div(&to_unit_charge.div(&to_unit_specific)?)?
            .div(&scaling)?
            .to_reduced_magnitude()?;

        let factor = to_f64(&factor)?;
        debug!(mode = %mode, factor, "conversion factor");
        Ok(factor)
    }

    /// Convenience form taking the mode by name
    pub fn specific_conversion_factor_for(
        &self,
        data_scale: DataScale,
        mode: &str,
        from_units: &UnitSystem,
        to_units: &UnitSystem,
    ) -> Result<f64> {
        let request = ConversionRequest::parse(mode, from_units, to_units)?.with_data_scale(data_scale);
        self.specific_conversion_factor(&request)
    }

    /// Nominal capacity on a given basis as an absolute charge in Ah.
    ///
    /// `nominal_value` is in `canonical_units.nominal_capacity`, the scaling
    /// value in `canonical_units.mass` (gravimetric) or `.area` (areal).
    /// With `convert_charge_units` the result is additionally multiplied by
    /// `1 canonical.charge / 1 raw.charge`. Volumetric is not implemented.
    pub fn nominal_capacity_to_absolute(
        &self,
        nominal_value: f64,
        basis: NormalizationMode,
        scaling_value: Option<f64>,
        raw_units: &UnitSystem,
        canonical_units: &UnitSystem,
        convert_charge_units: bool,
    ) -> Result<f64> {
        let scale_quantity = match basis {
            NormalizationMode::Gravimetric => Some(UnitQuantity::Mass),
            NormalizationMode::Areal => Some(UnitQuantity::Area),
            NormalizationMode::Absolute => None,
            NormalizationMode::Volumetric => {
                return Err(CoreError::NotImplementedNormalizationMode(basis.as_str().to_string()))
            }
        };

        let value = self.quantity(nominal_value, canonical_units, UnitQuantity::NominalCapacity)?;

        let specific = match scale_quantity {
            Some(quantity) => {
                let scaling = scaling_value
                    .ok_or_else(|| CoreError::missing_scaling_value(basis.as_str(), quantity.as_str()))?;
                self.quantity(scaling, canonical_units, quantity)?
            }
            None => Quantity::dimensionless(Number::one()),
        };

        let charge_factor = if convert_charge_units {
            Quantity::unit_of(self.unit(canonical_units, UnitQuantity::Charge)?)
                .div(&Quantity::unit_of(self.unit(raw_units, UnitQuantity::Charge)?))?
        } else {
            Quantity::dimensionless(Number::one())
        };

        let amp_hour = self.registry.parse("Ah")?;
        let absolute = value
            .mul(&charge_factor)
            .mul(&specific)
            .convert_to(&amp_hour)
            .map_err(CoreError::from)?;

        let absolute = to_f64(&absolute.value)?;
        debug!(basis = %basis, absolute, "nominal capacity in Ah");
        Ok(absolute)
    }

    /// Plain unit conversion of a single value, e.g. 1500 mAh -> 1.5 Ah
    pub fn convert_value(&self, value: f64, from: &str, to: &str) -> Result<f64> {
        let from = self.registry.parse(from)?;
        let to = self.registry.parse(to)?;
        let converted = from.convert_to(&Number::from_f64(value)?, &to)?;
        to_f64(&converted)
    }
}

fn to_f64(n: &Number) -> Result<f64> {
    n.to_f64()
        .ok_or_else(|| CoreError::UnitParse(format!("{} is not representable as f64", n)))
}
