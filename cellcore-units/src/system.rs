//! Unit systems
//!
//! A `UnitSystem` assigns a unit string to each of a fixed set of physical
//! quantities. Three independent instances are in play at any time: the
//! units of the raw instrument data, the library's canonical units, and the
//! units shown to the user. Instances are immutable; `with_updates` returns
//! a new system.

use cellcore_core::{CoreError, Result};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// The quantities every unit system defines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitQuantity {
    Current,
    Charge,
    Voltage,
    Time,
    Resistance,
    Power,
    Energy,
    Frequency,
    Mass,
    NominalCapacity,
    SpecificGravimetric,
    SpecificAreal,
    SpecificVolumetric,
    Length,
    Area,
    Volume,
    Temperature,
    Pressure,
}

impl UnitQuantity {
    pub const ALL: [UnitQuantity; 18] = [
        UnitQuantity::Current,
        UnitQuantity::Charge,
        UnitQuantity::Voltage,
        UnitQuantity::Time,
        UnitQuantity::Resistance,
        UnitQuantity::Power,
        UnitQuantity::Energy,
        UnitQuantity::Frequency,
        UnitQuantity::Mass,
        UnitQuantity::NominalCapacity,
        UnitQuantity::SpecificGravimetric,
        UnitQuantity::SpecificAreal,
        UnitQuantity::SpecificVolumetric,
        UnitQuantity::Length,
        UnitQuantity::Area,
        UnitQuantity::Volume,
        UnitQuantity::Temperature,
        UnitQuantity::Pressure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitQuantity::Current => "current",
            UnitQuantity::Charge => "charge",
            UnitQuantity::Voltage => "voltage",
            UnitQuantity::Time => "time",
            UnitQuantity::Resistance => "resistance",
            UnitQuantity::Power => "power",
            UnitQuantity::Energy => "energy",
            UnitQuantity::Frequency => "frequency",
            UnitQuantity::Mass => "mass",
            UnitQuantity::NominalCapacity => "nominal_capacity",
            UnitQuantity::SpecificGravimetric => "specific_gravimetric",
            UnitQuantity::SpecificAreal => "specific_areal",
            UnitQuantity::SpecificVolumetric => "specific_volumetric",
            UnitQuantity::Length => "length",
            UnitQuantity::Area => "area",
            UnitQuantity::Volume => "volume",
            UnitQuantity::Temperature => "temperature",
            UnitQuantity::Pressure => "pressure",
        }
    }

    /// Unit used by the library when nothing else is configured
    pub fn default_unit(&self) -> &'static str {
        match self {
            UnitQuantity::Current => "A",
            UnitQuantity::Charge => "mAh",
            UnitQuantity::Voltage => "V",
            UnitQuantity::Time => "sec",
            UnitQuantity::Resistance => "ohm",
            UnitQuantity::Power => "W",
            UnitQuantity::Energy => "Wh",
            UnitQuantity::Frequency => "hz",
            UnitQuantity::Mass => "mg",
            UnitQuantity::NominalCapacity => "mAh/g",
            UnitQuantity::SpecificGravimetric => "g",
            UnitQuantity::SpecificAreal => "cm**2",
            UnitQuantity::SpecificVolumetric => "cm**3",
            UnitQuantity::Length => "cm",
            UnitQuantity::Area => "cm**2",
            UnitQuantity::Volume => "cm**3",
            UnitQuantity::Temperature => "C",
            UnitQuantity::Pressure => "bar",
        }
    }
}

impl fmt::Display for UnitQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitQuantity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        UnitQuantity::ALL
            .iter()
            .copied()
            .find(|q| q.as_str() == s)
            .ok_or_else(|| CoreError::UnknownUnitQuantity(s.to_string()))
    }
}

/// A complete assignment of units to every `UnitQuantity`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>")]
pub struct UnitSystem {
    units: BTreeMap<UnitQuantity, String>,
}

impl UnitSystem {
    /// The library's canonical units
    pub fn cellpy_default() -> Self {
        UnitSystem {
            units: UnitQuantity::ALL
                .iter()
                .map(|q| (*q, q.default_unit().to_string()))
                .collect(),
        }
    }

    pub fn get(&self, quantity: UnitQuantity) -> &str {
        // every quantity is present by construction
        self.units.get(&quantity).map(String::as_str).unwrap_or_else(|| quantity.default_unit())
    }

    /// String-keyed lookup; unknown quantity names are an error
    pub fn get_by_name(&self, quantity: &str) -> Result<&str> {
        Ok(self.get(quantity.parse()?))
    }

    /// New system with the given quantities replaced.
    ///
    /// Every key must name a known quantity, otherwise nothing is applied and
    /// `UnknownUnitQuantity` is returned.
    pub fn with_updates<K, V, I>(&self, updates: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut units = self.units.clone();
        for (key, unit) in updates {
            let quantity: UnitQuantity = key.as_ref().parse()?;
            let unit = unit.into();
            debug!(quantity = %quantity, unit = %unit, "updating unit");
            units.insert(quantity, unit);
        }
        Ok(UnitSystem { units })
    }

    /// Typed variant of `with_updates`
    pub fn with_unit(&self, quantity: UnitQuantity, unit: impl Into<String>) -> Self {
        let mut units = self.units.clone();
        units.insert(quantity, unit.into());
        UnitSystem { units }
    }

    /// Pairs in canonical quantity order
    pub fn iter(&self) -> impl Iterator<Item = (UnitQuantity, &str)> + '_ {
        UnitQuantity::ALL.iter().map(move |q| (*q, self.get(*q)))
    }
}

impl Default for UnitSystem {
    fn default() -> Self {
        Self::cellpy_default()
    }
}

impl TryFrom<BTreeMap<String, String>> for UnitSystem {
    type Error = CoreError;

    /// Missing quantities fall back to the defaults; unknown ones are rejected.
    fn try_from(map: BTreeMap<String, String>) -> Result<Self> {
        UnitSystem::cellpy_default().with_updates(map)
    }
}

/// Serialized as a map in canonical quantity order
impl Serialize for UnitSystem {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(UnitQuantity::ALL.len()))?;
        for (quantity, unit) in self.iter() {
            map.serialize_entry(quantity.as_str(), unit)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_quantity() {
        let units = UnitSystem::default();
        assert_eq!(units.iter().count(), 18);
        assert_eq!(units.get(UnitQuantity::Charge), "mAh");
        assert_eq!(units.get(UnitQuantity::SpecificAreal), "cm**2");
        assert_eq!(units.get(UnitQuantity::Temperature), "C");
    }

    #[test]
    fn test_get_by_name() {
        let units = UnitSystem::default();
        assert_eq!(units.get_by_name("nominal_capacity").unwrap(), "mAh/g");
        assert_eq!(
            units.get_by_name("flux_capacitance"),
            Err(CoreError::UnknownUnitQuantity("flux_capacitance".to_string()))
        );
    }

    #[test]
    fn test_with_updates_replaces_only_given_keys() {
        let base = UnitSystem::default();
        let updated = base.with_updates([("charge", "Ah"), ("mass", "g")]).unwrap();

        assert_eq!(updated.get(UnitQuantity::Charge), "Ah");
        assert_eq!(updated.get(UnitQuantity::Mass), "g");
        assert_eq!(updated.get(UnitQuantity::Voltage), "V");
        // the original is untouched
        assert_eq!(base.get(UnitQuantity::Charge), "mAh");
    }

    #[test]
    fn test_with_updates_rejects_unknown_key() {
        let base = UnitSystem::default();
        let result = base.with_updates([("charge", "Ah"), ("not_a_quantity", "x")]);
        assert_eq!(result, Err(CoreError::UnknownUnitQuantity("not_a_quantity".to_string())));
    }

    #[test]
    fn test_serde_partial_map() {
        let units: UnitSystem = serde_json::from_str(r#"{"charge": "Ah"}"#).unwrap();
        assert_eq!(units.get(UnitQuantity::Charge), "Ah");
        assert_eq!(units.get(UnitQuantity::Current), "A");

        let bad = serde_json::from_str::<UnitSystem>(r#"{"charg": "Ah"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_serialized_in_canonical_order() {
        let units = UnitSystem::default().with_unit(UnitQuantity::Charge, "Ah");
        let json = serde_json::to_string(&units).unwrap();

        let positions: Vec<usize> = UnitQuantity::ALL
            .iter()
            .map(|q| json.find(&format!("\"{}\":", q.as_str())).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", json);
        assert!(json.starts_with(r#"{"current":"A","charge":"Ah""#), "{}", json);

        let back: UnitSystem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, units);
    }

    #[test]
    fn test_quantity_round_trip_names() {
        for q in UnitQuantity::ALL {
            assert_eq!(q.as_str().parse::<UnitQuantity>().unwrap(), q);
        }
    }
}
