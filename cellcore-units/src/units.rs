//! Unit definitions for battery-cycling data
//!
//! The registry is built once per process behind a `LazyLock`; concurrent
//! first use initializes it exactly once and every caller sees the same
//! instance. Code that wants to be explicit about it passes the registry
//! around as a context (`&UnitRegistry`), e.g. to `UnitConverter::new`.

use crate::{Dimension, Unit};
use cellcore_core::Number;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Process-wide unit registry
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// Registry of known unit symbols and their aliases
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    units: HashMap<String, Unit>,
    aliases: HashMap<String, String>,
}

/// Decimal literal used in the unit tables below
fn dec(literal: &'static str) -> Number {
    Number::from_str(literal).expect("unit table literal is a valid decimal")
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut registry = UnitRegistry {
            units: HashMap::new(),
            aliases: HashMap::new(),
        };
        registry.register_all_units();
        registry
    }

    /// The shared, lazily initialized registry
    pub fn shared() -> &'static UnitRegistry {
        &UNITS
    }

    /// Get a unit by symbol or alias
    pub fn get(&self, symbol: &str) -> Option<&Unit> {
        self.units
            .get(symbol)
            .or_else(|| self.aliases.get(symbol).and_then(|canonical| self.units.get(canonical)))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    /// All units in a category, sorted by symbol
    pub fn by_category(&self, category: &str) -> Vec<&Unit> {
        let mut units: Vec<&Unit> = self.units.values().filter(|u| u.category == category).collect();
        units.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        units
    }

    fn register(&mut self, symbol: &str, name: &str, dimension: Dimension, factor: Number, category: &str) {
        self.units
            .insert(symbol.to_string(), Unit::new(symbol, name, dimension, factor, category));
    }

    fn alias(&mut self, alias: &str, symbol: &str) {
        self.aliases.insert(alias.to_string(), symbol.to_string());
    }

    fn aliases(&mut self, symbol: &str, aliases: &[&str]) {
        for alias in aliases {
            self.alias(alias, symbol);
        }
    }

    fn register_all_units(&mut self) {
        self.register_length_units();
        self.register_mass_units();
        self.register_time_units();
        self.register_temperature_units();
        self.register_current_units();
        self.register_charge_units();
        self.register_voltage_units();
        self.register_resistance_units();
        self.register_energy_units();
        self.register_power_units();
        self.register_frequency_units();
        self.register_area_units();
        self.register_volume_units();
        self.register_pressure_units();
        self.register_amount_units();
        self.register_ratio_units();
    }

    fn register_length_units(&mut self) {
        let d = Dimension::LENGTH;
        self.register("m", "meter", d, Number::one(), "length");
        self.register("km", "kilometer", d, Number::from_i64(1000), "length");
        self.register("dm", "decimeter", d, dec("0.1"), "length");
        self.register("cm", "centimeter", d, dec("0.01"), "length");
        self.register("mm", "millimeter", d, dec("0.001"), "length");
        self.register("um", "micrometer", d, dec("1e-6"), "length");
        self.register("nm", "nanometer", d, dec("1e-9"), "length");

        self.aliases("m", &["meter", "meters", "metre", "metres"]);
        self.aliases("cm", &["centimeter", "centimeters"]);
        self.aliases("mm", &["millimeter", "millimeters"]);
        self.aliases("um", &["μm", "µm", "micron", "microns", "micrometer"]);
    }

    fn register_mass_units(&mut self) {
        let d = Dimension::MASS;
        self.register("kg", "kilogram", d, Number::one(), "mass");
        self.register("g", "gram", d, dec("0.001"), "mass");
        self.register("mg", "milligram", d, dec("1e-6"), "mass");
        self.register("ug", "microgram", d, dec("1e-9"), "mass");

        self.aliases("kg", &["kilogram", "kilograms"]);
        self.aliases("g", &["gram", "grams"]);
        self.aliases("mg", &["milligram", "milligrams"]);
        self.aliases("ug", &["μg", "µg", "microgram", "micrograms"]);
    }

    fn register_time_units(&mut self) {
        let d = Dimension::TIME;
        self.register("s", "second", d, Number::one(), "time");
        self.register("ms", "millisecond", d, dec("0.001"), "time");
        self.register("us", "microsecond", d, dec("1e-6"), "time");
        self.register("min", "minute", d, Number::from_i64(60), "time");
        self.register("h", "hour", d, Number::from_i64(3600), "time");
        self.register("d", "day", d, Number::from_i64(86400), "time");

        self.aliases("s", &["sec", "secs", "second", "seconds"]);
        self.aliases("ms", &["millisecond", "milliseconds"]);
        self.aliases("us", &["μs", "µs", "microsecond", "microseconds"]);
        self.aliases("min", &["minute", "minutes"]);
        self.aliases("h", &["hr", "hrs", "hour", "hours"]);
        self.aliases("d", &["day", "days"]);
    }

    fn register_temperature_units(&mut self) {
        let d = Dimension::TEMPERATURE;
        self.register("K", "kelvin", d, Number::one(), "temperature");
        self.units.insert(
            "degC".to_string(),
            Unit::with_offset("degC", "celsius", d, Number::one(), dec("273.15"), "temperature"),
        );
        // K = (F + 459.67) * 5/9
        self.units.insert(
            "degF".to_string(),
            Unit::with_offset(
                "degF",
                "fahrenheit",
                d,
                dec("0.55555555555555555555555555555555555555555555555556"),
                dec("255.37222222222222222222222222222222222222222222222"),
                "temperature",
            ),
        );

        self.aliases("K", &["kelvin"]);
        // instrument files write bare "C" for Celsius; coulomb is "Coul"
        self.aliases("degC", &["C", "°C", "celsius"]);
        self.aliases("degF", &["F", "°F", "fahrenheit"]);
    }

    fn register_current_units(&mut self) {
        let d = Dimension::CURRENT;
        self.register("A", "ampere", d, Number::one(), "current");
        self.register("mA", "milliampere", d, dec("0.001"), "current");
        self.register("uA", "microampere", d, dec("1e-6"), "current");
        self.register("nA", "nanoampere", d, dec("1e-9"), "current");
        self.register("kA", "kiloampere", d, Number::from_i64(1000), "current");

        self.aliases("A", &["amp", "amps", "ampere", "amperes"]);
        self.aliases("mA", &["milliamp", "milliampere"]);
        self.aliases("uA", &["μA", "µA"]);
    }

    fn register_charge_units(&mut self) {
        let d = Dimension::CHARGE;
        self.register("Coul", "coulomb", d, Number::one(), "charge");
        self.register("mCoul", "millicoulomb", d, dec("0.001"), "charge");
        self.register("Ah", "ampere-hour", d, Number::from_i64(3600), "charge");
        self.register("mAh", "milliampere-hour", d, dec("3.6"), "charge");
        self.register("uAh", "microampere-hour", d, dec("0.0036"), "charge");
        self.register("kAh", "kiloampere-hour", d, Number::from_i64(3_600_000), "charge");

        self.aliases("Coul", &["coulomb", "coulombs"]);
        self.aliases("mCoul", &["mC"]);
        self.aliases("Ah", &["A*h", "ampere_hour", "amp_hour"]);
        self.aliases("mAh", &["mA*h", "milliampere_hour"]);
        self.aliases("uAh", &["μAh", "µAh"]);
    }

    fn register_voltage_units(&mut self) {
        let d = Dimension::VOLTAGE;
        self.register("V", "volt", d, Number::one(), "voltage");
        self.register("mV", "millivolt", d, dec("0.001"), "voltage");
        self.register("uV", "microvolt", d, dec("1e-6"), "voltage");
        self.register("kV", "kilovolt", d, Number::from_i64(1000), "voltage");

        self.aliases("V", &["volt", "volts"]);
        self.aliases("uV", &["μV", "µV"]);
    }

    fn register_resistance_units(&mut self) {
        let d = Dimension::RESISTANCE;
        self.register("ohm", "ohm", d, Number::one(), "resistance");
        self.register("mohm", "milliohm", d, dec("0.001"), "resistance");
        self.register("kohm", "kiloohm", d, Number::from_i64(1000), "resistance");
        self.register("Mohm", "megaohm", d, Number::from_i64(1_000_000), "resistance");

        self.aliases("ohm", &["Ohm", "Ohms", "ohms", "Ω"]);
        self.aliases("mohm", &["mOhm", "mΩ"]);
        self.aliases("kohm", &["kOhm", "kΩ"]);
        self.aliases("Mohm", &["MOhm", "MΩ"]);
    }

    fn register_energy_units(&mut self) {
        let d = Dimension::ENERGY;
        self.register("J", "joule", d, Number::one(), "energy");
        self.register("kJ", "kilojoule", d, Number::from_i64(1000), "energy");
        self.register("Wh", "watt-hour", d, Number::from_i64(3600), "energy");
        self.register("mWh", "milliwatt-hour", d, dec("3.6"), "energy");
        self.register("uWh", "microwatt-hour", d, dec("0.0036"), "energy");
        self.register("kWh", "kilowatt-hour", d, Number::from_i64(3_600_000), "energy");

        self.aliases("J", &["joule", "joules"]);
        self.aliases("Wh", &["W*h", "watt_hour"]);
        self.aliases("uWh", &["μWh", "µWh"]);
    }

    fn register_power_units(&mut self) {
        let d = Dimension::POWER;
        self.register("W", "watt", d, Number::one(), "power");
        self.register("mW", "milliwatt", d, dec("0.001"), "power");
        self.register("uW", "microwatt", d, dec("1e-6"), "power");
        self.register("kW", "kilowatt", d, Number::from_i64(1000), "power");

        self.aliases("W", &["watt", "watts"]);
        self.aliases("uW", &["μW", "µW"]);
    }

    fn register_frequency_units(&mut self) {
        let d = Dimension::FREQUENCY;
        self.register("Hz", "hertz", d, Number::one(), "frequency");
        self.register("mHz", "millihertz", d, dec("0.001"), "frequency");
        self.register("kHz", "kilohertz", d, Number::from_i64(1000), "frequency");
        self.register("MHz", "megahertz", d, Number::from_i64(1_000_000), "frequency");

        self.aliases("Hz", &["hz", "hertz"]);
    }

    fn register_area_units(&mut self) {
        let d = Dimension::AREA;
        self.register("m2", "square meter", d, Number::one(), "area");
        self.register("cm2", "square centimeter", d, dec("0.0001"), "area");
        self.register("mm2", "square millimeter", d, dec("1e-6"), "area");

        self.aliases("m2", &["m²"]);
        self.aliases("cm2", &["cm²"]);
        self.aliases("mm2", &["mm²"]);
    }

    fn register_volume_units(&mut self) {
        let d = Dimension::VOLUME;
        self.register("m3", "cubic meter", d, Number::one(), "volume");
        self.register("L", "liter", d, dec("0.001"), "volume");
        self.register("mL", "milliliter", d, dec("1e-6"), "volume");
        self.register("cm3", "cubic centimeter", d, dec("1e-6"), "volume");
        self.register("mm3", "cubic millimeter", d, dec("1e-9"), "volume");

        self.aliases("m3", &["m³"]);
        self.aliases("L", &["l", "liter", "liters", "litre", "litres"]);
        self.aliases("mL", &["ml", "milliliter", "milliliters"]);
        self.aliases("cm3", &["cm³", "cc"]);
        self.aliases("mm3", &["mm³"]);
    }

    fn register_pressure_units(&mut self) {
        let d = Dimension::PRESSURE;
        self.register("Pa", "pascal", d, Number::one(), "pressure");
        self.register("kPa", "kilopascal", d, Number::from_i64(1000), "pressure");
        self.register("MPa", "megapascal", d, Number::from_i64(1_000_000), "pressure");
        self.register("bar", "bar", d, Number::from_i64(100_000), "pressure");
        self.register("mbar", "millibar", d, Number::from_i64(100), "pressure");
        self.register("atm", "atmosphere", d, Number::from_i64(101_325), "pressure");
        self.register("psi", "pounds per square inch", d, dec("6894.757293168"), "pressure");
        self.register("torr", "torr", d, dec("133.322368421"), "pressure");

        self.aliases("Pa", &["pascal", "pascals"]);
        self.aliases("atm", &["atmosphere", "atmospheres"]);
    }

    fn register_amount_units(&mut self) {
        let d = Dimension::AMOUNT;
        self.register("mol", "mole", d, Number::one(), "amount");
        self.register("mmol", "millimole", d, dec("0.001"), "amount");

        self.aliases("mol", &["mole", "moles"]);
    }

    fn register_ratio_units(&mut self) {
        let d = Dimension::DIMENSIONLESS;
        self.register("percent", "percent", d, dec("0.01"), "ratio");
        self.register("ppm", "parts per million", d, dec("1e-6"), "ratio");

        self.aliases("percent", &["%", "pct"]);
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}
