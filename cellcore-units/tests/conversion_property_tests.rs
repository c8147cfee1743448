//! Property-based tests for normalization factors
//!
//! Properties:
//! - absolute mode between identical unit systems is exactly 1
//! - doubling the scaling value halves the gravimetric/areal factor
//! - only the four known mode names are accepted

use cellcore_core::CoreError;
use cellcore_units::{ConversionRequest, NormalizationMode, UnitConverter, UnitSystem};
use proptest::prelude::*;

fn arb_charge_unit() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("Ah"), Just("mAh"), Just("uAh"), Just("Coul"), Just("mCoul")]
}

fn arb_mass_unit() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("g"), Just("mg"), Just("kg")]
}

fn arb_scaled_mode() -> impl Strategy<Value = NormalizationMode> {
    prop_oneof![
        Just(NormalizationMode::Gravimetric),
        Just(NormalizationMode::Areal),
        Just(NormalizationMode::Volumetric),
    ]
}

fn relative_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs())
}

proptest! {
    #[test]
    fn absolute_between_identical_systems_is_one(charge in arb_charge_unit(), mass in arb_mass_unit()) {
        let units = UnitSystem::default()
            .with_updates([("charge", charge), ("mass", mass)])
            .unwrap();
        let request = ConversionRequest::new(NormalizationMode::Absolute, &units, &units);

        let factor = UnitConverter::default().specific_conversion_factor(&request).unwrap();
        prop_assert_eq!(factor, 1.0);
    }

    #[test]
    fn doubling_scaling_value_halves_factor(
        mode in arb_scaled_mode(),
        from_charge in arb_charge_unit(),
        to_charge in arb_charge_unit(),
        value in 0.001f64..1000.0,
    ) {
        let from = UnitSystem::default().with_updates([("charge", from_charge)]).unwrap();
        let to = UnitSystem::default().with_updates([("charge", to_charge)]).unwrap();
        let converter = UnitConverter::default();

        let single = converter
            .specific_conversion_factor(&ConversionRequest::new(mode, &from, &to).with_scaling_value(value))
            .unwrap();
        let double = converter
            .specific_conversion_factor(&ConversionRequest::new(mode, &from, &to).with_scaling_value(2.0 * value))
            .unwrap();

        prop_assert!(single > 0.0);
        prop_assert!(relative_eq(double, single / 2.0), "{} vs {}", double, single / 2.0);
    }

    #[test]
    fn unknown_mode_names_are_rejected(name in "[a-z_]{1,16}") {
        let known = ["gravimetric", "areal", "volumetric", "absolute"];
        let units = UnitSystem::default();
        let result = ConversionRequest::parse(&name, &units, &units);

        if known.contains(&name.as_str()) {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(matches!(result, Err(CoreError::UnsupportedNormalizationMode(_))));
        }
    }
}
