//! End-to-end checks through the public API

use cellcore::{
    CellCore, ColumnRegistry, ColumnValues, ConversionRequest, CoreError, DType, Frame, MemoryFrame,
    NormalizationMode, Settings, UnitConverter, UnitSystem,
};

#[test]
fn gravimetric_scenario() {
    let registry = ColumnRegistry::new()
        .define("ChargeCapacity", "charge_capacity", Some("mAh/g"), Some(DType::from_tag("float64")))
        .unwrap();
    assert_eq!(registry.spec_of("ChargeCapacity").unwrap().name, "charge_capacity");

    let raw = UnitSystem::default().with_updates([("charge", "mAh")]).unwrap();
    let canonical = UnitSystem::default()
        .with_updates([("charge", "Ah"), ("specific_gravimetric", "g"), ("mass", "g")])
        .unwrap();

    let request = ConversionRequest::new(NormalizationMode::Gravimetric, &raw, &canonical).with_scaling_value(2.0);
    let factor = UnitConverter::default().specific_conversion_factor(&request).unwrap();
    assert!((factor - 0.0005).abs() < 1e-15, "factor = {}", factor);
}

#[test]
fn unknown_mode_fails_loudly() {
    let units = UnitSystem::default();
    let result = ConversionRequest::parse("unknown_mode", &units, &units);
    assert!(matches!(result, Err(CoreError::UnsupportedNormalizationMode(_))));
}

#[test]
fn session_summary_from_settings() {
    let settings = Settings::from_json(
        r#"{
            "cycle_mode": "cathode",
            "raw_units": {"charge": "Ah"},
            "cellpy_units": {"charge": "mAh", "mass": "g"},
            "data_scale": {"mass": 0.5}
        }"#,
    )
    .unwrap();
    let cell = CellCore::from_settings(&settings).unwrap();
    assert_eq!(cell.first_and_second_capacity().unwrap().0, "charge_capacity");

    let frame = MemoryFrame::from_columns([
        ("cycle_index", ColumnValues::Int64(vec![1, 2])),
        ("charge_capacity", ColumnValues::Float64(vec![0.001, 0.002])),
        ("discharge_capacity", ColumnValues::Float64(vec![0.0009, 0.0019])),
    ])
    .unwrap();

    let out = cell
        .add_scaled_summary_columns(frame.clone(), &[NormalizationMode::Gravimetric])
        .unwrap();

    // every input column survives, in order
    assert_eq!(out.column_names()[..3], frame.column_names()[..]);

    // 0.001 Ah = 1 mAh over 0.5 g
    let gravimetric = out.get_column("charge_capacity_gravimetric").unwrap();
    let value = gravimetric.as_f64().unwrap()[0];
    assert!((value - 2.0).abs() < 1e-12, "value = {}", value);
}
