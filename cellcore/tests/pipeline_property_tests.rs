//! Property-based tests for the summary pipeline
//!
//! Properties:
//! - running specific-column passes never drops or reorders input columns
//! - the same input gives the same output

use cellcore::{
    CellCore, ColumnValues, DataScale, Frame, MemoryFrame, NormalizationMode,
};
use proptest::prelude::*;

const CAPACITY_COLUMNS: [&str; 5] = [
    "charge_capacity",
    "discharge_capacity",
    "cumulated_charge_capacity",
    "shifted_discharge_capacity",
    "coulombic_efficiency",
];

fn arb_mode() -> impl Strategy<Value = NormalizationMode> {
    prop_oneof![
        Just(NormalizationMode::Gravimetric),
        Just(NormalizationMode::Areal),
        Just(NormalizationMode::Volumetric),
        Just(NormalizationMode::Absolute),
    ]
}

fn arb_frame() -> impl Strategy<Value = MemoryFrame> {
    (1usize..6, proptest::sample::subsequence(CAPACITY_COLUMNS.to_vec(), 0..=CAPACITY_COLUMNS.len()))
        .prop_flat_map(|(rows, names)| {
            let columns = names.len();
            (
                Just(names),
                prop::collection::vec(prop::collection::vec(0.0f64..5000.0, rows), columns),
                Just(rows),
            )
        })
        .prop_map(|(names, values, rows)| {
            let mut columns = vec![(
                "cycle_index".to_string(),
                ColumnValues::Int64((1..=rows as i64).collect()),
            )];
            for (name, values) in names.into_iter().zip(values) {
                columns.push((name.to_string(), ColumnValues::Float64(values)));
            }
            MemoryFrame::from_columns(columns).unwrap()
        })
}

fn session() -> CellCore {
    let mut cell = CellCore::new().unwrap();
    cell.set_data_scale(DataScale::default().with_mass(1.2).with_area(0.8).with_volume(0.1));
    cell
}

proptest! {
    #[test]
    fn passes_are_additive(frame in arb_frame(), modes in prop::collection::vec(arb_mode(), 0..4)) {
        let cell = session();
        let before = frame.column_names();

        // a mode listed twice rewrites its own columns in place
        let out = cell.add_scaled_summary_columns(frame, &modes).unwrap();
        let after = out.column_names();

        prop_assert!(after.len() >= before.len());
        prop_assert_eq!(&after[..before.len()], &before[..]);
    }

    #[test]
    fn passes_are_deterministic(frame in arb_frame(), mode in arb_mode()) {
        let cell = session();
        let first = cell.add_scaled_summary_columns(frame.clone(), &[mode]).unwrap();
        let second = cell.add_scaled_summary_columns(frame, &[mode]).unwrap();
        prop_assert_eq!(first, second);
    }
}
