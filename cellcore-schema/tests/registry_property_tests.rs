//! Property-based tests for the column registry
//!
//! Properties:
//! - no two keys share a column name, whatever order definitions arrive in
//! - export -> from_export gives back an equal registry
//! - every defined column is reachable by key and by name

use cellcore_core::CoreError;
use cellcore_schema::{ColumnRegistry, ColumnSpec, DType};
use proptest::prelude::*;

fn arb_dtype() -> impl Strategy<Value = Option<DType>> {
    prop_oneof![
        Just(None),
        Just(Some(DType::Float64)),
        Just(Some(DType::Int64)),
        Just(Some(DType::Utf8)),
        "[A-Z][a-z0-9]{0,8}".prop_map(|tag| Some(DType::from_tag(&tag))),
    ]
}

fn arb_unit() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("mAh".to_string())),
        Just(Some("mAh/g".to_string())),
        Just(Some("V".to_string())),
    ]
}

/// (key, spec) pairs; keys and names may collide on purpose
fn arb_definitions() -> impl Strategy<Value = Vec<(String, ColumnSpec)>> {
    prop::collection::vec(
        ("[A-E][a-c]{0,2}", "col[0-9]{1,2}", arb_unit(), arb_dtype()).prop_map(|(key, name, unit, dtype)| {
            (key, ColumnSpec { name, unit, dtype })
        }),
        0..24,
    )
}

/// Apply definitions, skipping the ones the registry rejects
fn build(definitions: &[(String, ColumnSpec)]) -> ColumnRegistry {
    definitions.iter().fold(ColumnRegistry::new(), |registry, (key, spec)| {
        match registry.clone().define_spec(key.as_str(), spec.clone()) {
            Ok(next) => next,
            Err(CoreError::DuplicateKey(_)) | Err(CoreError::DuplicateColumnName { .. }) => registry,
            Err(other) => panic!("unexpected error: {}", other),
        }
    })
}

proptest! {
    #[test]
    fn names_are_unique(definitions in arb_definitions()) {
        let registry = build(&definitions);
        let mut names = registry.names();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        prop_assert_eq!(names.len(), total);
    }

    #[test]
    fn export_round_trip(definitions in arb_definitions()) {
        let registry = build(&definitions);
        let rebuilt = ColumnRegistry::from_export(registry.export()).unwrap();
        prop_assert_eq!(&rebuilt, &registry);

        let from_json = ColumnRegistry::from_json(&registry.to_json().unwrap()).unwrap();
        prop_assert_eq!(&from_json, &registry);
    }

    #[test]
    fn dual_access(definitions in arb_definitions()) {
        let registry = build(&definitions);
        for (key, spec) in registry.iter() {
            prop_assert_eq!(&registry.spec_of(key.as_str()).unwrap().name, &spec.name);
            prop_assert_eq!(registry.key_of(&spec.name), Some(key));
            prop_assert!(registry.contains(&spec.name));
        }
    }

    #[test]
    fn define_reports_the_first_conflict(definitions in arb_definitions()) {
        let mut registry = ColumnRegistry::new();
        for (key, spec) in definitions {
            let key_taken = registry.contains_key(&key);
            let name_taken = registry.contains(&spec.name);
            match registry.clone().define_spec(key.as_str(), spec) {
                Ok(next) => {
                    prop_assert!(!key_taken && !name_taken);
                    registry = next;
                }
                Err(CoreError::DuplicateKey(_)) => prop_assert!(key_taken),
                Err(CoreError::DuplicateColumnName { .. }) => prop_assert!(!key_taken && name_taken),
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
        }
    }
}
