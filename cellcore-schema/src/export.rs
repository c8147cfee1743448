//! Registry export format
//!
//! ```json
//! {
//!   "version": "1.0.0",
//!   "postfixes": ["gravimetric", "areal", "absolute"],
//!   "columns": {
//!     "ChargeCapacity": {"value": "charge_capacity", "unit": "mAh", "dtype": "Float64"}
//!   }
//! }
//! ```
//!
//! `columns` keeps document order on both write and read.

use crate::column::{ColumnKey, ColumnSpec};
use crate::registry::ColumnRegistry;
use cellcore_core::{CoreError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnExport {
    pub version: String,
    #[serde(default)]
    pub postfixes: Vec<String>,
    #[serde(with = "ordered_columns")]
    pub columns: Vec<(ColumnKey, ColumnSpec)>,
}

impl ColumnExport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CoreError::InvalidConfig(format!("column export: {}", e)))
    }
}

impl ColumnRegistry {
    /// Export serialized as pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        self.export().to_json()
    }

    /// Parse an export document and rebuild the registry from it
    pub fn from_json(json: &str) -> Result<Self> {
        ColumnRegistry::from_export(ColumnExport::from_json(json)?)
    }
}

mod ordered_columns {
    use super::{ColumnKey, ColumnSpec};
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(columns: &[(ColumnKey, ColumnSpec)], serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(columns.len()))?;
        for (key, spec) in columns {
            map.serialize_entry(key, spec)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<(ColumnKey, ColumnSpec)>, D::Error> {
        deserializer.deserialize_map(ColumnsVisitor)
    }

    struct ColumnsVisitor;

    impl<'de> Visitor<'de> for ColumnsVisitor {
        type Value = Vec<(ColumnKey, ColumnSpec)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of column key to {value, unit, dtype}")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut columns = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((key, spec)) = access.next_entry::<ColumnKey, ColumnSpec>()? {
                columns.push((key, spec));
            }
            Ok(columns)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DType;

    fn registry() -> ColumnRegistry {
        ColumnRegistry::with_version("0.0.1")
            .define("B", "col2", Some("mAh/g"), Some(DType::Float64))
            .unwrap()
            .define("A", "col1", Some("V"), Some(DType::Float64))
            .unwrap()
            .define("D", "col4", None, None)
            .unwrap()
    }

    #[test]
    fn test_json_keeps_definition_order() {
        let json = registry().to_json().unwrap();
        let b = json.find("\"B\"").unwrap();
        let a = json.find("\"A\"").unwrap();
        let d = json.find("\"D\"").unwrap();
        assert!(b < a && a < d, "{}", json);
    }

    #[test]
    fn test_json_round_trip() {
        let original = registry();
        let rebuilt = ColumnRegistry::from_json(&original.to_json().unwrap()).unwrap();
        assert_eq!(rebuilt, original);
        assert_eq!(rebuilt.names(), vec!["col2", "col1", "col4"]);
        assert_eq!(rebuilt.version(), "0.0.1");
    }

    #[test]
    fn test_missing_unit_and_dtype_are_null() {
        let json = serde_json::to_value(registry().export()).unwrap();
        assert_eq!(json["columns"]["D"]["value"], "col4");
        assert!(json["columns"]["D"]["unit"].is_null());
        assert!(json["columns"]["D"]["dtype"].is_null());
    }

    #[test]
    fn test_import_rejects_duplicate_names() {
        let json = r#"{
            "version": "1.0.0",
            "columns": {
                "A": {"value": "col1", "unit": null, "dtype": null},
                "B": {"value": "col1", "unit": null, "dtype": null}
            }
        }"#;
        assert!(matches!(
            ColumnRegistry::from_json(json),
            Err(CoreError::DuplicateColumnName { .. })
        ));
    }

    #[test]
    fn test_import_rejects_malformed_document() {
        assert!(matches!(
            ColumnRegistry::from_json("{\"columns\": []}"),
            Err(CoreError::InvalidConfig(_))
        ));
    }
}
