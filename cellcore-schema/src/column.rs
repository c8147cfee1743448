//! Column keys, specs and storage types

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Symbolic identifier of a column, e.g. `ChargeCapacity`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnKey(String);

impl ColumnKey {
    pub fn new(key: impl Into<String>) -> Self {
        ColumnKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Auxiliary columns are keyed `aux_*` (any case)
    pub fn is_aux(&self) -> bool {
        self.0.to_lowercase().starts_with("aux_")
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColumnKey {
    fn from(s: &str) -> Self {
        ColumnKey(s.to_string())
    }
}

impl From<String> for ColumnKey {
    fn from(s: String) -> Self {
        ColumnKey(s)
    }
}

impl Borrow<str> for ColumnKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Storage type tag. Advisory only, never checked against stored values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DType {
    Float64,
    Int64,
    Boolean,
    Utf8,
    Datetime,
    /// Any tag this crate does not know by name
    Other(String),
}

impl DType {
    pub fn as_str(&self) -> &str {
        match self {
            DType::Float64 => "Float64",
            DType::Int64 => "Int64",
            DType::Boolean => "Boolean",
            DType::Utf8 => "Utf8",
            DType::Datetime => "Datetime",
            DType::Other(tag) => tag,
        }
    }

    /// Case-insensitive; "float64" and "Float64" are the same tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "float64" | "f64" => DType::Float64,
            "int64" | "i64" => DType::Int64,
            "boolean" | "bool" => DType::Boolean,
            "utf8" | "str" | "string" => DType::Utf8,
            "datetime" => DType::Datetime,
            _ => DType::Other(tag.to_string()),
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DType::from_tag(s))
    }
}

impl Serialize for DType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(DType::from_tag(&tag))
    }
}

/// What a registry knows about one column.
///
/// `name` is the literal label used in frames. It serializes as `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    #[serde(rename = "value")]
    pub name: String,
    pub unit: Option<String>,
    pub dtype: Option<DType>,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>) -> Self {
        ColumnSpec {
            name: name.into(),
            unit: None,
            dtype: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_dtype(mut self, dtype: DType) -> Self {
        self.dtype = Some(dtype);
        self
    }
}

impl From<&str> for ColumnSpec {
    fn from(name: &str) -> Self {
        ColumnSpec::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_aux() {
        assert!(ColumnKey::new("aux_temperature").is_aux());
        assert!(ColumnKey::new("AUX_pressure").is_aux());
        assert!(!ColumnKey::new("ChargeCapacity").is_aux());
        assert!(!ColumnKey::new("auxiliary").is_aux());
    }

    #[test]
    fn test_dtype_parse() {
        assert_eq!("float64".parse::<DType>().unwrap(), DType::Float64);
        assert_eq!("Int64".parse::<DType>().unwrap(), DType::Int64);
        assert_eq!("Decimal(10,2)".parse::<DType>().unwrap(), DType::Other("Decimal(10,2)".to_string()));
    }

    #[test]
    fn test_spec_serializes_name_as_value() {
        let spec = ColumnSpec::new("col1").with_unit("V").with_dtype(DType::Float64);
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(json, r#"{"value":"col1","unit":"V","dtype":"Float64"}"#);

        let bare: ColumnSpec = serde_json::from_str(r#"{"value":"col4","unit":null,"dtype":null}"#).unwrap();
        assert_eq!(bare, ColumnSpec::new("col4"));
    }
}
