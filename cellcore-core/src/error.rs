//! Error taxonomy shared by every cellcore crate
//!
//! Errors are raised where they are detected and travel unchanged through
//! the calling layers. Nothing in the workspace catches one of these and
//! substitutes a default value.

use thiserror::Error;

/// Failures of registry lookups, unit handling and pipeline contracts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A column key (or column name) is not defined where it was required.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// The key is already defined in the registry.
    #[error("duplicate column key: {0}")]
    DuplicateKey(String),

    /// The column name is already used by another key.
    #[error("column name '{name}' is already used by key '{existing_key}'")]
    DuplicateColumnName { name: String, existing_key: String },

    /// The quantity is not one of the fixed unit-system quantities.
    #[error("unknown unit quantity: {0}")]
    UnknownUnitQuantity(String),

    /// A unit string could not be parsed, or the unit algebra failed
    /// (dimension mismatch, division by zero).
    #[error("unit error: {0}")]
    UnitParse(String),

    #[error("unsupported normalization mode: {0}")]
    UnsupportedNormalizationMode(String),

    /// A gravimetric/areal/volumetric conversion had no scaling value.
    #[error("missing scaling value ({quantity}) for {mode} normalization")]
    MissingScalingValue { mode: String, quantity: String },

    #[error("normalization mode '{0}' is not implemented for this operation")]
    NotImplementedNormalizationMode(String),

    #[error("no data found: {0}")]
    NoDataFound(String),

    /// A summary pass broke the additive-only contract.
    #[error("summary pass '{pass}' violated the pipeline contract: {reason}")]
    ContractViolation { pass: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CoreError {
    pub fn missing_scaling_value(mode: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self::MissingScalingValue { mode: mode.into(), quantity: quantity.into() }
    }

    pub fn contract_violation(pass: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ContractViolation { pass: pass.into(), reason: reason.into() }
    }
}

impl From<crate::NumberError> for CoreError {
    fn from(err: crate::NumberError) -> Self {
        Self::UnitParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NumberError;

    #[test]
    fn test_display_messages() {
        let err = CoreError::DuplicateColumnName {
            name: "charge_capacity".to_string(),
            existing_key: "ChargeCapacity".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "column name 'charge_capacity' is already used by key 'ChargeCapacity'"
        );

        let err = CoreError::missing_scaling_value("gravimetric", "mass");
        assert_eq!(err.to_string(), "missing scaling value (mass) for gravimetric normalization");
    }

    #[test]
    fn test_number_error_becomes_unit_error() {
        let err: CoreError = NumberError::DivisionByZero.into();
        assert!(matches!(err, CoreError::UnitParse(_)));
    }
}
