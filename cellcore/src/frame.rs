//! Tabular frame contract
//!
//! The core does not own a dataframe engine. Anything that can hand out a
//! column by name, add a column without touching the others, and describe
//! its schema can sit under the summary pipeline. `MemoryFrame` is the
//! in-crate implementation used by the session and the tests.

use cellcore_core::{CoreError, Result};
use cellcore_schema::DType;
use std::borrow::Cow;

/// Values of one column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Float64(Vec<f64>),
    Int64(Vec<i64>),
    Utf8(Vec<String>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Float64(v) => v.len(),
            ColumnValues::Int64(v) => v.len(),
            ColumnValues::Utf8(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype(&self) -> DType {
        match self {
            ColumnValues::Float64(_) => DType::Float64,
            ColumnValues::Int64(_) => DType::Int64,
            ColumnValues::Utf8(_) => DType::Utf8,
        }
    }

    pub fn as_f64(&self) -> Option<&[f64]> {
        match self {
            ColumnValues::Float64(v) => Some(v),
            _ => None,
        }
    }

    /// Value equality where NaN matches NaN
    pub fn same_values(&self, other: &ColumnValues) -> bool {
        match (self, other) {
            (ColumnValues::Float64(a), ColumnValues::Float64(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y || (x.is_nan() && y.is_nan()))
            }
            _ => self == other,
        }
    }

    /// Numeric values times `factor`, as floats. `None` for text columns.
    pub fn scaled(&self, factor: f64) -> Option<ColumnValues> {
        match self {
            ColumnValues::Float64(v) => Some(ColumnValues::Float64(v.iter().map(|x| x * factor).collect())),
            ColumnValues::Int64(v) => Some(ColumnValues::Float64(v.iter().map(|&x| x as f64 * factor).collect())),
            ColumnValues::Utf8(_) => None,
        }
    }
}

impl From<Vec<f64>> for ColumnValues {
    fn from(v: Vec<f64>) -> Self {
        ColumnValues::Float64(v)
    }
}

impl From<Vec<i64>> for ColumnValues {
    fn from(v: Vec<i64>) -> Self {
        ColumnValues::Int64(v)
    }
}

impl From<Vec<String>> for ColumnValues {
    fn from(v: Vec<String>) -> Self {
        ColumnValues::Utf8(v)
    }
}

/// Capabilities the summary pipeline needs from a frame
pub trait Frame: Clone {
    /// Fails with `MissingColumn` if `name` is absent
    fn get_column(&self, name: &str) -> Result<Cow<'_, ColumnValues>>;

    /// A new frame with `name` added (or its values replaced in place).
    /// `self` is left unchanged.
    fn with_column(&self, name: &str, values: ColumnValues) -> Result<Self>;

    /// Ordered `name -> dtype`
    fn schema(&self) -> Vec<(String, DType)>;

    fn column_names(&self) -> Vec<String> {
        self.schema().into_iter().map(|(name, _)| name).collect()
    }

    fn has_column(&self, name: &str) -> bool {
        self.schema().iter().any(|(n, _)| n == name)
    }
}

/// Column-ordered in-memory frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryFrame {
    columns: Vec<(String, ColumnValues)>,
}

impl MemoryFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (name, values) pairs; all columns must have the same length
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, ColumnValues)>,
        S: Into<String>,
    {
        columns
            .into_iter()
            .try_fold(MemoryFrame::new(), |frame, (name, values)| {
                let name: String = name.into();
                frame.with_column(&name, values)
            })
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.columns.first().map(|(_, v)| v.len()).unwrap_or(0)
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

impl Frame for MemoryFrame {
    fn get_column(&self, name: &str) -> Result<Cow<'_, ColumnValues>> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| Cow::Borrowed(values))
            .ok_or_else(|| CoreError::MissingColumn(name.to_string()))
    }

    fn with_column(&self, name: &str, values: ColumnValues) -> Result<Self> {
        if !self.columns.is_empty() && values.len() != self.height() {
            return Err(CoreError::contract_violation(
                "with_column",
                format!("column '{}' has {} rows, frame has {}", name, values.len(), self.height()),
            ));
        }

        let mut columns = self.columns.clone();
        match columns.iter().position(|(n, _)| n == name) {
            Some(index) => columns[index].1 = values,
            None => columns.push((name.to_string(), values)),
        }
        Ok(MemoryFrame { columns })
    }

    fn schema(&self) -> Vec<(String, DType)> {
        self.columns.iter().map(|(name, values)| (name.clone(), values.dtype())).collect()
    }

    fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }
}
