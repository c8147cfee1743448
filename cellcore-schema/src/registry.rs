//! Column registry
//!
//! An ordered, immutable mapping `ColumnKey -> ColumnSpec` with lookup in
//! both directions. Registries are built with `define`, which consumes the
//! registry and hands back a new one, so a value that has been shared is
//! never changed underneath its readers.

use crate::column::{ColumnKey, ColumnSpec, DType};
use crate::export::ColumnExport;
use cellcore_core::{CoreError, Result};
use cellcore_units::NormalizationMode;
use std::collections::HashMap;
use tracing::debug;

/// Schema version used when none is given
pub const DEFAULT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRegistry {
    version: String,
    postfixes: Vec<String>,
    entries: Vec<(ColumnKey, ColumnSpec)>,
    by_key: HashMap<ColumnKey, usize>,
    by_name: HashMap<String, usize>,
}

/// A column name resolved against the registry, possibly with a postfix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumn<'a> {
    pub key: &'a ColumnKey,
    pub spec: &'a ColumnSpec,
    /// e.g. `areal` for `charge_capacity_areal`
    pub postfix: Option<&'a str>,
}

impl ResolvedColumn<'_> {
    /// The full frame label, postfix included
    pub fn column_name(&self) -> String {
        match self.postfix {
            Some(postfix) => format!("{}_{}", self.spec.name, postfix),
            None => self.spec.name.clone(),
        }
    }
}

impl ColumnRegistry {
    pub fn new() -> Self {
        Self::with_version(DEFAULT_VERSION)
    }

    pub fn with_version(version: impl Into<String>) -> Self {
        ColumnRegistry {
            version: version.into(),
            postfixes: Vec::new(),
            entries: Vec::new(),
            by_key: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Declare the postfixes accepted by `resolve` (e.g. "gravimetric")
    pub fn with_postfixes<I, S>(mut self, postfixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.postfixes = postfixes.into_iter().map(Into::into).collect();
        self
    }

    /// Add a column.
    ///
    /// Fails with `DuplicateKey` if `key` is already defined, and with
    /// `DuplicateColumnName` if another key already uses `name`.
    pub fn define(
        self,
        key: impl Into<ColumnKey>,
        name: impl Into<String>,
        unit: Option<&str>,
        dtype: Option<DType>,
    ) -> Result<Self> {
        let spec = ColumnSpec {
            name: name.into(),
            unit: unit.map(str::to_string),
            dtype,
        };
        self.define_spec(key, spec)
    }

    pub fn define_spec(mut self, key: impl Into<ColumnKey>, spec: ColumnSpec) -> Result<Self> {
        let key = key.into();

        if self.by_key.contains_key(&key) {
            return Err(CoreError::DuplicateKey(key.to_string()));
        }
        if let Some(&index) = self.by_name.get(&spec.name) {
            return Err(CoreError::DuplicateColumnName {
                name: spec.name,
                existing_key: self.entries[index].0.to_string(),
            });
        }

        debug!(key = %key, name = %spec.name, "defining column");
        let index = self.entries.len();
        self.by_key.insert(key.clone(), index);
        self.by_name.insert(spec.name.clone(), index);
        self.entries.push((key, spec));
        Ok(self)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn postfixes(&self) -> &[String] {
        &self.postfixes
    }

    /// Fails with `MissingColumn` if `key` is not defined
    pub fn spec_of(&self, key: &str) -> Result<&ColumnSpec> {
        self.by_key
            .get(key)
            .map(|&index| &self.entries[index].1)
            .ok_or_else(|| CoreError::MissingColumn(key.to_string()))
    }

    /// Shorthand for `spec_of(key)?.name`
    pub fn name_of(&self, key: &str) -> Result<&str> {
        Ok(self.spec_of(key)?.name.as_str())
    }

    /// Reverse lookup by literal column name
    pub fn key_of(&self, name: &str) -> Option<&ColumnKey> {
        self.by_name.get(name).map(|&index| &self.entries[index].0)
    }

    /// Literal name membership
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Whether `name` resolves to a column of this registry.
    ///
    /// Unlike `contains`, which checks literal names only, this also accepts
    /// a defined name with a declared postfix ("charge_capacity_areal").
    pub fn is_valid(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Resolve a frame label to its column.
    ///
    /// A literal name wins. Otherwise the label is split at its last `_`;
    /// the head must be a defined name and the tail a declared postfix.
    pub fn resolve(&self, name: &str) -> Option<ResolvedColumn<'_>> {
        if let Some(&index) = self.by_name.get(name) {
            let (key, spec) = &self.entries[index];
            return Some(ResolvedColumn { key, spec, postfix: None });
        }

        let (stem, postfix) = name.rsplit_once('_')?;
        let postfix = self.postfixes.iter().find(|p| p.as_str() == postfix)?;
        let &index = self.by_name.get(stem)?;
        let (key, spec) = &self.entries[index];
        Some(ResolvedColumn {
            key,
            spec,
            postfix: Some(postfix.as_str()),
        })
    }

    /// Column name of `key` normalized by `mode`, e.g. `charge_capacity_gravimetric`.
    ///
    /// The mode must be one of the declared postfixes.
    pub fn specific_name(&self, key: &str, mode: NormalizationMode) -> Result<String> {
        let spec = self.spec_of(key)?;
        let postfix = mode.as_str();
        if !self.postfixes.iter().any(|p| p == postfix) {
            return Err(CoreError::MissingColumn(format!("{}_{}", spec.name, postfix)));
        }
        Ok(format!("{}_{}", spec.name, postfix))
    }

    /// Fails with `MissingColumn` if `key` is not defined
    pub fn is_aux(&self, key: &str) -> Result<bool> {
        self.spec_of(key)?;
        Ok(self.by_key.get_key_value(key).is_some_and(|(k, _)| k.is_aux()))
    }

    /// Column names in definition order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(_, spec)| spec.name.as_str()).collect()
    }

    /// Keys in definition order
    pub fn keys(&self) -> Vec<&ColumnKey> {
        self.entries.iter().map(|(key, _)| key).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ColumnKey, &ColumnSpec)> {
        self.entries.iter().map(|(key, spec)| (key, spec))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ordered `key -> {value, unit, dtype}` snapshot
    pub fn export(&self) -> ColumnExport {
        ColumnExport {
            version: self.version.clone(),
            postfixes: self.postfixes.clone(),
            columns: self.entries.clone(),
        }
    }

    /// Rebuild a registry from its export. Invariants are checked again.
    pub fn from_export(export: ColumnExport) -> Result<Self> {
        export
            .columns
            .into_iter()
            .try_fold(
                ColumnRegistry::with_version(export.version).with_postfixes(export.postfixes),
                |registry, (key, spec)| registry.define_spec(key, spec),
            )
    }
}

impl Default for ColumnRegistry {
    fn default() -> Self {
        Self::new()
    }
}
