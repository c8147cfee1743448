//! Summary pipeline
//!
//! A summary pass takes a frame and returns a new one with columns added.
//! Passes may never remove, rename or reorder existing columns, and may
//! only rewrite the values of columns they declare as their own output
//! (`SummaryPass::owns_column`). `Pipeline` checks this after every pass
//! and stops with `ContractViolation`.

use crate::frame::Frame;
use crate::mode::CyclingMode;
use cellcore_core::{CoreError, Result};
use cellcore_schema::ColumnRegistry;
use cellcore_units::{DataScale, UnitConverter, UnitSystem};
use tracing::{debug, info};

/// Everything a pass may read. Built by the caller, passed explicitly.
#[derive(Debug, Clone, Copy)]
pub struct PassContext<'a> {
    /// Names of the columns the pass reads and writes
    pub registry: &'a ColumnRegistry,
    pub converter: UnitConverter<'a>,
    pub cycling_mode: CyclingMode,
    /// Units the frame's values are in
    pub from_units: &'a UnitSystem,
    /// Units the pass should produce
    pub to_units: &'a UnitSystem,
    pub data_scale: DataScale,
}

/// One step of the summary pipeline
pub trait SummaryPass<F: Frame> {
    fn name(&self) -> &str;

    /// Must be deterministic and purely additive
    fn apply(&self, frame: &F, ctx: &PassContext<'_>) -> Result<F>;

    /// Columns this pass produces. An existing column it owns may be
    /// recomputed; every other input column must come back unchanged.
    fn owns_column(&self, _name: &str, _ctx: &PassContext<'_>) -> bool {
        false
    }
}

/// Ordered list of passes run with the additivity check
pub struct Pipeline<F: Frame> {
    passes: Vec<Box<dyn SummaryPass<F>>>,
}

impl<F: Frame> Pipeline<F> {
    pub fn new() -> Self {
        Pipeline { passes: Vec::new() }
    }

    pub fn with_pass<P: SummaryPass<F> + 'static>(mut self, pass: P) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Run every pass in order. The first error stops the run.
    pub fn run(&self, frame: F, ctx: &PassContext<'_>) -> Result<F> {
        info!(passes = self.passes.len(), mode = %ctx.cycling_mode, "running summary pipeline");

        self.passes.iter().try_fold(frame, |frame, pass| {
            let before = frame.column_names();
            let next = pass.apply(&frame, ctx)?;
            check_additive(pass.name(), &before, &next.column_names())?;
            for name in before.iter().filter(|name| !pass.owns_column(name, ctx)) {
                check_unchanged(pass.name(), name, &frame, &next)?;
            }
            debug!(pass = pass.name(), added = next.column_names().len() - before.len(), "pass done");
            Ok(next)
        })
    }
}

impl<F: Frame> Default for Pipeline<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// `after` must start with exactly the columns of `before`
pub fn check_additive(pass: &str, before: &[String], after: &[String]) -> Result<()> {
    for (position, name) in before.iter().enumerate() {
        match after.get(position) {
            Some(found) if found == name => continue,
            Some(found) if after.contains(name) => {
                return Err(CoreError::contract_violation(
                    pass,
                    format!("column '{}' moved, found '{}' at position {}", name, found, position),
                ))
            }
            _ => {
                return Err(CoreError::contract_violation(
                    pass,
                    format!("column '{}' was removed or renamed", name),
                ))
            }
        }
    }
    Ok(())
}

/// Column `name` must hold the same values in `before` and `after`
pub fn check_unchanged<F: Frame>(pass: &str, name: &str, before: &F, after: &F) -> Result<()> {
    if before.get_column(name)?.same_values(&*after.get_column(name)?) {
        Ok(())
    } else {
        Err(CoreError::contract_violation(
            pass,
            format!("column '{}' was overwritten", name),
        ))
    }
}
