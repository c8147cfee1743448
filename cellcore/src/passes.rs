//! Built-in summary passes

use crate::frame::Frame;
use crate::pipeline::{PassContext, SummaryPass};
use cellcore_core::{CoreError, Result};
use cellcore_schema::{CycleCol, TableColumn};
use cellcore_units::{ConversionRequest, NormalizationMode};
use tracing::debug;

/// Appends `<name>_<mode>` for every normalizable cycle column in the frame.
///
/// The factor comes from the context's converter (`from_units` to
/// `to_units`, scaling from the context's `DataScale`). Columns missing from
/// the frame are skipped. Running the same mode again recomputes its own
/// `_<mode>` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecificColumnsPass {
    pub mode: NormalizationMode,
}

impl SpecificColumnsPass {
    pub fn new(mode: NormalizationMode) -> Self {
        SpecificColumnsPass { mode }
    }
}

impl<F: Frame> SummaryPass<F> for SpecificColumnsPass {
    fn name(&self) -> &str {
        match self.mode {
            NormalizationMode::Gravimetric => "specific_columns_gravimetric",
            NormalizationMode::Areal => "specific_columns_areal",
            NormalizationMode::Volumetric => "specific_columns_volumetric",
            NormalizationMode::Absolute => "specific_columns_absolute",
        }
    }

    fn apply(&self, frame: &F, ctx: &PassContext<'_>) -> Result<F> {
        let request = ConversionRequest::new(self.mode, ctx.from_units, ctx.to_units).with_data_scale(ctx.data_scale);
        let factor = ctx.converter.specific_conversion_factor(&request)?;
        debug!(mode = %self.mode, factor, "adding specific columns");

        let mut out = frame.clone();
        for column in CycleCol::SPECIFIC {
            let name = ctx.registry.name_of(column.key())?;
            if !out.has_column(name) {
                continue;
            }

            let target = ctx.registry.specific_name(column.key(), self.mode)?;
            let scaled = out.get_column(name)?.scaled(factor).ok_or_else(|| {
                CoreError::contract_violation(
                    <Self as SummaryPass<F>>::name(self),
                    format!("column '{}' is not numeric", name),
                )
            })?;
            out = out.with_column(&target, scaled)?;
        }
        Ok(out)
    }

    fn owns_column(&self, name: &str, ctx: &PassContext<'_>) -> bool {
        CycleCol::SPECIFIC.iter().any(|column| {
            ctx.registry
                .specific_name(column.key(), self.mode)
                .is_ok_and(|target| target == name)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{ColumnValues, MemoryFrame};
    use crate::mode::CyclingMode;
    use crate::pipeline::Pipeline;
    use cellcore_schema::cycle_columns;
    use cellcore_units::{DataScale, UnitConverter, UnitSystem};

    fn summary() -> MemoryFrame {
        MemoryFrame::from_columns([
            ("cycle_index", ColumnValues::Int64(vec![1, 2])),
            ("charge_capacity", ColumnValues::Float64(vec![10.0, 20.0])),
            ("discharge_capacity", ColumnValues::Float64(vec![8.0, 18.0])),
            ("coulombic_efficiency", ColumnValues::Float64(vec![80.0, 90.0])),
        ])
        .unwrap()
    }

    fn approx(values: &[f64], expected: &[f64]) -> bool {
        values.len() == expected.len()
            && values.iter().zip(expected).all(|(a, b)| (a - b).abs() <= 1e-9 * b.abs().max(1.0))
    }

    #[test]
    fn test_gravimetric_columns() {
        let registry = cycle_columns().unwrap();
        let units = UnitSystem::default();
        let ctx = PassContext {
            registry: &registry,
            converter: UnitConverter::default(),
            cycling_mode: CyclingMode::Anode,
            from_units: &units,
            to_units: &units,
            // 2 mg -> mAh/g factor 500
            data_scale: DataScale::default().with_mass(2.0),
        };

        let pipeline = Pipeline::new()
            .with_pass(SpecificColumnsPass::new(NormalizationMode::Gravimetric))
            .with_pass(SpecificColumnsPass::new(NormalizationMode::Absolute));
        let out = pipeline.run(summary(), &ctx).unwrap();

        assert_eq!(
            out.column_names(),
            vec![
                "cycle_index",
                "charge_capacity",
                "discharge_capacity",
                "coulombic_efficiency",
                "discharge_capacity_gravimetric",
                "charge_capacity_gravimetric",
                "discharge_capacity_absolute",
                "charge_capacity_absolute",
            ]
        );
        let gravimetric = out.get_column("charge_capacity_gravimetric").unwrap();
        assert!(approx(gravimetric.as_f64().unwrap(), &[5000.0, 10000.0]));
        let absolute = out.get_column("discharge_capacity_absolute").unwrap();
        assert!(approx(absolute.as_f64().unwrap(), &[8.0, 18.0]));
    }

    #[test]
    fn test_rerun_recomputes_own_columns_only() {
        let registry = cycle_columns().unwrap();
        let units = UnitSystem::default();
        let ctx = |mass| PassContext {
            registry: &registry,
            converter: UnitConverter::default(),
            cycling_mode: CyclingMode::Anode,
            from_units: &units,
            to_units: &units,
            data_scale: DataScale::default().with_mass(mass),
        };
        let pipeline = Pipeline::new().with_pass(SpecificColumnsPass::new(NormalizationMode::Gravimetric));

        let first = pipeline.run(summary(), &ctx(2.0)).unwrap();
        let second = pipeline.run(first.clone(), &ctx(4.0)).unwrap();
        assert_eq!(second.column_names(), first.column_names());
        let charge = second.get_column("charge_capacity_gravimetric").unwrap();
        assert!(approx(charge.as_f64().unwrap(), &[2500.0, 5000.0]));

        let pass = SpecificColumnsPass::new(NormalizationMode::Gravimetric);
        let ctx = ctx(2.0);
        assert!(SummaryPass::<MemoryFrame>::owns_column(&pass, "charge_capacity_gravimetric", &ctx));
        assert!(!SummaryPass::<MemoryFrame>::owns_column(&pass, "charge_capacity", &ctx));
        assert!(!SummaryPass::<MemoryFrame>::owns_column(&pass, "charge_capacity_areal", &ctx));
    }

    #[test]
    fn test_missing_scale_propagates() {
        let registry = cycle_columns().unwrap();
        let units = UnitSystem::default();
        let ctx = PassContext {
            registry: &registry,
            converter: UnitConverter::default(),
            cycling_mode: CyclingMode::Cathode,
            from_units: &units,
            to_units: &units,
            data_scale: DataScale::default(),
        };

        let pass = SpecificColumnsPass::new(NormalizationMode::Areal);
        let err = SummaryPass::<MemoryFrame>::apply(&pass, &summary(), &ctx).unwrap_err();
        assert_eq!(err, CoreError::missing_scaling_value("areal", "area"));
    }

    #[test]
    fn test_text_column_is_rejected() {
        let registry = cycle_columns().unwrap();
        let units = UnitSystem::default();
        let ctx = PassContext {
            registry: &registry,
            converter: UnitConverter::default(),
            cycling_mode: CyclingMode::Anode,
            from_units: &units,
            to_units: &units,
            data_scale: DataScale::default(),
        };
        let frame = MemoryFrame::from_columns([("charge_capacity", ColumnValues::Utf8(vec!["n/a".to_string()]))]).unwrap();

        let pass = SpecificColumnsPass::new(NormalizationMode::Absolute);
        let err = SummaryPass::<MemoryFrame>::apply(&pass, &frame, &ctx).unwrap_err();
        assert!(matches!(err, CoreError::ContractViolation { .. }));
    }
}
