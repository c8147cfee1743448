//! Cell session
//!
//! `CellCore` holds what one cell's processing needs: the column registries
//! of the raw, cycle and step tables, the raw/cellpy/output unit systems,
//! the cycling mode and (once loaded) the data frames.

use crate::config::Settings;
use crate::frame::{Frame, MemoryFrame};
use crate::mode::CyclingMode;
use crate::passes::SpecificColumnsPass;
use crate::pipeline::{PassContext, Pipeline};
use cellcore_core::{CoreError, Result};
use cellcore_schema::{cycle_columns, raw_columns, step_columns, ColumnRegistry, TableColumn};
use cellcore_units::{ConversionRequest, DataScale, NormalizationMode, UnitConverter, UnitSystem};
use tracing::{debug, info};

/// The frames of one cell
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Data {
    pub raw: MemoryFrame,
    pub cycle: MemoryFrame,
    pub step: MemoryFrame,
}

#[derive(Debug, Clone)]
pub struct CellCore {
    raw_cols: ColumnRegistry,
    cycle_cols: ColumnRegistry,
    step_cols: ColumnRegistry,
    raw_units: UnitSystem,
    cellpy_units: UnitSystem,
    output_units: UnitSystem,
    cycle_mode: CyclingMode,
    data_scale: DataScale,
    data: Option<Data>,
}

impl CellCore {
    /// Session with default tables, default units and no data
    pub fn new() -> Result<Self> {
        Self::from_settings(&Settings::default())
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        debug!("creating cell session");
        Ok(CellCore {
            raw_cols: raw_columns()?,
            cycle_cols: cycle_columns()?,
            step_cols: step_columns()?,
            raw_units: settings.raw_unit_system()?,
            cellpy_units: settings.cellpy_unit_system()?,
            output_units: settings.output_unit_system()?,
            cycle_mode: settings.cycle_mode,
            data_scale: settings.data_scale,
            data: None,
        })
    }

    /// Attach empty frames
    pub fn initialize(&mut self) {
        debug!("initializing empty data");
        self.data = Some(Data::default());
    }

    pub fn with_data(mut self, data: Data) -> Self {
        self.data = Some(data);
        self
    }

    pub fn set_data(&mut self, data: Data) {
        self.data = Some(data);
    }

    /// Fails with `NoDataFound` until data is attached
    pub fn data(&self) -> Result<&Data> {
        self.data
            .as_ref()
            .ok_or_else(|| CoreError::NoDataFound("the cell does not have any data".to_string()))
    }

    pub fn data_mut(&mut self) -> Result<&mut Data> {
        self.data
            .as_mut()
            .ok_or_else(|| CoreError::NoDataFound("the cell does not have any data".to_string()))
    }

    pub fn raw_cols(&self) -> &ColumnRegistry {
        &self.raw_cols
    }

    pub fn cycle_cols(&self) -> &ColumnRegistry {
        &self.cycle_cols
    }

    pub fn step_cols(&self) -> &ColumnRegistry {
        &self.step_cols
    }

    pub fn raw_units(&self) -> &UnitSystem {
        &self.raw_units
    }

    pub fn cellpy_units(&self) -> &UnitSystem {
        &self.cellpy_units
    }

    pub fn output_units(&self) -> &UnitSystem {
        &self.output_units
    }

    pub fn cycle_mode(&self) -> CyclingMode {
        self.cycle_mode
    }

    pub fn set_cycle_mode(&mut self, mode: CyclingMode) {
        debug!(mode = %mode, "cycle mode set");
        self.cycle_mode = mode;
    }

    pub fn data_scale(&self) -> DataScale {
        self.data_scale
    }

    pub fn set_data_scale(&mut self, data_scale: DataScale) {
        self.data_scale = data_scale;
    }

    fn converter(&self) -> UnitConverter<'static> {
        UnitConverter::default()
    }

    /// Factor from raw units to cellpy units for `mode`
    pub fn conversion_factor(&self, mode: NormalizationMode, scaling_value: Option<f64>) -> Result<f64> {
        self.factor(mode, scaling_value, &self.raw_units, &self.cellpy_units)
    }

    /// Factor from cellpy units to output units for `mode`
    pub fn output_factor(&self, mode: NormalizationMode, scaling_value: Option<f64>) -> Result<f64> {
        self.factor(mode, scaling_value, &self.cellpy_units, &self.output_units)
    }

    fn factor(
        &self,
        mode: NormalizationMode,
        scaling_value: Option<f64>,
        from: &UnitSystem,
        to: &UnitSystem,
    ) -> Result<f64> {
        let mut request = ConversionRequest::new(mode, from, to).with_data_scale(self.data_scale);
        request.scaling_value = scaling_value;
        self.converter().specific_conversion_factor(&request)
    }

    /// Nominal capacity in Ah.
    ///
    /// Without an explicit `scaling_value` the session's mass (gravimetric)
    /// or electrode area (areal) is used.
    pub fn nominal_capacity_as_absolute(
        &self,
        value: f64,
        basis: NormalizationMode,
        scaling_value: Option<f64>,
        convert_charge_units: bool,
    ) -> Result<f64> {
        let scaling_value = scaling_value.or(match basis {
            NormalizationMode::Gravimetric => self.data_scale.mass,
            NormalizationMode::Areal => self.data_scale.active_electrode_area,
            NormalizationMode::Volumetric | NormalizationMode::Absolute => None,
        });
        self.converter().nominal_capacity_to_absolute(
            value,
            basis,
            scaling_value,
            &self.raw_units,
            &self.cellpy_units,
            convert_charge_units,
        )
    }

    /// Names of the (first, second) capacity columns for the cycling mode
    pub fn first_and_second_capacity(&self) -> Result<(&str, &str)> {
        let (first, second) = self.cycle_mode.capacity_order();
        match self.cycle_mode {
            CyclingMode::Anode => info!("assuming anode half-cell cycling (discharge before charge)"),
            _ => info!("assuming full-cell / cathode cycling (charge before discharge)"),
        }
        Ok((
            self.cycle_cols.name_of(first.key())?,
            self.cycle_cols.name_of(second.key())?,
        ))
    }

    /// Run the specific-columns pass for each mode over a cycle frame.
    ///
    /// Values are taken as raw units and converted to cellpy units.
    pub fn add_scaled_summary_columns<F: Frame + 'static>(&self, frame: F, modes: &[NormalizationMode]) -> Result<F> {
        let pipeline = modes
            .iter()
            .fold(Pipeline::new(), |pipeline, &mode| pipeline.with_pass(SpecificColumnsPass::new(mode)));

        let ctx = PassContext {
            registry: &self.cycle_cols,
            converter: self.converter(),
            cycling_mode: self.cycle_mode,
            from_units: &self.raw_units,
            to_units: &self.cellpy_units,
            data_scale: self.data_scale,
        };
        pipeline.run(frame, &ctx)
    }

    /// `add_scaled_summary_columns` applied to the attached cycle frame
    pub fn update_summary(&mut self, modes: &[NormalizationMode]) -> Result<()> {
        let cycle = self.data()?.cycle.clone();
        let updated = self.add_scaled_summary_columns(cycle, modes)?;
        self.data_mut()?.cycle = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::ColumnValues;
    use cellcore_units::UnitQuantity;

    #[test]
    fn test_no_data_found() {
        let mut cell = CellCore::new().unwrap();
        assert!(matches!(cell.data(), Err(CoreError::NoDataFound(_))));

        cell.initialize();
        assert_eq!(cell.data().unwrap(), &Data::default());
    }

    #[test]
    fn test_first_and_second_capacity() {
        let mut cell = CellCore::new().unwrap();
        assert_eq!(cell.first_and_second_capacity().unwrap(), ("discharge_capacity", "charge_capacity"));

        cell.set_cycle_mode(CyclingMode::Cathode);
        assert_eq!(cell.first_and_second_capacity().unwrap(), ("charge_capacity", "discharge_capacity"));
    }

    #[test]
    fn test_conversion_factor_uses_data_scale() {
        let settings = Settings::from_json(
            r#"{"cellpy_units": {"charge": "Ah", "mass": "g"}, "data_scale": {"mass": 2.0}}"#,
        )
        .unwrap();
        let cell = CellCore::from_settings(&settings).unwrap();

        let factor = cell.conversion_factor(NormalizationMode::Gravimetric, None).unwrap();
        assert!((factor - 0.0005).abs() < 1e-15);

        // an explicit value wins
        let factor = cell.conversion_factor(NormalizationMode::Gravimetric, Some(1.0)).unwrap();
        assert!((factor - 0.001).abs() < 1e-15);
    }

    #[test]
    fn test_output_factor_identity() {
        let cell = CellCore::new().unwrap();
        assert_eq!(cell.output_factor(NormalizationMode::Absolute, None).unwrap(), 1.0);
    }

    #[test]
    fn test_nominal_capacity_from_session_mass() {
        let mut cell = CellCore::new().unwrap();
        cell.set_data_scale(DataScale::default().with_mass(10.0));
        // 372 mAh/g * 10 mg
        let absolute = cell
            .nominal_capacity_as_absolute(372.0, NormalizationMode::Gravimetric, None, false)
            .unwrap();
        assert!((absolute - 0.00372).abs() < 1e-12);

        assert!(matches!(
            cell.nominal_capacity_as_absolute(1.0, NormalizationMode::Volumetric, Some(1.0), false),
            Err(CoreError::NotImplementedNormalizationMode(_))
        ));
    }

    #[test]
    fn test_update_summary() {
        let mut cell = CellCore::new().unwrap();
        assert!(matches!(
            cell.update_summary(&[NormalizationMode::Absolute]),
            Err(CoreError::NoDataFound(_))
        ));

        let cycle = MemoryFrame::from_columns([
            ("cycle_index", ColumnValues::Int64(vec![1])),
            ("charge_capacity", ColumnValues::Float64(vec![1.5])),
        ])
        .unwrap();
        cell.set_data(Data { cycle, ..Data::default() });
        cell.set_data_scale(DataScale::default().with_area(1.5));

        cell.update_summary(&[NormalizationMode::Areal, NormalizationMode::Absolute]).unwrap();
        let cycle = &cell.data().unwrap().cycle;
        assert_eq!(
            cycle.column_names(),
            vec!["cycle_index", "charge_capacity", "charge_capacity_areal", "charge_capacity_absolute"]
        );
        // 1.5 mAh over 1.5 cm² in mAh/cm²
        let areal = cycle.get_column("charge_capacity_areal").unwrap();
        assert!((areal.as_f64().unwrap()[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_units_from_settings() {
        let settings = Settings::from_json(r#"{"output_units": {"charge": "uAh"}}"#).unwrap();
        let cell = CellCore::from_settings(&settings).unwrap();
        assert_eq!(cell.output_units().get(UnitQuantity::Charge), "uAh");
        assert_eq!(cell.raw_units().get(UnitQuantity::Charge), "mAh");
    }
}
