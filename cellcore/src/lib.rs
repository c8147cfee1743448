//! cellcore - column schemas and unit conversion for battery-cycling data
//!
//! The session type [`CellCore`] ties together:
//! - column registries for the raw, cycle and step tables (`cellcore-schema`)
//! - the raw, cellpy and output unit systems and their conversion factors
//!   (`cellcore-units`)
//! - the frame contract and the additive summary pipeline (this crate)
//!
//! ```no_run
//! use cellcore::{CellCore, NormalizationMode, Settings};
//!
//! let settings = Settings::from_env()?;
//! let cell = CellCore::from_settings(&settings)?;
//! let factor = cell.conversion_factor(NormalizationMode::Gravimetric, Some(2.0))?;
//! # Ok::<(), cellcore::CoreError>(())
//! ```

mod cell;
mod config;
mod frame;
mod mode;
mod passes;
mod pipeline;

pub use cell::{CellCore, Data};
pub use config::{Settings, CONFIG_ENV_VAR};
pub use frame::{ColumnValues, Frame, MemoryFrame};
pub use mode::CyclingMode;
pub use passes::SpecificColumnsPass;
pub use pipeline::{check_additive, check_unchanged, PassContext, Pipeline, SummaryPass};

pub use cellcore_core::{CoreError, Result};
pub use cellcore_schema::{ColumnKey, ColumnRegistry, ColumnSpec, CycleCol, DType, RawCol, StepCol};
pub use cellcore_units::{ConversionRequest, DataScale, NormalizationMode, UnitConverter, UnitQuantity, UnitSystem};
