//! cellcore schema - column registries
//!
//! Every logical measurement gets one canonical column name, an advisory
//! unit and a storage type, reachable by key (`spec_of`) and by name
//! (`key_of`). The fixed raw/cycle/step tables live in [`tables`].

mod column;
mod export;
mod registry;
pub mod tables;

pub use column::{ColumnKey, ColumnSpec, DType};
pub use export::ColumnExport;
pub use registry::{ColumnRegistry, ResolvedColumn, DEFAULT_VERSION};
pub use tables::{cycle_columns, raw_columns, step_columns, CycleCol, RawCol, StepCol, TableColumn};
