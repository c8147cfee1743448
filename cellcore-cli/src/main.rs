//! cellcore command line
//!
//! Commands:
//! - schema: print a table's column registry as JSON
//! - units: print the effective raw/cellpy/output unit systems
//! - factor: conversion factor for a normalization mode
//! - nominal: nominal capacity as absolute Ah
//! - convert: convert a single value between two units
//!
//! Settings are read from the file named by `CELLCORE_CONFIG`; log output
//! goes to stderr and is controlled with `RUST_LOG`.

use cellcore::{CellCore, ColumnRegistry, CoreError, DataScale, NormalizationMode, Settings, UnitConverter};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cellcore")]
#[command(about = "Column schemas and unit conversion for battery-cycling data")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the column registry of a table
    Schema {
        #[arg(value_enum)]
        table: Table,
    },
    /// Print the effective unit systems
    Units,
    /// Conversion factor from raw to cellpy units (or cellpy to output units)
    Factor {
        /// gravimetric, areal, volumetric or absolute
        #[arg(long)]
        mode: String,

        /// Scaling value; overrides the mass/area/volume below
        #[arg(long)]
        value: Option<f64>,

        #[arg(long)]
        mass: Option<f64>,

        #[arg(long)]
        area: Option<f64>,

        #[arg(long)]
        volume: Option<f64>,

        /// Convert from cellpy units to output units instead
        #[arg(long)]
        output: bool,
    },
    /// Nominal capacity as absolute charge in Ah
    Nominal {
        /// Nominal capacity in cellpy nominal_capacity units
        #[arg(long)]
        value: f64,

        /// gravimetric, areal or absolute
        #[arg(long)]
        basis: String,

        /// Mass or area in cellpy units
        #[arg(long)]
        scaling: Option<f64>,

        /// Also apply the cellpy/raw charge unit ratio
        #[arg(long)]
        convert_charge: bool,
    },
    /// Convert a value between two units, e.g. 1500 mAh Ah
    Convert {
        value: f64,
        from: String,
        to: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Table {
    Raw,
    Cycle,
    Step,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("could not serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_registry(registry: &ColumnRegistry) -> Result<(), CliError> {
    println!("{}", registry.to_json()?);
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let settings = Settings::from_env()?;
    let mut cell = CellCore::from_settings(&settings)?;
    debug!(mode = %cell.cycle_mode(), "session ready");

    match args.command {
        Commands::Schema { table } => match table {
            Table::Raw => print_registry(cell.raw_cols())?,
            Table::Cycle => print_registry(cell.cycle_cols())?,
            Table::Step => print_registry(cell.step_cols())?,
        },
        Commands::Units => {
            let units = json!({
                "raw_units": cell.raw_units(),
                "cellpy_units": cell.cellpy_units(),
                "output_units": cell.output_units(),
            });
            println!("{}", serde_json::to_string_pretty(&units)?);
        }
        Commands::Factor { mode, value, mass, area, volume, output } => {
            let mode: NormalizationMode = mode.parse()?;
            let base = cell.data_scale();
            cell.set_data_scale(DataScale {
                mass: mass.or(base.mass),
                active_electrode_area: area.or(base.active_electrode_area),
                volume: volume.or(base.volume),
            });

            let factor = if output {
                cell.output_factor(mode, value)?
            } else {
                cell.conversion_factor(mode, value)?
            };
            println!("{}", factor);
        }
        Commands::Nominal { value, basis, scaling, convert_charge } => {
            let basis: NormalizationMode = basis.parse()?;
            let absolute = cell.nominal_capacity_as_absolute(value, basis, scaling, convert_charge)?;
            println!("{} Ah", absolute);
        }
        Commands::Convert { value, from, to } => {
            let converted = UnitConverter::default().convert_value(value, &from, &to)?;
            println!("{} {}", converted, to);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_factor() {
        let args = Args::try_parse_from(["cellcore", "factor", "--mode", "gravimetric", "--mass", "2.5"]).unwrap();
        match args.command {
            Commands::Factor { mode, mass, value, output, .. } => {
                assert_eq!(mode, "gravimetric");
                assert_eq!(mass, Some(2.5));
                assert_eq!(value, None);
                assert!(!output);
            }
            _ => panic!("expected factor"),
        }
    }

    #[test]
    fn test_parse_schema_table() {
        let args = Args::try_parse_from(["cellcore", "schema", "cycle"]).unwrap();
        assert!(matches!(args.command, Commands::Schema { table: Table::Cycle }));
        assert!(Args::try_parse_from(["cellcore", "schema", "summary"]).is_err());
    }

    #[test]
    fn test_nominal_requires_value() {
        assert!(Args::try_parse_from(["cellcore", "nominal", "--basis", "areal"]).is_err());
    }
}
