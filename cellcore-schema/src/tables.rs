//! Column schemas for the raw, cycle (summary) and step tables
//!
//! Each table is a closed enum. `spec()` is an exhaustive match, so adding a
//! variant without a spec does not compile. The registries are built from
//! the enums by `raw_columns`, `cycle_columns` and `step_columns`.

use crate::column::{ColumnSpec, DType};
use crate::registry::ColumnRegistry;
use cellcore_core::Result;

pub const RAW_SCHEMA_VERSION: &str = "1.0.0";
pub const CYCLE_SCHEMA_VERSION: &str = "1.0.0";
pub const STEP_SCHEMA_VERSION: &str = "1.0.0";

/// Postfixes of normalized summary columns
pub const SUMMARY_POSTFIXES: [&str; 4] = ["gravimetric", "areal", "volumetric", "absolute"];

/// A column of one of the fixed tables
pub trait TableColumn: Copy + 'static {
    const ALL: &'static [Self];

    fn key(&self) -> &'static str;

    fn spec(&self) -> ColumnSpec;
}

fn float(name: &str, unit: &str) -> ColumnSpec {
    ColumnSpec::new(name).with_unit(unit).with_dtype(DType::Float64)
}

fn unitless(name: &str, dtype: DType) -> ColumnSpec {
    ColumnSpec::new(name).with_dtype(dtype)
}

/// Build a registry from every variant of `C`, in declaration order
pub fn build_registry<C: TableColumn>(version: &str, postfixes: &[&str]) -> Result<ColumnRegistry> {
    C::ALL.iter().try_fold(
        ColumnRegistry::with_version(version).with_postfixes(postfixes.iter().copied()),
        |registry, column| registry.define_spec(column.key(), column.spec()),
    )
}

pub fn raw_columns() -> Result<ColumnRegistry> {
    build_registry::<RawCol>(RAW_SCHEMA_VERSION, &[])
}

pub fn cycle_columns() -> Result<ColumnRegistry> {
    build_registry::<CycleCol>(CYCLE_SCHEMA_VERSION, &SUMMARY_POSTFIXES)
}

pub fn step_columns() -> Result<ColumnRegistry> {
    build_registry::<StepCol>(STEP_SCHEMA_VERSION, &[])
}

/// Raw measurement table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawCol {
    AciPhaseAngle,
    RefAciPhaseAngle,
    AcImpedance,
    RefAcImpedance,
    ChargeCapacity,
    ChargeEnergy,
    Current,
    CycleIndex,
    DataPoint,
    DateTime,
    DischargeCapacity,
    DischargeEnergy,
    InternalResistance,
    Power,
    IsFcData,
    StepIndex,
    SubStepIndex,
    StepTime,
    SubStepTime,
    TestId,
    TestTime,
    Voltage,
    RefVoltage,
    DvDt,
    Frequency,
    Amplitude,
    ChannelId,
    DataFlag,
    TestName,
}

impl TableColumn for RawCol {
    const ALL: &'static [Self] = &[
        RawCol::AciPhaseAngle,
        RawCol::RefAciPhaseAngle,
        RawCol::AcImpedance,
        RawCol::RefAcImpedance,
        RawCol::ChargeCapacity,
        RawCol::ChargeEnergy,
        RawCol::Current,
        RawCol::CycleIndex,
        RawCol::DataPoint,
        RawCol::DateTime,
        RawCol::DischargeCapacity,
        RawCol::DischargeEnergy,
        RawCol::InternalResistance,
        RawCol::Power,
        RawCol::IsFcData,
        RawCol::StepIndex,
        RawCol::SubStepIndex,
        RawCol::StepTime,
        RawCol::SubStepTime,
        RawCol::TestId,
        RawCol::TestTime,
        RawCol::Voltage,
        RawCol::RefVoltage,
        RawCol::DvDt,
        RawCol::Frequency,
        RawCol::Amplitude,
        RawCol::ChannelId,
        RawCol::DataFlag,
        RawCol::TestName,
    ];

    fn key(&self) -> &'static str {
        match self {
            RawCol::AciPhaseAngle => "AciPhaseAngle",
            RawCol::RefAciPhaseAngle => "RefAciPhaseAngle",
            RawCol::AcImpedance => "AcImpedance",
            RawCol::RefAcImpedance => "RefAcImpedance",
            RawCol::ChargeCapacity => "ChargeCapacity",
            RawCol::ChargeEnergy => "ChargeEnergy",
            RawCol::Current => "Current",
            RawCol::CycleIndex => "CycleIndex",
            RawCol::DataPoint => "DataPoint",
            RawCol::DateTime => "DateTime",
            RawCol::DischargeCapacity => "DischargeCapacity",
            RawCol::DischargeEnergy => "DischargeEnergy",
            RawCol::InternalResistance => "InternalResistance",
            RawCol::Power => "Power",
            RawCol::IsFcData => "IsFcData",
            RawCol::StepIndex => "StepIndex",
            RawCol::SubStepIndex => "SubStepIndex",
            RawCol::StepTime => "StepTime",
            RawCol::SubStepTime => "SubStepTime",
            RawCol::TestId => "TestId",
            RawCol::TestTime => "TestTime",
            RawCol::Voltage => "Voltage",
            RawCol::RefVoltage => "RefVoltage",
            RawCol::DvDt => "DvDt",
            RawCol::Frequency => "Frequency",
            RawCol::Amplitude => "Amplitude",
            RawCol::ChannelId => "ChannelId",
            RawCol::DataFlag => "DataFlag",
            RawCol::TestName => "TestName",
        }
    }

    fn spec(&self) -> ColumnSpec {
        match self {
            RawCol::AciPhaseAngle => float("aci_phase_angle", "deg"),
            RawCol::RefAciPhaseAngle => float("ref_aci_phase_angle", "deg"),
            RawCol::AcImpedance => float("ac_impedance", "ohm"),
            RawCol::RefAcImpedance => float("ref_ac_impedance", "ohm"),
            RawCol::ChargeCapacity => float("charge_capacity", "mAh"),
            RawCol::ChargeEnergy => float("charge_energy", "Wh"),
            RawCol::Current => float("current", "A"),
            RawCol::CycleIndex => unitless("cycle_index", DType::Int64),
            RawCol::DataPoint => unitless("data_point", DType::Int64),
            RawCol::DateTime => unitless("date_time", DType::Datetime),
            RawCol::DischargeCapacity => float("discharge_capacity", "mAh"),
            RawCol::DischargeEnergy => float("discharge_energy", "Wh"),
            RawCol::InternalResistance => float("internal_resistance", "ohm"),
            RawCol::Power => float("power", "W"),
            RawCol::IsFcData => unitless("is_fc_data", DType::Boolean),
            RawCol::StepIndex => unitless("step_index", DType::Int64),
            RawCol::SubStepIndex => unitless("sub_step_index", DType::Int64),
            RawCol::StepTime => float("step_time", "sec"),
            RawCol::SubStepTime => float("sub_step_time", "sec"),
            RawCol::TestId => unitless("test_id", DType::Int64),
            RawCol::TestTime => float("test_time", "sec"),
            RawCol::Voltage => float("voltage", "V"),
            RawCol::RefVoltage => float("reference_voltage", "V"),
            RawCol::DvDt => float("dv_dt", "V/sec"),
            RawCol::Frequency => float("frequency", "hz"),
            RawCol::Amplitude => unitless("amplitude", DType::Float64),
            RawCol::ChannelId => unitless("channel_id", DType::Int64),
            RawCol::DataFlag => unitless("data_flag", DType::Int64),
            RawCol::TestName => unitless("test_name", DType::Utf8),
        }
    }
}

/// Cycle summary table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleCol {
    CycleIndex,
    DataPoint,
    TestTime,
    DateTime,
    TestName,
    DataFlag,
    ChannelId,
    CoulombicEfficiency,
    CumulatedCoulombicEfficiency,
    DischargeCapacity,
    ChargeCapacity,
    CumulatedChargeCapacity,
    CumulatedDischargeCapacity,
    CoulombicDifference,
    CumulatedCoulombicDifference,
    DischargeCapacityLoss,
    ChargeCapacityLoss,
    CumulatedDischargeCapacityLoss,
    CumulatedChargeCapacityLoss,
    NormalizedChargeCapacity,
    NormalizedDischargeCapacity,
    ShiftedChargeCapacity,
    ShiftedDischargeCapacity,
    IrDischarge,
    IrCharge,
    OcvFirstMin,
    OcvSecondMin,
    OcvFirstMax,
    OcvSecondMax,
    EndVoltageDischarge,
    EndVoltageCharge,
    CumulatedRicDisconnect,
    CumulatedRicSei,
    CumulatedRic,
    NormalizedCycleIndex,
    LowLevel,
    HighLevel,
    TemperatureLast,
    TemperatureMean,
    ChargeCRate,
    DischargeCRate,
}

impl CycleCol {
    /// Columns that may be normalized per mass, area or volume
    pub const SPECIFIC: [CycleCol; 12] = [
        CycleCol::DischargeCapacity,
        CycleCol::ChargeCapacity,
        CycleCol::CumulatedChargeCapacity,
        CycleCol::CumulatedDischargeCapacity,
        CycleCol::CoulombicDifference,
        CycleCol::CumulatedCoulombicDifference,
        CycleCol::DischargeCapacityLoss,
        CycleCol::ChargeCapacityLoss,
        CycleCol::CumulatedDischargeCapacityLoss,
        CycleCol::CumulatedChargeCapacityLoss,
        CycleCol::ShiftedChargeCapacity,
        CycleCol::ShiftedDischargeCapacity,
    ];

    pub fn is_specific(&self) -> bool {
        Self::SPECIFIC.contains(self)
    }
}

impl TableColumn for CycleCol {
    const ALL: &'static [Self] = &[
        CycleCol::CycleIndex,
        CycleCol::DataPoint,
        CycleCol::TestTime,
        CycleCol::DateTime,
        CycleCol::TestName,
        CycleCol::DataFlag,
        CycleCol::ChannelId,
        CycleCol::CoulombicEfficiency,
        CycleCol::CumulatedCoulombicEfficiency,
        CycleCol::DischargeCapacity,
        CycleCol::ChargeCapacity,
        CycleCol::CumulatedChargeCapacity,
        CycleCol::CumulatedDischargeCapacity,
        CycleCol::CoulombicDifference,
        CycleCol::CumulatedCoulombicDifference,
        CycleCol::DischargeCapacityLoss,
        CycleCol::ChargeCapacityLoss,
        CycleCol::CumulatedDischargeCapacityLoss,
        CycleCol::CumulatedChargeCapacityLoss,
        CycleCol::NormalizedChargeCapacity,
        CycleCol::NormalizedDischargeCapacity,
        CycleCol::ShiftedChargeCapacity,
        CycleCol::ShiftedDischargeCapacity,
        CycleCol::IrDischarge,
        CycleCol::IrCharge,
        CycleCol::OcvFirstMin,
        CycleCol::OcvSecondMin,
        CycleCol::OcvFirstMax,
        CycleCol::OcvSecondMax,
        CycleCol::EndVoltageDischarge,
        CycleCol::EndVoltageCharge,
        CycleCol::CumulatedRicDisconnect,
        CycleCol::CumulatedRicSei,
        CycleCol::CumulatedRic,
        CycleCol::NormalizedCycleIndex,
        CycleCol::LowLevel,
        CycleCol::HighLevel,
        CycleCol::TemperatureLast,
        CycleCol::TemperatureMean,
        CycleCol::ChargeCRate,
        CycleCol::DischargeCRate,
    ];

    fn key(&self) -> &'static str {
        match self {
            CycleCol::CycleIndex => "CycleIndex",
            CycleCol::DataPoint => "DataPoint",
            CycleCol::TestTime => "TestTime",
            CycleCol::DateTime => "DateTime",
            CycleCol::TestName => "TestName",
            CycleCol::DataFlag => "DataFlag",
            CycleCol::ChannelId => "ChannelId",
            CycleCol::CoulombicEfficiency => "CoulombicEfficiency",
            CycleCol::CumulatedCoulombicEfficiency => "CumulatedCoulombicEfficiency",
            CycleCol::DischargeCapacity => "DischargeCapacity",
            CycleCol::ChargeCapacity => "ChargeCapacity",
            CycleCol::CumulatedChargeCapacity => "CumulatedChargeCapacity",
            CycleCol::CumulatedDischargeCapacity => "CumulatedDischargeCapacity",
            CycleCol::CoulombicDifference => "CoulombicDifference",
            CycleCol::CumulatedCoulombicDifference => "CumulatedCoulombicDifference",
            CycleCol::DischargeCapacityLoss => "DischargeCapacityLoss",
            CycleCol::ChargeCapacityLoss => "ChargeCapacityLoss",
            CycleCol::CumulatedDischargeCapacityLoss => "CumulatedDischargeCapacityLoss",
            CycleCol::CumulatedChargeCapacityLoss => "CumulatedChargeCapacityLoss",
            CycleCol::NormalizedChargeCapacity => "NormalizedChargeCapacity",
            CycleCol::NormalizedDischargeCapacity => "NormalizedDischargeCapacity",
            CycleCol::ShiftedChargeCapacity => "ShiftedChargeCapacity",
            CycleCol::ShiftedDischargeCapacity => "ShiftedDischargeCapacity",
            CycleCol::IrDischarge => "IrDischarge",
            CycleCol::IrCharge => "IrCharge",
            CycleCol::OcvFirstMin => "OcvFirstMin",
            CycleCol::OcvSecondMin => "OcvSecondMin",
            CycleCol::OcvFirstMax => "OcvFirstMax",
            CycleCol::OcvSecondMax => "OcvSecondMax",
            CycleCol::EndVoltageDischarge => "EndVoltageDischarge",
            CycleCol::EndVoltageCharge => "EndVoltageCharge",
            CycleCol::CumulatedRicDisconnect => "CumulatedRicDisconnect",
            CycleCol::CumulatedRicSei => "CumulatedRicSei",
            CycleCol::CumulatedRic => "CumulatedRic",
            CycleCol::NormalizedCycleIndex => "NormalizedCycleIndex",
            CycleCol::LowLevel => "LowLevel",
            CycleCol::HighLevel => "HighLevel",
            CycleCol::TemperatureLast => "TemperatureLast",
            CycleCol::TemperatureMean => "TemperatureMean",
            CycleCol::ChargeCRate => "ChargeCRate",
            CycleCol::DischargeCRate => "DischargeCRate",
        }
    }

    fn spec(&self) -> ColumnSpec {
        match self {
            CycleCol::CycleIndex => unitless("cycle_index", DType::Int64),
            CycleCol::DataPoint => unitless("data_point", DType::Int64),
            CycleCol::TestTime => float("test_time", "sec"),
            CycleCol::DateTime => unitless("date_time", DType::Datetime),
            CycleCol::TestName => unitless("test_name", DType::Utf8),
            CycleCol::DataFlag => unitless("data_flag", DType::Int64),
            CycleCol::ChannelId => unitless("channel_id", DType::Int64),
            CycleCol::CoulombicEfficiency => float("coulombic_efficiency", "percent"),
            CycleCol::CumulatedCoulombicEfficiency => float("cumulated_coulombic_efficiency", "percent"),
            CycleCol::DischargeCapacity => float("discharge_capacity", "mAh"),
            CycleCol::ChargeCapacity => float("charge_capacity", "mAh"),
            CycleCol::CumulatedChargeCapacity => float("cumulated_charge_capacity", "mAh"),
            CycleCol::CumulatedDischargeCapacity => float("cumulated_discharge_capacity", "mAh"),
            CycleCol::CoulombicDifference => float("coulombic_difference", "mAh"),
            CycleCol::CumulatedCoulombicDifference => float("cumulated_coulombic_difference", "mAh"),
            CycleCol::DischargeCapacityLoss => float("discharge_capacity_loss", "mAh"),
            CycleCol::ChargeCapacityLoss => float("charge_capacity_loss", "mAh"),
            CycleCol::CumulatedDischargeCapacityLoss => float("cumulated_discharge_capacity_loss", "mAh"),
            CycleCol::CumulatedChargeCapacityLoss => float("cumulated_charge_capacity_loss", "mAh"),
            CycleCol::NormalizedChargeCapacity => unitless("normalized_charge_capacity", DType::Float64),
            CycleCol::NormalizedDischargeCapacity => unitless("normalized_discharge_capacity", DType::Float64),
            CycleCol::ShiftedChargeCapacity => float("shifted_charge_capacity", "mAh"),
            CycleCol::ShiftedDischargeCapacity => float("shifted_discharge_capacity", "mAh"),
            CycleCol::IrDischarge => float("ir_discharge", "ohm"),
            CycleCol::IrCharge => float("ir_charge", "ohm"),
            CycleCol::OcvFirstMin => float("ocv_first_min", "V"),
            CycleCol::OcvSecondMin => float("ocv_second_min", "V"),
            CycleCol::OcvFirstMax => float("ocv_first_max", "V"),
            CycleCol::OcvSecondMax => float("ocv_second_max", "V"),
            CycleCol::EndVoltageDischarge => float("end_voltage_discharge", "V"),
            CycleCol::EndVoltageCharge => float("end_voltage_charge", "V"),
            CycleCol::CumulatedRicDisconnect => unitless("cumulated_ric_disconnect", DType::Float64),
            CycleCol::CumulatedRicSei => unitless("cumulated_ric_sei", DType::Float64),
            CycleCol::CumulatedRic => unitless("cumulated_ric", DType::Float64),
            CycleCol::NormalizedCycleIndex => unitless("normalized_cycle_index", DType::Float64),
            CycleCol::LowLevel => unitless("low_level", DType::Float64),
            CycleCol::HighLevel => unitless("high_level", DType::Float64),
            CycleCol::TemperatureLast => float("temperature_last", "C"),
            CycleCol::TemperatureMean => float("temperature_mean", "C"),
            CycleCol::ChargeCRate => float("charge_c_rate", "1/h"),
            CycleCol::DischargeCRate => float("discharge_c_rate", "1/h"),
        }
    }
}

/// Step statistics table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepCol {
    Test,
    Ustep,
    Cycle,
    Step,
    TestTime,
    StepTime,
    SubStep,
    Type,
    SubType,
    Info,
    Voltage,
    Current,
    Charge,
    Discharge,
    Point,
    InternalResistance,
    InternalResistanceChange,
    RateAvr,
}

impl TableColumn for StepCol {
    const ALL: &'static [Self] = &[
        StepCol::Test,
        StepCol::Ustep,
        StepCol::Cycle,
        StepCol::Step,
        StepCol::TestTime,
        StepCol::StepTime,
        StepCol::SubStep,
        StepCol::Type,
        StepCol::SubType,
        StepCol::Info,
        StepCol::Voltage,
        StepCol::Current,
        StepCol::Charge,
        StepCol::Discharge,
        StepCol::Point,
        StepCol::InternalResistance,
        StepCol::InternalResistanceChange,
        StepCol::RateAvr,
    ];

    fn key(&self) -> &'static str {
        match self {
            StepCol::Test => "Test",
            StepCol::Ustep => "Ustep",
            StepCol::Cycle => "Cycle",
            StepCol::Step => "Step",
            StepCol::TestTime => "TestTime",
            StepCol::StepTime => "StepTime",
            StepCol::SubStep => "SubStep",
            StepCol::Type => "Type",
            StepCol::SubType => "SubType",
            StepCol::Info => "Info",
            StepCol::Voltage => "Voltage",
            StepCol::Current => "Current",
            StepCol::Charge => "Charge",
            StepCol::Discharge => "Discharge",
            StepCol::Point => "Point",
            StepCol::InternalResistance => "InternalResistance",
            StepCol::InternalResistanceChange => "InternalResistanceChange",
            StepCol::RateAvr => "RateAvr",
        }
    }

    fn spec(&self) -> ColumnSpec {
        match self {
            StepCol::Test => unitless("test", DType::Int64),
            StepCol::Ustep => unitless("ustep", DType::Int64),
            StepCol::Cycle => unitless("cycle", DType::Int64),
            StepCol::Step => unitless("step", DType::Int64),
            StepCol::TestTime => float("test_time", "sec"),
            StepCol::StepTime => float("step_time", "sec"),
            StepCol::SubStep => unitless("sub_step", DType::Int64),
            StepCol::Type => unitless("type", DType::Utf8),
            StepCol::SubType => unitless("sub_type", DType::Utf8),
            StepCol::Info => unitless("info", DType::Utf8),
            StepCol::Voltage => float("voltage", "V"),
            StepCol::Current => float("current", "A"),
            StepCol::Charge => float("charge", "mAh"),
            StepCol::Discharge => float("discharge", "mAh"),
            StepCol::Point => unitless("point", DType::Int64),
            StepCol::InternalResistance => float("ir", "ohm"),
            StepCol::InternalResistanceChange => float("ir_pct_change", "percent"),
            StepCol::RateAvr => unitless("rate_avr", DType::Float64),
        }
    }
}
