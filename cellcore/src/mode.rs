//! Cycling mode

use cellcore_core::{CoreError, Result};
use cellcore_schema::CycleCol;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a test is cycled. Decides which capacity comes first in a cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclingMode {
    /// Half cell, discharge before charge
    #[default]
    Anode,
    Cathode,
    FullCell,
}

impl CyclingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CyclingMode::Anode => "anode",
            CyclingMode::Cathode => "cathode",
            CyclingMode::FullCell => "full_cell",
        }
    }

    /// (first, second) capacity column of a cycle
    pub fn capacity_order(&self) -> (CycleCol, CycleCol) {
        match self {
            CyclingMode::Anode => (CycleCol::DischargeCapacity, CycleCol::ChargeCapacity),
            CyclingMode::Cathode | CyclingMode::FullCell => {
                (CycleCol::ChargeCapacity, CycleCol::DischargeCapacity)
            }
        }
    }
}

impl fmt::Display for CyclingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CyclingMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "anode" => Ok(CyclingMode::Anode),
            "cathode" => Ok(CyclingMode::Cathode),
            "full_cell" => Ok(CyclingMode::FullCell),
            _ => Err(CoreError::InvalidConfig(format!("unknown cycling mode: {}", s))),
        }
    }
}
