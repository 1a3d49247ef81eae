//! Dose and area units.
//!
//! Both unit sets are closed. Parsing is case-insensitive and ignores
//! surrounding whitespace; anything else is rejected rather than guessed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 1 hectare = 2.47105 acres.
pub const ACRES_PER_HECTARE: f64 = 2.47105;

/// Whether a dose is measured by mass or by volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Basis {
    Mass,
    Volume,
}

/// Per-acre dose units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoseUnit {
    #[serde(rename = "liter/acre")]
    LiterPerAcre,
    #[serde(rename = "ml/acre")]
    MlPerAcre,
    #[serde(rename = "kg/acre")]
    KgPerAcre,
    #[serde(rename = "grams/acre")]
    GramsPerAcre,
}

impl DoseUnit {
    pub const ALL: [DoseUnit; 4] = [
        DoseUnit::LiterPerAcre,
        DoseUnit::MlPerAcre,
        DoseUnit::KgPerAcre,
        DoseUnit::GramsPerAcre,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DoseUnit::LiterPerAcre => "liter/acre",
            DoseUnit::MlPerAcre => "ml/acre",
            DoseUnit::KgPerAcre => "kg/acre",
            DoseUnit::GramsPerAcre => "grams/acre",
        }
    }

    pub fn basis(&self) -> Basis {
        match self {
            DoseUnit::LiterPerAcre | DoseUnit::MlPerAcre => Basis::Volume,
            DoseUnit::KgPerAcre | DoseUnit::GramsPerAcre => Basis::Mass,
        }
    }

    /// The canonical unit for this unit's basis and the factor that takes a
    /// value in `self` to that canonical unit.
    pub fn canonical(&self) -> (DoseUnit, f64) {
        match self {
            DoseUnit::LiterPerAcre => (DoseUnit::MlPerAcre, 1000.0),
            DoseUnit::MlPerAcre => (DoseUnit::MlPerAcre, 1.0),
            DoseUnit::KgPerAcre => (DoseUnit::GramsPerAcre, 1000.0),
            DoseUnit::GramsPerAcre => (DoseUnit::GramsPerAcre, 1.0),
        }
    }
}

impl fmt::Display for DoseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown unit '{0}'")]
pub struct UnknownUnit(pub String);

impl FromStr for DoseUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DoseUnit::ALL
            .into_iter()
            .find(|unit| unit.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownUnit(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaUnit {
    Acres,
    Hectares,
}

impl AreaUnit {
    pub const ALL: [AreaUnit; 2] = [AreaUnit::Acres, AreaUnit::Hectares];

    pub fn as_str(&self) -> &'static str {
        match self {
            AreaUnit::Acres => "acres",
            AreaUnit::Hectares => "hectares",
        }
    }

    pub fn acres_per_unit(&self) -> f64 {
        match self {
            AreaUnit::Acres => 1.0,
            AreaUnit::Hectares => ACRES_PER_HECTARE,
        }
    }
}

impl fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AreaUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        AreaUnit::ALL
            .into_iter()
            .find(|unit| unit.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownUnit(s.to_string()))
    }
}

/// A per-acre dose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dose {
    pub value: f64,
    pub unit: DoseUnit,
}

impl Dose {
    pub fn new(value: f64, unit: DoseUnit) -> Self {
        Self { value, unit }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Area {
    pub value: f64,
    pub unit: AreaUnit,
}

impl Area {
    pub fn new(value: f64, unit: AreaUnit) -> Self {
        Self { value, unit }
    }

    pub fn in_acres(&self) -> f64 {
        self.value * self.unit.acres_per_unit()
    }
}
