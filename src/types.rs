//! Core data types shared by readers, sessions and the JSON façades

use serde::{Deserialize, Serialize};
use std::fmt;

/// Four corners of a cube, ordered origin, end of inline, end of crossline,
/// opposite corner.
pub type Corners = [[f64; 2]; 4];

/// Sample value types stored in a ZGY cube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleDataType {
    /// Signed 8-bit integer
    Int8,
    /// Signed 16-bit integer
    Int16,
    /// 32-bit floating point
    Float,
}

impl fmt::Display for SampleDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SampleDataType::Int8 => "int8",
            SampleDataType::Int16 => "int16",
            SampleDataType::Float => "float",
        };
        f.write_str(name)
    }
}

/// Physical dimension of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitDimension {
    #[default]
    Unknown,
    Time,
    Length,
    ArcAngle,
}

impl fmt::Display for UnitDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitDimension::Unknown => "unknown",
            UnitDimension::Time => "time",
            UnitDimension::Length => "length",
            UnitDimension::ArcAngle => "arcangle",
        };
        f.write_str(name)
    }
}

/// Unit of measurement attached to an axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitInfo {
    pub dimension: UnitDimension,
    /// Unit name (e.g., "ms", "m", "ft")
    pub name: String,
    /// Conversion factor to SI
    pub factor: f64,
}

impl UnitInfo {
    pub fn new(dimension: UnitDimension, name: impl Into<String>, factor: f64) -> Self {
        Self {
            dimension,
            name: name.into(),
            factor,
        }
    }
}

impl Default for UnitInfo {
    fn default() -> Self {
        Self::new(UnitDimension::Unknown, "", 1.0)
    }
}

/// Value range for a cube
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    pub fn as_array(&self) -> [f64; 2] {
        [self.min, self.max]
    }
}

/// Sample statistics stored with a cube
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SampleStatistics {
    pub count: u64,
    pub sum: f64,
    pub sum_of_squares: f64,
    pub min: f64,
    pub max: f64,
}

/// Sample histogram stored with a cube
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SampleHistogram {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub bins: Vec<u64>,
}
