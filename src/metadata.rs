//! Manifest documents describing datasets in the local seismic store

use crate::error::{MetadataError, Result};
use crate::layout::{BrickSize, CubeLayout};
use crate::types::{
    Corners, SampleDataType, SampleHistogram, SampleStatistics, UnitInfo, ValueRange,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Header of a ZGY cube as stored in the local seismic store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZgyManifest {
    pub guid: Uuid,

    /// Samples per axis (inline, crossline, z)
    pub size: [u64; 3],

    #[serde(default)]
    pub brick_size: BrickSize,

    pub data_type: SampleDataType,

    pub data_range: ValueRange,

    #[serde(default)]
    pub z_unit: UnitInfo,

    #[serde(default)]
    pub xy_unit: UnitInfo,

    /// First inline and crossline annotation
    pub annotation_start: [f64; 2],

    /// Inline and crossline annotation increment
    pub annotation_increment: [f64; 2],

    /// World (easting, northing) corners
    pub world_corners: Corners,

    /// Index (i, j) corners
    pub index_corners: Corners,

    /// Annotation (inline, crossline) corners
    pub annotation_corners: Corners,

    #[serde(default)]
    pub statistics: SampleStatistics,

    #[serde(default)]
    pub histogram: SampleHistogram,
}

impl ZgyManifest {
    /// Bricking of the full-resolution cube
    pub fn layout(&self) -> Result<CubeLayout> {
        CubeLayout::new(self.size, self.brick_size)
    }

    /// Check the manifest describes a usable cube
    pub fn validate(&self) -> Result<()> {
        self.layout()?;
        if !self.data_range.is_valid() {
            return Err(MetadataError::InvalidInput(format!(
                "invalid data range [{}, {}]",
                self.data_range.min, self.data_range.max
            )));
        }
        Ok(())
    }
}

/// SEG-Y file description as stored in the local seismic store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegyManifest {
    /// SEG-Y revision
    pub revision: i64,

    #[serde(default = "default_is_3d")]
    pub is_3d: bool,

    pub trace_header_field_count: i64,

    /// Textual header lines (40 card images of 80 characters)
    #[serde(default)]
    pub textual_header: Vec<String>,

    #[serde(default)]
    pub extended_textual_headers: Vec<String>,

    /// Binary header fields
    #[serde(default)]
    pub binary_header: BTreeMap<String, i64>,

    /// Trace header records as read from the file
    #[serde(default)]
    pub raw_trace_headers: Vec<BTreeMap<String, i64>>,

    /// Trace header records with coordinate and elevation scalars applied
    #[serde(default)]
    pub scaled_trace_headers: Vec<BTreeMap<String, f64>>,
}

fn default_is_3d() -> bool {
    true
}

impl SegyManifest {
    pub fn new(revision: i64, trace_header_field_count: i64) -> Self {
        Self {
            revision,
            is_3d: true,
            trace_header_field_count,
            textual_header: Vec::new(),
            extended_textual_headers: Vec::new(),
            binary_header: BTreeMap::new(),
            raw_trace_headers: Vec::new(),
            scaled_trace_headers: Vec::new(),
        }
    }
}

/// Select `count` records starting at `start`.
///
/// Out-of-range selections report `HTTP 416` so the caller sees a range error.
pub fn trace_range<T>(records: &[T], start: i64, count: i64) -> Result<&[T]> {
    let total = records.len();
    let in_range = start >= 0
        && count >= 0
        && (start as u64).saturating_add(count as u64) <= total as u64;
    if !in_range {
        return Err(MetadataError::Sdk(format!(
            "HTTP 416 trace range start={} count={} is outside 0..{}",
            start, count, total
        )));
    }
    let start = start as usize;
    Ok(&records[start..start + count as usize])
}
