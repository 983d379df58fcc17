//! JSON façades over reader and session fields.
//!
//! Nothing here computes anything: fields are read from the collaborator,
//! renamed, and enum-like values are rendered as strings.

use crate::error::{MetadataError, Result};
use crate::sdk::{CubeReader, SegySession};
use crate::types::Corners;
use serde::Serialize;
use serde_json::Value;

/// Sample statistics as emitted in the header bundle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatisticsBundle {
    pub count: u64,
    pub sum: f64,
    pub sum_of_squares: f64,
    pub minimum: f64,
    pub maximum: f64,
}

/// Sample histogram as emitted in the header bundle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HistogramBundle {
    pub count: u64,
    pub minimum: f64,
    pub maximum: f64,
    pub bins: Vec<u64>,
}

/// Header fields of a ZGY cube under their published names
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HeaderBundle {
    pub guid: String,
    pub size: [u64; 3],
    pub brick_size: [u64; 3],
    pub data_type: String,
    pub data_range: [f64; 2],
    pub z_unit_dimension: String,
    pub z_unit_name: String,
    pub z_unit_factor: f64,
    #[serde(rename = "XYUnitDimension")]
    pub xy_unit_dimension: String,
    #[serde(rename = "XYUnitName")]
    pub xy_unit_name: String,
    #[serde(rename = "XYUnitFactor")]
    pub xy_unit_factor: f64,
    pub inline_start: f64,
    pub inline_increment: f64,
    pub crossline_start: f64,
    pub crossline_increment: f64,
    pub world_corners: Corners,
    pub index_corners: Corners,
    pub annotation_corners: Corners,
    pub amount_of_levels_of_detail: u32,
    pub bricks_per_levels_of_detail: Vec<[u64; 3]>,
    pub statistics: StatisticsBundle,
    pub histogram: HistogramBundle,
}

impl HeaderBundle {
    /// Read every header field from an open cube.
    ///
    /// The first failing field aborts the whole bundle.
    pub fn from_reader(reader: &dyn CubeReader) -> Result<Self> {
        let z_unit = reader.z_unit()?;
        let xy_unit = reader.xy_unit()?;
        let [inline_start, crossline_start] = reader.annotation_start()?;
        let [inline_increment, crossline_increment] = reader.annotation_increment()?;
        let statistics = reader.statistics()?;
        let histogram = reader.histogram()?;

        Ok(Self {
            guid: reader.guid()?.to_string(),
            size: reader.size()?,
            brick_size: reader.brick_size()?,
            data_type: reader.data_type()?.to_string(),
            data_range: reader.data_range()?.as_array(),
            z_unit_dimension: z_unit.dimension.to_string(),
            z_unit_name: z_unit.name,
            z_unit_factor: z_unit.factor,
            xy_unit_dimension: xy_unit.dimension.to_string(),
            xy_unit_name: xy_unit.name,
            xy_unit_factor: xy_unit.factor,
            inline_start,
            inline_increment,
            crossline_start,
            crossline_increment,
            world_corners: reader.world_corners()?,
            index_corners: reader.index_corners()?,
            annotation_corners: reader.annotation_corners()?,
            amount_of_levels_of_detail: reader.levels_of_detail()?,
            bricks_per_levels_of_detail: reader.brick_counts()?,
            statistics: StatisticsBundle {
                count: statistics.count,
                sum: statistics.sum,
                sum_of_squares: statistics.sum_of_squares,
                minimum: statistics.min,
                maximum: statistics.max,
            },
            histogram: HistogramBundle {
                count: histogram.count,
                minimum: histogram.min,
                maximum: histogram.max,
                bins: histogram.bins,
            },
        })
    }
}

/// `{"header": "..."}` payload used by the SEG-Y header endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderText {
    pub header: String,
}

impl HeaderText {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
        }
    }
}

/// Render a JSON value as header text: strings keep their contents, any other
/// value becomes its compact JSON text.
pub fn value_as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_session_json(kind: &str, text: &str) -> Result<Value> {
    serde_json::from_str(text)
        .map_err(|e| MetadataError::Serialization(format!("{} is not valid JSON: {}", kind, e)))
}

/// SEG-Y textual header: the `Textualheader` member of the ASCII header document
pub fn textual_header(session: &dyn SegySession) -> Result<HeaderText> {
    let document = parse_session_json("ASCII header", &session.ascii_headers_json()?)?;
    let header = document
        .get("Textualheader")
        .ok_or_else(|| MetadataError::MissingField("Textualheader".to_string()))?;
    Ok(HeaderText::new(value_as_text(header)))
}

/// SEG-Y extended textual headers, decoded once
pub fn extended_textual_headers(session: &dyn SegySession) -> Result<HeaderText> {
    let document = parse_session_json(
        "extended ASCII header",
        &session.extended_ascii_headers_json()?,
    )?;
    Ok(HeaderText::new(value_as_text(&document)))
}

pub fn binary_header(session: &dyn SegySession) -> Result<HeaderText> {
    Ok(HeaderText::new(session.binary_header_json()?))
}

pub fn raw_trace_headers(
    session: &dyn SegySession,
    start_trace: i64,
    traces_to_dump: i64,
) -> Result<HeaderText> {
    Ok(HeaderText::new(
        session.raw_trace_headers_json(start_trace, traces_to_dump)?,
    ))
}

pub fn scaled_trace_headers(
    session: &dyn SegySession,
    start_trace: i64,
    traces_to_dump: i64,
) -> Result<HeaderText> {
    Ok(HeaderText::new(
        session.scaled_trace_headers_json(start_trace, traces_to_dump)?,
    ))
}
