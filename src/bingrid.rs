//! Bin-grid (P6 survey grid) derivation from the four corners of a cube.
//!
//! The corners must be supplied in survey order: origin (`p00`), end of the
//! inline axis (`p10`), end of the crossline axis (`p01`) and the opposite
//! corner (`p11`). Every attribute is a pure function of the corners and the
//! two axis lines, evaluated in the fixed order of [`ATTRIBUTES`].

use crate::error::{MetadataError, Result};
use crate::geometry::{Line, Point};
use crate::sdk::CubeReader;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// EPSG transformation code for a right-handed (skewed) bin grid
pub const TRANSFORMATION_RIGHT_HANDED: i64 = 9666;

/// EPSG transformation code for a left-handed bin grid
pub const TRANSFORMATION_LEFT_HANDED: i64 = 1049;

/// World coordinate in the closed bin-grid outline
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LocalCoordinate {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
}

/// Value of a single bin-grid attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Integer(i64),
    Float(f64),
    Coordinates(Vec<LocalCoordinate>),
}

impl AttributeValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Integer(v) => Some(*v as f64),
            AttributeValue::Float(v) => Some(*v),
            AttributeValue::Coordinates(_) => None,
        }
    }
}

/// Inputs of a bin-grid calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinGrid {
    pub p00: Point,
    pub p10: Point,
    pub p01: Point,
    pub p11: Point,
    pub inline: Line,
    pub xline: Line,
}

type AttributeFn = fn(&BinGrid) -> Result<AttributeValue>;

/// Attribute names paired with their formulas, in output order
pub const ATTRIBUTES: &[(&str, AttributeFn)] = &[
    ("OriginI", origin_i),
    ("OriginJ", origin_j),
    ("OriginEasting", origin_easting),
    ("OriginNorthing", origin_northing),
    ("NodeIncrementI", node_increment_i),
    ("NodeIncrementJ", node_increment_j),
    ("WidthI", width_i),
    ("WidthJ", width_j),
    ("TransformationMethod", transformation_method),
    ("BearingOfJaxis", bearing_of_j_axis),
    ("BinGridLocalCoordinates", local_coordinates),
];

fn origin_i(g: &BinGrid) -> Result<AttributeValue> {
    Ok(AttributeValue::Float(g.p00.inline))
}

fn origin_j(g: &BinGrid) -> Result<AttributeValue> {
    Ok(AttributeValue::Float(g.p00.xline))
}

fn origin_easting(g: &BinGrid) -> Result<AttributeValue> {
    Ok(AttributeValue::Float(g.p00.easting))
}

fn origin_northing(g: &BinGrid) -> Result<AttributeValue> {
    Ok(AttributeValue::Float(g.p00.northing))
}

fn node_increment_i(g: &BinGrid) -> Result<AttributeValue> {
    Ok(AttributeValue::Float(g.inline.increment))
}

fn node_increment_j(g: &BinGrid) -> Result<AttributeValue> {
    Ok(AttributeValue::Float(g.xline.increment))
}

fn width_i(g: &BinGrid) -> Result<AttributeValue> {
    g.width_i().map(AttributeValue::Integer)
}

fn width_j(g: &BinGrid) -> Result<AttributeValue> {
    g.width_j().map(AttributeValue::Integer)
}

fn transformation_method(g: &BinGrid) -> Result<AttributeValue> {
    g.transformation_method().map(AttributeValue::Integer)
}

fn bearing_of_j_axis(g: &BinGrid) -> Result<AttributeValue> {
    g.bearing_value()
}

fn local_coordinates(g: &BinGrid) -> Result<AttributeValue> {
    Ok(AttributeValue::Coordinates(g.local_coordinates()))
}

impl BinGrid {
    pub fn new(p00: Point, p10: Point, p01: Point, p11: Point, inline: Line, xline: Line) -> Self {
        Self {
            p00,
            p10,
            p01,
            p11,
            inline,
            xline,
        }
    }

    /// Corners and axis lines of an open cube.
    ///
    /// Line counts come from the cube size; starts and increments from the
    /// annotation start and increment.
    pub fn from_reader(reader: &dyn CubeReader) -> Result<Self> {
        let index = reader.index_corners()?;
        let annotation = reader.annotation_corners()?;
        let world = reader.world_corners()?;
        let [p00, p10, p01, p11]: [Point; 4] =
            std::array::from_fn(|n| Point::from_corners(n, &index, &annotation, &world));

        let size = reader.size()?;
        let start = reader.annotation_start()?;
        let increment = reader.annotation_increment()?;
        let inline = Line::new(start[0], increment[0], size[0]);
        let xline = Line::new(start[1], increment[1], size[1]);

        Ok(Self::new(p00, p10, p01, p11, inline, xline))
    }

    /// Evaluate every attribute in order
    pub fn compute(&self) -> Result<BinGridAttributes> {
        let mut entries = Vec::with_capacity(ATTRIBUTES.len());
        for (name, formula) in ATTRIBUTES {
            entries.push((*name, formula(self)?));
        }
        Ok(BinGridAttributes { entries })
    }

    /// Bin width along the inline axis
    pub fn width_i(&self) -> Result<i64> {
        bin_width(&self.p00, &self.p10, &self.inline, "inline")
    }

    /// Bin width along the crossline axis
    pub fn width_j(&self) -> Result<i64> {
        bin_width(&self.p00, &self.p01, &self.xline, "crossline")
    }

    /// Grid handedness as an EPSG transformation code
    pub fn transformation_method(&self) -> Result<i64> {
        let a1 = self.p10.world() - self.p00.world();
        let b1 = self.p01.world() - self.p00.world();
        let a2 = self.p11.world() - self.p01.world();
        let b2 = self.p11.world() - self.p10.world();

        let handedness = a1.dot(&b2) - a2.dot(&b1);
        if !handedness.is_finite() {
            return Err(MetadataError::Computation(
                "grid handedness is not finite".to_string(),
            ));
        }

        Ok(if handedness > 0.0 {
            TRANSFORMATION_RIGHT_HANDED
        } else {
            TRANSFORMATION_LEFT_HANDED
        })
    }

    /// Bearing of the crossline (J) axis, in degrees clockwise from north.
    ///
    /// Eastward bearings keep two decimals; westward bearings are rounded to
    /// whole degrees.
    pub fn bearing_of_j_axis(&self) -> Result<f64> {
        self.bearing_value()?
            .as_f64()
            .ok_or_else(|| MetadataError::Computation("bearing is not a scalar".to_string()))
    }

    fn bearing_value(&self) -> Result<AttributeValue> {
        let b = self.p01.world() - self.p00.world();
        let length = b.magnitude();
        if length == 0.0 || !length.is_finite() {
            return Err(MetadataError::Computation(format!(
                "crossline axis vector has invalid length {}",
                length
            )));
        }

        let degrees = (b.y / length).clamp(-1.0, 1.0).acos().to_degrees();
        if b.x >= 0.0 {
            Ok(AttributeValue::Float((degrees * 100.0).round() / 100.0))
        } else {
            Ok(AttributeValue::Integer((360.0 - degrees).round() as i64))
        }
    }

    /// Closed outline p00 → p01 → p11 → p10 → p00 in world coordinates
    pub fn local_coordinates(&self) -> Vec<LocalCoordinate> {
        [self.p00, self.p01, self.p11, self.p10, self.p00]
            .iter()
            .map(|p| LocalCoordinate {
                x: p.easting,
                y: p.northing,
            })
            .collect()
    }
}

fn bin_width(origin: &Point, end: &Point, line: &Line, axis: &str) -> Result<i64> {
    let segments = line.segments().ok_or_else(|| {
        MetadataError::Computation(format!(
            "{} axis needs at least 2 samples, got {}",
            axis, line.count
        ))
    })?;

    let width = ((end.world() - origin.world()).magnitude() / segments as f64).ceil();
    if !width.is_finite() {
        return Err(MetadataError::Computation(format!(
            "{} bin width is not finite",
            axis
        )));
    }
    Ok(width as i64)
}

/// Ordered result of a bin-grid calculation
#[derive(Debug, Clone, PartialEq)]
pub struct BinGridAttributes {
    entries: Vec<(&'static str, AttributeValue)>,
}

impl BinGridAttributes {
    /// Attributes in output order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &AttributeValue)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }
}

impl Serialize for BinGridAttributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64) -> Point {
        Point::new(x, y, x, y, x, y)
    }

    fn rectangle_grid() -> BinGrid {
        BinGrid::new(
            point(0.0, 0.0),
            point(100.0, 0.0),
            point(0.0, 50.0),
            point(100.0, 50.0),
            Line::new(0.0, 1.0, 11),
            Line::new(0.0, 1.0, 6),
        )
    }

    #[test]
    fn test_widths_round_up() {
        let grid = rectangle_grid();
        assert_eq!(grid.width_i().unwrap(), 10);
        assert_eq!(grid.width_j().unwrap(), 10);

        let grid = BinGrid::new(
            point(0.0, 0.0),
            point(999.0, 0.0),
            point(0.0, 1000.0),
            point(999.0, 1000.0),
            Line::new(0.0, 1.0, 10),
            Line::new(0.0, 1.0, 10),
        );
        assert_eq!(grid.width_i().unwrap(), 111);
        // 1000 / 9 = 111.1
        assert_eq!(grid.width_j().unwrap(), 112);
    }

    #[test]
    fn test_single_sample_axis_is_error() {
        let mut grid = rectangle_grid();
        grid.inline.count = 1;
        assert!(matches!(grid.width_i(), Err(MetadataError::Computation(_))));
        assert!(matches!(grid.compute(), Err(MetadataError::Computation(_))));
    }

    #[test]
    fn test_transformation_method_flips_with_handedness() {
        // Skewed quadrilateral so the dot-product expression is non-zero
        let p00 = point(0.0, 0.0);
        let p10 = point(100.0, 0.0);
        let p01 = point(0.0, 50.0);
        let p11 = point(120.0, 80.0);
        let line = Line::new(0.0, 1.0, 11);

        let forward = BinGrid::new(p00, p10, p01, p11, line, line);
        let mirrored = BinGrid::new(p00, p01, p10, p11, line, line);

        // p00 -> p10 -> p11 -> p01 runs counter-clockwise
        assert_eq!(
            forward.transformation_method().unwrap(),
            TRANSFORMATION_RIGHT_HANDED
        );
        assert_eq!(
            mirrored.transformation_method().unwrap(),
            TRANSFORMATION_LEFT_HANDED
        );
    }

    #[test]
    fn test_rectangle_is_left_handed_code() {
        assert_eq!(
            rectangle_grid().transformation_method().unwrap(),
            TRANSFORMATION_LEFT_HANDED
        );
    }

    fn grid_with_j_axis(dx: f64, dy: f64) -> BinGrid {
        BinGrid::new(
            point(0.0, 0.0),
            point(1.0, 0.0),
            point(dx, dy),
            point(1.0 + dx, dy),
            Line::new(0.0, 1.0, 2),
            Line::new(0.0, 1.0, 2),
        )
    }

    #[test]
    fn test_bearing_rounding() {
        assert_eq!(
            grid_with_j_axis(0.0, 1.0).bearing_value().unwrap(),
            AttributeValue::Float(0.0)
        );
        assert_eq!(
            grid_with_j_axis(1.0, 0.0).bearing_value().unwrap(),
            AttributeValue::Float(90.0)
        );
        assert_eq!(
            grid_with_j_axis(-1.0, 0.0).bearing_value().unwrap(),
            AttributeValue::Integer(270)
        );
        // atan2(1, 3) = 18.4349 degrees
        assert_eq!(grid_with_j_axis(1.0, 3.0).bearing_of_j_axis().unwrap(), 18.43);
        // westward bearings lose their decimals: 360 - 18.43 = 341.57 -> 342
        assert_eq!(grid_with_j_axis(-1.0, 3.0).bearing_of_j_axis().unwrap(), 342.0);
    }

    #[test]
    fn test_zero_length_j_axis_is_error() {
        let grid = grid_with_j_axis(0.0, 0.0);
        assert!(matches!(
            grid.bearing_of_j_axis(),
            Err(MetadataError::Computation(_))
        ));
    }

    #[test]
    fn test_local_coordinates_closed_polygon() {
        let coords = rectangle_grid().local_coordinates();
        assert_eq!(coords.len(), 5);
        assert_eq!(coords[0], coords[4]);
        assert_eq!(coords[1], LocalCoordinate { x: 0.0, y: 50.0 });
        assert_eq!(coords[2], LocalCoordinate { x: 100.0, y: 50.0 });
        assert_eq!(coords[3], LocalCoordinate { x: 100.0, y: 0.0 });
    }

    #[test]
    fn test_attribute_order_and_json() {
        let attributes = rectangle_grid().compute().unwrap();
        let names: Vec<_> = attributes.iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec![
                "OriginI",
                "OriginJ",
                "OriginEasting",
                "OriginNorthing",
                "NodeIncrementI",
                "NodeIncrementJ",
                "WidthI",
                "WidthJ",
                "TransformationMethod",
                "BearingOfJaxis",
                "BinGridLocalCoordinates",
            ]
        );

        let json = serde_json::to_string(&attributes).unwrap();
        assert!(json.starts_with(r#"{"OriginI":0.0,"OriginJ":0.0,"#));
        assert!(json.contains(r#""WidthI":10,"WidthJ":10,"TransformationMethod":1049"#));
        assert!(json.contains(r#""BinGridLocalCoordinates":[{"X":0.0,"Y":0.0},"#));
    }

    #[test]
    fn test_repeated_calculation_is_identical() {
        let grid = rectangle_grid();
        let first = serde_json::to_vec(&grid.compute().unwrap()).unwrap();
        let second = serde_json::to_vec(&grid.compute().unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
