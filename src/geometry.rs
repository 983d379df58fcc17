//! 2D vector, survey point and survey line primitives

use serde::{Deserialize, Serialize};
use std::ops::Sub;

/// World-space 2D vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean length
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A cube corner expressed in index, annotation and world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub i: f64,
    pub j: f64,
    pub inline: f64,
    pub xline: f64,
    pub easting: f64,
    pub northing: f64,
}

impl Point {
    pub fn new(i: f64, j: f64, inline: f64, xline: f64, easting: f64, northing: f64) -> Self {
        Self {
            i,
            j,
            inline,
            xline,
            easting,
            northing,
        }
    }

    /// Build the corner at `index` from a reader's three corner arrays
    pub fn from_corners(
        index: usize,
        index_corners: &crate::types::Corners,
        annotation_corners: &crate::types::Corners,
        world_corners: &crate::types::Corners,
    ) -> Self {
        let [i, j] = index_corners[index];
        let [inline, xline] = annotation_corners[index];
        let [easting, northing] = world_corners[index];
        Self::new(i, j, inline, xline, easting, northing)
    }

    /// World position as a vector
    pub fn world(&self) -> Vector2 {
        Vector2::new(self.easting, self.northing)
    }
}

/// Axis descriptor for the inline or crossline direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: f64,
    pub increment: f64,
    pub count: u64,
}

impl Line {
    pub fn new(start: f64, increment: f64, count: u64) -> Self {
        Self {
            start,
            increment,
            count,
        }
    }

    /// Number of intervals between the first and last sample
    pub fn segments(&self) -> Option<u64> {
        self.count.checked_sub(1).filter(|&n| n > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_ops() {
        let a = Vector2::new(4.0, 6.0);
        let b = Vector2::new(1.0, 2.0);
        assert_eq!(a - b, Vector2::new(3.0, 4.0));
        assert_eq!((a - b).magnitude(), 5.0);
        assert_eq!(a.dot(&b), 16.0);
    }

    #[test]
    fn test_point_from_corners() {
        let index = [[0.0, 0.0], [10.0, 0.0], [0.0, 5.0], [10.0, 5.0]];
        let annot = [[100.0, 200.0], [110.0, 200.0], [100.0, 205.0], [110.0, 205.0]];
        let world = [[1.0, 2.0], [3.0, 4.0], [5.0, 6.0], [7.0, 8.0]];

        let p = Point::from_corners(2, &index, &annot, &world);
        assert_eq!(p, Point::new(0.0, 5.0, 100.0, 205.0, 5.0, 6.0));
        assert_eq!(p.world(), Vector2::new(5.0, 6.0));
    }

    #[test]
    fn test_line_segments() {
        assert_eq!(Line::new(1.0, 1.0, 11).segments(), Some(10));
        assert_eq!(Line::new(1.0, 1.0, 1).segments(), None);
        assert_eq!(Line::new(1.0, 1.0, 0).segments(), None);
    }
}
