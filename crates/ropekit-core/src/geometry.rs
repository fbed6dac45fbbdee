//! 2D geometry primitives.

use serde::{Deserialize, Serialize};

use crate::constants::EPSILON;

/// Represents a 2D point with X and Y coordinates, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given X and Y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// True when both points coincide within the geometric epsilon.
    pub fn almost_eq(&self, other: &Point) -> bool {
        self.distance_to(other) < EPSILON
    }
}

/// Total length of a polyline given as consecutive points.
pub fn polyline_length(points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|pair| pair[0].distance_to(&pair[1]))
        .sum()
}

/// True when two scalars coincide within the geometric epsilon.
pub fn nearly_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Axis-aligned bounding box.
///
/// Width and height are stored alongside the extents so the serialized form
/// carries them explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Creates a bounding box from its extents.
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Computes the bounding box of a point set, ignoring non-finite
    /// coordinates. Returns `None` when no finite extent exists.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in points {
            if p.x < min_x {
                min_x = p.x;
            }
            if p.x > max_x {
                max_x = p.x;
            }
            if p.y < min_y {
                min_y = p.y;
            }
            if p.y > max_y {
                max_y = p.y;
            }
        }
        if !min_x.is_finite() || !max_x.is_finite() || !min_y.is_finite() || !max_y.is_finite() {
            return None;
        }
        Some(Self::new(min_x, max_x, min_y, max_y))
    }

    /// Smallest box covering both boxes.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.min_x.min(other.min_x),
            self.max_x.max(other.max_x),
            self.min_y.min(other.min_y),
            self.max_y.max(other.max_y),
        )
    }

    /// The box shifted by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Bounds {
        Bounds::new(
            self.min_x + dx,
            self.max_x + dx,
            self.min_y + dy,
            self.max_y + dy,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.max_x.is_finite()
            && self.min_y.is_finite()
            && self.max_y.is_finite()
    }
}
